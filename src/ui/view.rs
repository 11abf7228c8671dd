use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::models::Project;
use crate::report::layout::format_meeting_time;
use crate::ui::add_wizard::{centered_rect, render_notice};

// Represents the state of the project lookup screen
pub struct ViewState {
    pub client_id_input: String,
    projects: Vec<Project>,
    list_state: ListState,
    confirm_share: bool,
    pub show_error: Option<String>,
    pub show_success: Option<String>,
    pub show_warning: Option<String>,
}

pub enum ViewAction {
    Back,
    Fetch(i32),
    Download(Project),
    Share(Project),
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            client_id_input: String::new(),
            projects: Vec::new(),
            list_state: ListState::default(),
            confirm_share: false,
            show_error: None,
            show_success: None,
            show_warning: None,
        }
    }

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.list_state = ListState::default();
        if !projects.is_empty() {
            self.list_state.select(Some(0));
        }
        self.projects = projects;
    }

    pub fn set_error(&mut self, message: String) {
        self.show_error = Some(message);
    }

    pub fn set_success(&mut self, message: String) {
        self.show_success = Some(message);
    }

    /// Warnings are a separate class from errors: the artifact was produced,
    /// only the hand-off to the environment failed.
    pub fn set_warning(&mut self, message: String) {
        self.show_warning = Some(message);
    }

    pub fn has_results(&self) -> bool {
        !self.projects.is_empty()
    }

    pub fn next(&mut self) {
        if self.projects.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.projects.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.projects.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.projects.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.list_state.selected().and_then(|i| self.projects.get(i))
    }
}

pub fn render_view<B: Backend>(frame: &mut Frame<B>, state: &mut ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(frame.size());

    let title = Paragraph::new("View Project Details")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    if state.has_results() {
        render_results(frame, state, chunks[1]);
    } else {
        let input = Paragraph::new(format!("{}|", state.client_id_input))
            .block(Block::default().borders(Borders::ALL).title("Client ID"));
        frame.render_widget(input, chunks[1]);
    }

    let help_text = if state.confirm_share {
        "Send this project summary via WhatsApp? Y - Yes | N - No"
    } else if state.has_results() {
        "Up/Down - Navigate | D - Download PDF | W - WhatsApp | Esc - New search"
    } else {
        "Type a numeric Client ID | Enter - Fetch | Esc - Back"
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);

    if state.confirm_share {
        render_share_confirmation(frame, frame.size());
    }
    if let Some(error) = &state.show_error {
        render_notice(frame, frame.size(), error, Color::Red, "Error");
    }
    if let Some(warning) = &state.show_warning {
        render_notice(frame, frame.size(), warning, Color::Yellow, "Warning");
    }
    if let Some(message) = &state.show_success {
        render_notice(frame, frame.size(), message, Color::Green, "Success");
    }
}

fn render_results<B: Backend>(frame: &mut Frame<B>, state: &mut ViewState, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(area);

    let items: Vec<ListItem> = state
        .projects
        .iter()
        .map(|project| {
            ListItem::new(Spans::from(vec![
                Span::styled(
                    project.project_name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" ({})", project.project_type)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Projects"))
        .highlight_style(Style::default().fg(Color::Yellow))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, halves[0], &mut state.list_state);

    let detail_lines = match state.selected_project() {
        Some(project) => project_details(project),
        None => vec![Spans::from("No project selected")],
    };
    let details = Paragraph::new(detail_lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Details"));
    frame.render_widget(details, halves[1]);
}

fn project_details(project: &Project) -> Vec<Spans<'static>> {
    let label = |name: &str, value: String| {
        Spans::from(vec![
            Span::styled(
                format!("{}: ", name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(value),
        ])
    };

    let mut lines = vec![
        label("Client ID", project.project_client_id.to_string()),
        label("Client Name", project.project_client_name.clone()),
        label("Phone", project.project_contact_number.clone()),
        label("Project Name", project.project_name.clone()),
        label("Project Type", project.project_type.clone()),
        label("Meeting Time", format_meeting_time(&project.project_time)),
        label("Address", project.project_address.clone()),
        label("Description", project.description_or_dash().to_string()),
    ];

    if let Some(outcome) = project.meeting_outcome() {
        lines.push(label("Outcome", outcome.to_string()));
    }

    let items = project.worked_items();
    if !items.is_empty() {
        lines.push(Spans::from(Span::styled(
            "Points to be Worked:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for item in items {
            lines.push(Spans::from(format!("  - {}", item)));
        }
    }

    lines
}

fn render_share_confirmation<B: Backend>(frame: &mut Frame<B>, size: Rect) {
    let area = centered_rect(60, 20, size);
    let prompt = Paragraph::new(vec![
        Spans::from(""),
        Spans::from("Send this project summary via WhatsApp?"),
        Spans::from(""),
        Spans::from("Y - Yes | N - No"),
    ])
    .style(Style::default().fg(Color::Cyan))
    .block(Block::default().borders(Borders::ALL).title("Confirm"));
    frame.render_widget(Clear, area);
    frame.render_widget(prompt, area);
}

pub fn handle_input(state: &mut ViewState) -> Result<Option<ViewAction>> {
    if let Event::Key(key) = event::read()? {
        // Notices swallow the next key press.
        if state.show_error.take().is_some()
            || state.show_success.take().is_some()
            || state.show_warning.take().is_some()
        {
            return Ok(None);
        }

        if state.confirm_share {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    state.confirm_share = false;
                    if let Some(project) = state.selected_project() {
                        return Ok(Some(ViewAction::Share(project.clone())));
                    }
                }
                _ => {
                    state.confirm_share = false;
                }
            }
            return Ok(None);
        }

        if state.has_results() {
            match key.code {
                KeyCode::Esc => {
                    state.set_projects(Vec::new());
                    state.client_id_input.clear();
                }
                KeyCode::Up => state.previous(),
                KeyCode::Down => state.next(),
                KeyCode::Char('d') | KeyCode::Char('D') => {
                    if let Some(project) = state.selected_project() {
                        return Ok(Some(ViewAction::Download(project.clone())));
                    }
                }
                KeyCode::Char('w') | KeyCode::Char('W') => {
                    if state.selected_project().is_some() {
                        state.confirm_share = true;
                    }
                }
                _ => {}
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Esc => return Ok(Some(ViewAction::Back)),
            KeyCode::Enter => match state.client_id_input.trim().parse::<i32>() {
                Ok(client_id) => return Ok(Some(ViewAction::Fetch(client_id))),
                Err(_) => state.set_error("Please enter a valid numeric Client ID.".to_string()),
            },
            KeyCode::Char(c) => state.client_id_input.push(c),
            KeyCode::Backspace => {
                state.client_id_input.pop();
            }
            _ => {}
        }
    }

    Ok(None)
}
