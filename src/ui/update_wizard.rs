use anyhow::Result;
use chrono::Timelike;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::models::{Project, ProjectPatch};
use crate::ui::add_wizard::render_notice;
use crate::ui::components::datetime_input::{DateTimeInputState, DateTimePart};

pub enum UpdateWizardAction {
    Cancel,
    Fetch(i32),
    Submit { client_id: i32, patch: ProjectPatch },
}

#[derive(Clone, Copy, PartialEq)]
pub enum UpdateField {
    ProjectName,
    MeetingTime,
    Description,
    Address,
    Outcome,
    Worked,
}

const FIELD_ORDER: [UpdateField; 6] = [
    UpdateField::ProjectName,
    UpdateField::MeetingTime,
    UpdateField::Description,
    UpdateField::Address,
    UpdateField::Outcome,
    UpdateField::Worked,
];

// Represents the state of the clone-project wizard: look up the client's
// existing project first, then capture the overrides for the new record.
pub struct UpdateWizardState {
    pub client_id_input: String,
    pub existing: Option<Project>,
    pub project_name: String,
    pub meeting_time: DateTimeInputState,
    pub description: String,
    pub address: String,
    pub outcome: String,
    pub worked: String,
    pub current_field: UpdateField,
    pub editing: bool,
    pub show_error: Option<String>,
    pub show_success: Option<String>,
}

impl UpdateWizardState {
    pub fn new() -> Self {
        let now = chrono::Local::now()
            .naive_local()
            .with_second(0)
            .unwrap_or_else(|| chrono::Local::now().naive_local());

        Self {
            client_id_input: String::new(),
            existing: None,
            project_name: String::new(),
            meeting_time: DateTimeInputState::new(now),
            description: String::new(),
            address: String::new(),
            outcome: String::new(),
            worked: String::new(),
            current_field: UpdateField::ProjectName,
            editing: false,
            show_error: None,
            show_success: None,
        }
    }

    /// Fresh wizard carrying the "created" notice, shown after a successful
    /// clone.
    pub fn after_submission() -> Self {
        let mut state = Self::new();
        state.show_success = Some("New project added (based on existing one)!".to_string());
        state
    }

    pub fn set_error(&mut self, message: String) {
        self.show_error = Some(message);
    }

    /// Move to the override form once the existing record is in hand.
    pub fn load_existing(&mut self, project: Project) {
        self.address = project.project_address.clone();
        self.existing = Some(project);
        self.current_field = UpdateField::ProjectName;
    }

    pub fn client_id(&self) -> Option<i32> {
        self.client_id_input.trim().parse().ok()
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if self.current_field == UpdateField::MeetingTime {
            self.meeting_time.editing = self.editing;
            if self.editing {
                self.meeting_time.part = DateTimePart::Year;
                self.meeting_time.current_input.clear();
            }
        }
    }

    pub fn next_field(&mut self) {
        let i = FIELD_ORDER
            .iter()
            .position(|f| *f == self.current_field)
            .unwrap_or(0);
        self.current_field = FIELD_ORDER[(i + 1) % FIELD_ORDER.len()];
    }

    pub fn previous_field(&mut self) {
        let i = FIELD_ORDER
            .iter()
            .position(|f| *f == self.current_field)
            .unwrap_or(0);
        self.current_field = FIELD_ORDER[(i + FIELD_ORDER.len() - 1) % FIELD_ORDER.len()];
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        if self.current_field == UpdateField::MeetingTime {
            self.meeting_time.handle_input(key);
            return;
        }

        let field = match self.current_field {
            UpdateField::ProjectName => &mut self.project_name,
            UpdateField::Description => &mut self.description,
            UpdateField::Address => &mut self.address,
            UpdateField::Outcome => &mut self.outcome,
            UpdateField::Worked => &mut self.worked,
            UpdateField::MeetingTime => unreachable!("meeting time is not a text field"),
        };
        match key {
            KeyCode::Char(c) => field.push(c),
            KeyCode::Backspace => {
                field.pop();
            }
            _ => {}
        }
    }

    /// Validate and assemble the clone overrides. A blank project name
    /// defaults to "<existing name> - Update".
    pub fn validate(&self) -> Result<ProjectPatch, String> {
        let existing = self
            .existing
            .as_ref()
            .ok_or_else(|| "No existing project loaded.".to_string())?;

        if self.description.trim().is_empty() {
            return Err("Description is required.".to_string());
        }
        if self.address.trim().is_empty() {
            return Err("Address is required.".to_string());
        }

        let project_name = if self.project_name.trim().is_empty() {
            format!("{} - Update", existing.project_name)
        } else {
            self.project_name.trim().to_string()
        };

        Ok(ProjectPatch {
            project_name,
            project_description: self.description.trim().to_string(),
            project_time: self.meeting_time.to_iso_string(),
            project_address: self.address.trim().to_string(),
            project_meeting_outcome: if self.outcome.trim().is_empty() {
                None
            } else {
                Some(self.outcome.trim().to_string())
            },
            project_worked: if self.worked.trim().is_empty() {
                None
            } else {
                Some(self.worked.trim().to_string())
            },
        })
    }
}

pub fn render_update_wizard<B: Backend>(frame: &mut Frame<B>, state: &mut UpdateWizardState) {
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

    let title = Paragraph::new("Add New Project Based on Existing Client")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    if state.existing.is_some() {
        render_form(frame, state, chunks[1]);
    } else {
        let input = Paragraph::new(format!("{}|", state.client_id_input))
            .block(Block::default().borders(Borders::ALL).title("Client ID"));
        frame.render_widget(input, chunks[1]);
    }

    let help_text = if state.existing.is_none() {
        "Type a numeric Client ID | Enter - Fetch | Esc - Back"
    } else if state.editing {
        match state.current_field {
            UpdateField::MeetingTime => {
                "Enter - Save field | Left/Right - Switch part | Esc - Cancel editing"
            }
            _ => "Enter - Save field | Esc - Cancel editing",
        }
    } else {
        "Enter - Edit field | Up/Down - Navigate | S - Save as new | Esc - Back"
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);

    if let Some(error) = &state.show_error {
        render_notice(frame, frame.size(), error, Color::Red, "Error");
    }
    if let Some(message) = &state.show_success {
        render_notice(frame, frame.size(), message, Color::Green, "Success");
    }
}

fn render_form<B: Backend>(frame: &mut Frame<B>, state: &mut UpdateWizardState, area: Rect) {
    let existing_name = state
        .existing
        .as_ref()
        .map(|p| p.project_name.clone())
        .unwrap_or_default();

    let field_names = [
        format!("New Project Name (blank: \"{} - Update\")", existing_name),
        "Meeting Time".to_string(),
        "Description".to_string(),
        "Address".to_string(),
        "Meeting Outcome (optional)".to_string(),
        "Points to be Worked (optional)".to_string(),
    ];

    let field_values = [
        state.project_name.clone(),
        state.meeting_time.get_display_string(),
        state.description.clone(),
        state.address.clone(),
        state.outcome.clone(),
        state.worked.clone(),
    ];

    let current = FIELD_ORDER
        .iter()
        .position(|f| *f == state.current_field)
        .unwrap_or(0);

    let items: Vec<ListItem> = field_names
        .iter()
        .zip(field_values.iter())
        .enumerate()
        .map(|(i, (name, value))| {
            let content = if i == current && state.editing {
                let displayed = if state.current_field == UpdateField::MeetingTime {
                    value.clone()
                } else {
                    format!("{}|", value)
                };
                Spans::from(vec![
                    Span::styled(format!("{}: ", name), Style::default().fg(Color::Yellow)),
                    Span::styled(displayed, Style::default().add_modifier(Modifier::BOLD)),
                ])
            } else {
                let style = if i == current {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                Spans::from(vec![
                    Span::styled(format!("{}: ", name), style),
                    Span::raw(value.clone()),
                ])
            };

            ListItem::new(content)
        })
        .collect();

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Overrides"))
        .highlight_style(Style::default().fg(Color::Yellow));

    frame.render_widget(form_list, area);
}

pub fn handle_input(state: &mut UpdateWizardState) -> Result<Option<UpdateWizardAction>> {
    if let Event::Key(key) = event::read()? {
        // Notices swallow the next key press.
        if state.show_error.take().is_some() || state.show_success.take().is_some() {
            return Ok(None);
        }

        if state.existing.is_none() {
            match key.code {
                KeyCode::Esc => return Ok(Some(UpdateWizardAction::Cancel)),
                KeyCode::Enter => match state.client_id() {
                    Some(client_id) => return Ok(Some(UpdateWizardAction::Fetch(client_id))),
                    None => {
                        state.set_error("Please enter a valid numeric Client ID.".to_string())
                    }
                },
                KeyCode::Char(c) => state.client_id_input.push(c),
                KeyCode::Backspace => {
                    state.client_id_input.pop();
                }
                _ => {}
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Esc => {
                if state.editing {
                    state.toggle_editing();
                } else {
                    state.existing = None;
                    state.client_id_input.clear();
                }
            }
            KeyCode::Enter => {
                state.toggle_editing();
            }
            KeyCode::Up if !state.editing => {
                state.previous_field();
            }
            KeyCode::Down if !state.editing => {
                state.next_field();
            }
            KeyCode::Char('s') if !state.editing => match state.validate() {
                Ok(patch) => {
                    // The id parsed once already to get here.
                    if let Some(client_id) = state.client_id() {
                        return Ok(Some(UpdateWizardAction::Submit { client_id, patch }));
                    }
                }
                Err(message) => state.set_error(message),
            },
            _ if state.editing => {
                state.edit_current_field(key.code);
            }
            _ => {}
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing_project() -> Project {
        Project {
            project_id: 7,
            project_name: "Villa A".to_string(),
            project_client_id: 42,
            project_client_name: "A. Kulkarni".to_string(),
            project_contact_number: "9876543210".to_string(),
            project_type: "Residential".to_string(),
            project_description: "Two floors".to_string(),
            project_time: "2025-07-26T12:00:00Z".to_string(),
            project_address: "Vijayapur".to_string(),
            project_meeting_outcome: None,
            project_worked: None,
        }
    }

    fn loaded_state() -> UpdateWizardState {
        let mut state = UpdateWizardState::new();
        state.client_id_input = "42".to_string();
        state.load_existing(existing_project());
        state.description = "Revised plan".to_string();
        state
    }

    #[test]
    fn blank_name_defaults_to_update_suffix() {
        let patch = loaded_state().validate().unwrap();
        assert_eq!(patch.project_name, "Villa A - Update");
    }

    #[test]
    fn explicit_name_wins_over_default() {
        let mut state = loaded_state();
        state.project_name = "Villa B".to_string();
        let patch = state.validate().unwrap();
        assert_eq!(patch.project_name, "Villa B");
    }

    #[test]
    fn loading_prefills_the_address() {
        let state = loaded_state();
        assert_eq!(state.address, "Vijayapur");
    }

    #[test]
    fn blank_description_is_rejected() {
        let mut state = loaded_state();
        state.description.clear();
        assert!(state.validate().is_err());
    }

    #[test]
    fn validate_requires_a_loaded_project() {
        let state = UpdateWizardState::new();
        assert!(state.validate().is_err());
    }
}
