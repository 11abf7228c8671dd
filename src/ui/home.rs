use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

const MENU_ENTRIES: [&str; 4] = [
    "Add Project",
    "View Project",
    "Update Project",
    "Quit",
];

// Represents the state of the home menu
pub struct HomeState {
    list_state: ListState,
}

pub enum HomeAction {
    AddProject,
    ViewProject,
    UpdateProject,
    Exit,
}

impl HomeState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self { list_state }
    }

    pub fn next(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= MENU_ENTRIES.len() - 1 {
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
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    MENU_ENTRIES.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}

pub fn render_home<B: Backend>(frame: &mut Frame<B>, state: &mut HomeState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(frame.size());

    let title = Paragraph::new(vec![
        Spans::from(Span::styled(
            "Vidwat Associates",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Spans::from("Project Dashboard"),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = MENU_ENTRIES
        .iter()
        .map(|entry| ListItem::new(*entry))
        .collect();

    let menu = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Menu"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(menu, chunks[1], &mut state.list_state);

    let help = Paragraph::new("Up/Down - Navigate | Enter - Select | Q - Quit")
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);
}

pub fn handle_input(state: &mut HomeState) -> Result<Option<HomeAction>> {
    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Up => {
                state.previous();
            }
            KeyCode::Down => {
                state.next();
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                return Ok(Some(HomeAction::Exit));
            }
            KeyCode::Enter => {
                return Ok(match state.list_state.selected() {
                    Some(0) => Some(HomeAction::AddProject),
                    Some(1) => Some(HomeAction::ViewProject),
                    Some(2) => Some(HomeAction::UpdateProject),
                    Some(3) => Some(HomeAction::Exit),
                    _ => None,
                });
            }
            _ => {}
        }
    }

    Ok(None)
}
