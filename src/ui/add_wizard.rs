use anyhow::Result;
use chrono::Timelike;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::models::NewProject;
use crate::ui::components::datetime_input::{DateTimeInputState, DateTimePart};

pub enum AddWizardAction {
    Cancel,
    Submit(NewProject),
}

#[derive(Clone, Copy, PartialEq)]
pub enum AddField {
    ClientName,
    Phone,
    ClientId,
    ProjectName,
    ProjectType,
    Description,
    MeetingTime,
    Address,
    Outcome,
    Worked,
}

const FIELD_ORDER: [AddField; 10] = [
    AddField::ClientName,
    AddField::Phone,
    AddField::ClientId,
    AddField::ProjectName,
    AddField::ProjectType,
    AddField::Description,
    AddField::MeetingTime,
    AddField::Address,
    AddField::Outcome,
    AddField::Worked,
];

// Represents the state of the project creation wizard
pub struct AddWizardState {
    pub client_name: String,
    pub phone: String,
    pub client_id: String,
    pub project_name: String,
    pub project_type: String,
    pub description: String,
    pub meeting_time: DateTimeInputState,
    pub address: String,
    pub outcome: String,
    pub worked: String,
    pub current_field: AddField,
    pub editing: bool,
    pub show_error: Option<String>,
    pub show_success: Option<String>,
}

impl AddWizardState {
    pub fn new() -> Self {
        let now = chrono::Local::now()
            .naive_local()
            .with_second(0)
            .unwrap_or_else(|| chrono::Local::now().naive_local());

        Self {
            client_name: String::new(),
            phone: String::new(),
            client_id: String::new(),
            project_name: String::new(),
            project_type: String::new(),
            description: String::new(),
            meeting_time: DateTimeInputState::new(now),
            address: String::new(),
            outcome: String::new(),
            worked: String::new(),
            current_field: AddField::ClientName,
            editing: false,
            show_error: None,
            show_success: None,
        }
    }

    /// Fresh form carrying the "submitted" notice, shown after a successful
    /// create.
    pub fn after_submission() -> Self {
        let mut state = Self::new();
        state.show_success = Some("Project submitted successfully!".to_string());
        state
    }

    pub fn set_error(&mut self, message: String) {
        self.show_error = Some(message);
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if self.current_field == AddField::MeetingTime {
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

        if self.current_field == AddField::MeetingTime {
            self.meeting_time.handle_input(key);
            return;
        }

        let field = self.current_text_field_mut();
        match key {
            KeyCode::Char(c) => field.push(c),
            KeyCode::Backspace => {
                field.pop();
            }
            _ => {}
        }
    }

    fn current_text_field_mut(&mut self) -> &mut String {
        match self.current_field {
            AddField::ClientName => &mut self.client_name,
            AddField::Phone => &mut self.phone,
            AddField::ClientId => &mut self.client_id,
            AddField::ProjectName => &mut self.project_name,
            AddField::ProjectType => &mut self.project_type,
            AddField::Description => &mut self.description,
            AddField::Address => &mut self.address,
            AddField::Outcome => &mut self.outcome,
            AddField::Worked => &mut self.worked,
            AddField::MeetingTime => unreachable!("meeting time is not a text field"),
        }
    }

    /// Validate and assemble the create payload. Phone must be exactly ten
    /// digits and the client ID numeric; the optional fields may stay blank.
    pub fn validate(&self) -> Result<NewProject, String> {
        if self.phone.len() != 10 || !self.phone.chars().all(|c| c.is_ascii_digit()) {
            return Err("Phone number must be exactly 10 digits.".to_string());
        }

        let client_id: i32 = self
            .client_id
            .trim()
            .parse()
            .map_err(|_| "Client ID must be a number.".to_string())?;

        let required = [
            (&self.client_name, "Client name"),
            (&self.project_name, "Project name"),
            (&self.project_type, "Project type"),
            (&self.description, "Description"),
            (&self.address, "Address"),
        ];
        for (value, label) in required {
            if value.trim().is_empty() {
                return Err(format!("{} is required.", label));
            }
        }

        Ok(NewProject {
            project_name: self.project_name.trim().to_string(),
            project_client_id: client_id,
            project_client_name: self.client_name.trim().to_string(),
            project_contact_number: self.phone.clone(),
            project_type: self.project_type.trim().to_string(),
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

pub fn render_add_wizard<B: Backend>(frame: &mut Frame<B>, state: &mut AddWizardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(frame.size());

    let title = Paragraph::new("Add New Project")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    render_form(frame, state, chunks[1]);

    let help_text = if state.editing {
        match state.current_field {
            AddField::MeetingTime => {
                "Enter - Save field | Left/Right - Switch part | Esc - Cancel editing"
            }
            _ => "Enter - Save field | Esc - Cancel editing",
        }
    } else {
        "Enter - Edit field | Up/Down - Navigate | S - Submit | Esc - Back"
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

fn render_form<B: Backend>(frame: &mut Frame<B>, state: &mut AddWizardState, area: Rect) {
    let field_names = [
        "Client Name",
        "Phone (10 digits)",
        "Client ID",
        "Project Name",
        "Project Type",
        "Description",
        "Meeting Time",
        "Address",
        "Meeting Outcome (optional)",
        "Points to be Worked (optional)",
    ];

    let field_values = [
        state.client_name.clone(),
        state.phone.clone(),
        state.client_id.clone(),
        state.project_name.clone(),
        state.project_type.clone(),
        state.description.clone(),
        state.meeting_time.get_display_string(),
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
                let displayed = if state.current_field == AddField::MeetingTime {
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
        .block(Block::default().borders(Borders::ALL).title("Project Details"))
        .highlight_style(Style::default().fg(Color::Yellow));

    frame.render_widget(form_list, area);
}

pub(crate) fn render_notice<B: Backend>(
    frame: &mut Frame<B>,
    size: Rect,
    message: &str,
    color: Color,
    title: &str,
) {
    let area = centered_rect(60, 20, size);
    let notice = Paragraph::new(vec![Spans::from(""), Spans::from(message)])
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} (any key to dismiss)", title)),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(notice, area);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

pub fn handle_input(state: &mut AddWizardState) -> Result<Option<AddWizardAction>> {
    if let Event::Key(key) = event::read()? {
        // Notices swallow the next key press.
        if state.show_error.take().is_some() || state.show_success.take().is_some() {
            return Ok(None);
        }

        match key.code {
            KeyCode::Esc => {
                if state.editing {
                    state.toggle_editing();
                } else {
                    return Ok(Some(AddWizardAction::Cancel));
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
                Ok(project) => return Ok(Some(AddWizardAction::Submit(project))),
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

    fn filled_state() -> AddWizardState {
        let mut state = AddWizardState::new();
        state.client_name = "A. Kulkarni".to_string();
        state.phone = "9876543210".to_string();
        state.client_id = "42".to_string();
        state.project_name = "Villa A".to_string();
        state.project_type = "Residential".to_string();
        state.description = "Two floors".to_string();
        state.address = "Vijayapur".to_string();
        state
    }

    #[test]
    fn valid_form_builds_the_payload() {
        let project = filled_state().validate().unwrap();
        assert_eq!(project.project_client_id, 42);
        assert_eq!(project.project_contact_number, "9876543210");
        assert_eq!(project.project_meeting_outcome, None);
        assert_eq!(project.project_worked, None);
    }

    #[test]
    fn short_phone_is_rejected() {
        let mut state = filled_state();
        state.phone = "12345".to_string();
        assert!(state.validate().is_err());
    }

    #[test]
    fn non_digit_phone_is_rejected() {
        let mut state = filled_state();
        state.phone = "98765abcde".to_string();
        assert!(state.validate().is_err());
    }

    #[test]
    fn non_numeric_client_id_is_rejected() {
        let mut state = filled_state();
        state.client_id = "abc".to_string();
        assert!(state.validate().is_err());
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut state = filled_state();
        state.address = "   ".to_string();
        let err = state.validate().unwrap_err();
        assert!(err.contains("Address"));
    }

    #[test]
    fn optional_fields_pass_through_when_set() {
        let mut state = filled_state();
        state.outcome = " Approved ".to_string();
        state.worked = "site visit, estimate".to_string();
        let project = state.validate().unwrap();
        assert_eq!(project.project_meeting_outcome.as_deref(), Some("Approved"));
        assert_eq!(
            project.project_worked.as_deref(),
            Some("site visit, estimate")
        );
    }
}
