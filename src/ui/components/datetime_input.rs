use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use crossterm::event::KeyCode;

#[derive(Clone, Copy, PartialEq)]
pub enum DateTimePart {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

/// Segmented date/time entry: digits fill the highlighted part, Left/Right
/// switch parts. Produces the ISO 8601 meeting time the backend expects.
pub struct DateTimeInputState {
    pub datetime: NaiveDateTime,
    pub editing: bool,
    pub part: DateTimePart,
    pub current_input: String,
}

impl DateTimeInputState {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self {
            datetime,
            editing: false,
            part: DateTimePart::Year,
            current_input: String::new(),
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if self.editing {
            self.part = DateTimePart::Year;
            self.current_input.clear();
        }
    }

    pub fn next_part(&mut self) {
        self.part = match self.part {
            DateTimePart::Year => DateTimePart::Month,
            DateTimePart::Month => DateTimePart::Day,
            DateTimePart::Day => DateTimePart::Hour,
            DateTimePart::Hour => DateTimePart::Minute,
            DateTimePart::Minute => DateTimePart::Year,
        };
        self.current_input.clear();
    }

    pub fn previous_part(&mut self) {
        self.part = match self.part {
            DateTimePart::Year => DateTimePart::Minute,
            DateTimePart::Month => DateTimePart::Year,
            DateTimePart::Day => DateTimePart::Month,
            DateTimePart::Hour => DateTimePart::Day,
            DateTimePart::Minute => DateTimePart::Hour,
        };
        self.current_input.clear();
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.current_input.push(c);
                let wanted = match self.part {
                    DateTimePart::Year => 4,
                    _ => 2,
                };
                if self.current_input.len() == wanted {
                    if let Ok(value) = self.current_input.parse::<u32>() {
                        self.apply_part(value);
                    }
                    self.current_input.clear();
                } else if self.current_input.len() > wanted {
                    self.current_input.clear();
                }
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Right => self.next_part(),
            KeyCode::Left => self.previous_part(),
            _ => {}
        }
    }

    fn apply_part(&mut self, value: u32) {
        let date = self.datetime.date();
        let time = self.datetime.time();

        let new_date = match self.part {
            DateTimePart::Year => {
                let year = value as i32;
                if (1900..=2100).contains(&year) {
                    NaiveDate::from_ymd_opt(year, date.month(), date.day())
                } else {
                    None
                }
            }
            DateTimePart::Month => {
                if (1..=12).contains(&value) {
                    NaiveDate::from_ymd_opt(date.year(), value, date.day())
                } else {
                    None
                }
            }
            DateTimePart::Day => {
                if (1..=days_in_month(date.year(), date.month())).contains(&value) {
                    NaiveDate::from_ymd_opt(date.year(), date.month(), value)
                } else {
                    None
                }
            }
            DateTimePart::Hour | DateTimePart::Minute => None,
        };

        let new_time = match self.part {
            DateTimePart::Hour if value <= 23 => NaiveTime::from_hms_opt(value, time.minute(), 0),
            DateTimePart::Minute if value <= 59 => NaiveTime::from_hms_opt(time.hour(), value, 0),
            _ => None,
        };

        if let Some(d) = new_date {
            self.datetime = NaiveDateTime::new(d, time);
        } else if let Some(t) = new_time {
            self.datetime = NaiveDateTime::new(date, t);
        }
    }

    /// The meeting time as the backend wants it on the wire.
    pub fn to_iso_string(&self) -> String {
        self.datetime.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    pub fn get_display_string(&self) -> String {
        let plain = self.datetime.format("%Y-%m-%d %H:%M").to_string();
        if !self.editing {
            return plain;
        }

        let marker = if !self.current_input.is_empty() {
            format!("[{}]", self.current_input)
        } else {
            match self.part {
                DateTimePart::Year => "[YYYY]".to_string(),
                DateTimePart::Month => "[MM]".to_string(),
                DateTimePart::Day => "[DD]".to_string(),
                DateTimePart::Hour => "[hh]".to_string(),
                DateTimePart::Minute => "[mm]".to_string(),
            }
        };

        let date = self.datetime.date();
        let time = self.datetime.time();
        match self.part {
            DateTimePart::Year => format!(
                "{}{}-{:02}-{:02} {:02}:{:02}",
                date.year(),
                marker,
                date.month(),
                date.day(),
                time.hour(),
                time.minute()
            ),
            DateTimePart::Month => format!(
                "{}-{:02}{}-{:02} {:02}:{:02}",
                date.year(),
                date.month(),
                marker,
                date.day(),
                time.hour(),
                time.minute()
            ),
            DateTimePart::Day => format!(
                "{}-{:02}-{:02}{} {:02}:{:02}",
                date.year(),
                date.month(),
                date.day(),
                marker,
                time.hour(),
                time.minute()
            ),
            DateTimePart::Hour => format!(
                "{}-{:02}-{:02} {:02}{}:{:02}",
                date.year(),
                date.month(),
                date.day(),
                time.hour(),
                marker,
                time.minute()
            ),
            DateTimePart::Minute => format!(
                "{}-{:02}-{:02} {:02}:{:02}{}",
                date.year(),
                date.month(),
                date.day(),
                time.hour(),
                time.minute(),
                marker
            ),
        }
    }
}

// Helper function to get the number of days in a month
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTimeInputState {
        DateTimeInputState::new(NaiveDateTime::new(
            NaiveDate::from_ymd_opt(y, mo, d).unwrap(),
            NaiveTime::from_hms_opt(h, mi, 0).unwrap(),
        ))
    }

    #[test]
    fn digits_fill_the_active_part() {
        let mut state = state_at(2025, 7, 26, 12, 0);
        state.toggle_editing();
        state.part = DateTimePart::Hour;
        state.handle_input(KeyCode::Char('0'));
        state.handle_input(KeyCode::Char('9'));
        assert_eq!(state.datetime.time().hour(), 9);
    }

    #[test]
    fn out_of_range_values_are_ignored() {
        let mut state = state_at(2025, 7, 26, 12, 0);
        state.toggle_editing();
        state.part = DateTimePart::Minute;
        state.handle_input(KeyCode::Char('7'));
        state.handle_input(KeyCode::Char('5'));
        assert_eq!(state.datetime.time().minute(), 0);
    }

    #[test]
    fn iso_string_matches_wire_format() {
        let state = state_at(2025, 7, 26, 9, 30);
        assert_eq!(state.to_iso_string(), "2025-07-26T09:30:00Z");
    }

    #[test]
    fn february_day_entry_respects_leap_years() {
        let mut state = state_at(2024, 2, 1, 0, 0);
        state.toggle_editing();
        state.part = DateTimePart::Day;
        state.handle_input(KeyCode::Char('2'));
        state.handle_input(KeyCode::Char('9'));
        assert_eq!(state.datetime.date().day(), 29);

        let mut state = state_at(2025, 2, 1, 0, 0);
        state.toggle_editing();
        state.part = DateTimePart::Day;
        state.handle_input(KeyCode::Char('2'));
        state.handle_input(KeyCode::Char('9'));
        assert_eq!(state.datetime.date().day(), 1);
    }
}
