use thiserror::Error;

use crate::models::Project;
use crate::report::layout::format_meeting_time;

/// Failures of the WhatsApp share flow. `InvalidPhone` blocks the share
/// before anything is composed; `NavigationBlocked` happens after the message
/// exists and is a warning rather than a hard failure.
#[derive(Debug, Error, PartialEq)]
pub enum ShareError {
    #[error("invalid phone number")]
    InvalidPhone,
    #[error("could not open the share link; the browser refused the request")]
    NavigationBlocked,
}

/// A composed share message bound to a normalized phone number.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareMessage {
    /// Normalized `+<countrycode><subscriber>` number.
    pub phone: String,
    pub text: String,
}

impl ShareMessage {
    /// The wa.me deep link: digits without the leading `+`, message
    /// percent-encoded as the text query parameter.
    pub fn deep_link(&self) -> String {
        format!(
            "https://wa.me/{}?text={}",
            self.phone.trim_start_matches('+'),
            urlencoding::encode(&self.text)
        )
    }
}

/// Normalize a contact number to `+<countrycode><subscriber>`.
///
/// Bare 10-digit numbers get the local `+91` prefix; 12-digit numbers that
/// already start with the country calling code get a `+`. Anything else is
/// left alone and caught by the validity check: `+` followed by 10 to 15
/// digits.
pub fn normalize_phone(raw: &str) -> Result<String, ShareError> {
    let mut phone: String = raw.split_whitespace().collect();

    if !phone.starts_with('+') {
        if phone.len() == 10 {
            phone = format!("+91{}", phone);
        } else if phone.len() == 12 && phone.starts_with("91") {
            phone = format!("+{}", phone);
        }
    }

    let digits = phone.strip_prefix('+').ok_or(ShareError::InvalidPhone)?;
    if digits.is_empty()
        || digits.len() < 10
        || digits.len() > 15
        || !digits.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ShareError::InvalidPhone);
    }

    Ok(phone)
}

/// Compose the summary message for one project. Pure: no clock, no network,
/// byte-identical on repeat calls. Fails before composing anything when the
/// contact number does not normalize.
pub fn build_share_message(project: &Project) -> Result<ShareMessage, ShareError> {
    let phone = normalize_phone(&project.project_contact_number)?;

    let outcome_section = match project.meeting_outcome() {
        Some(outcome) => format!("\n*Meeting Outcome:*\n{}\n", outcome),
        None => String::new(),
    };

    let text = format!(
        "*Project Summary Report*\n\
         *VIDWAT ASSOCIATES* – Architects & Engineers\n\
         ──────────────────────────\n\
         \n\
         *Client Name:* {client_name}\n\
         *Contact Number:* {contact}\n\
         *Client ID:* {client_id}\n\
         \n\
         *Project Name:* {project_name}\n\
         *Project Type:* {project_type}\n\
         *Meeting Time:* {meeting_time}\n\
         \n\
         *Address:*\n\
         {address}\n\
         \n\
         *Project Description:*\n\
         {description}\n\
         {outcome_section}\
         \n\
         ──────────────────────────\n\
         *Report Generated By:* VIDWAT Team\n\
         Vijayapur",
        client_name = project.project_client_name,
        contact = project.project_contact_number,
        client_id = project.project_client_id,
        project_name = project.project_name,
        project_type = project.project_type,
        meeting_time = format_meeting_time(&project.project_time),
        address = project.project_address,
        description = project.description_or_dash(),
        outcome_section = outcome_section,
    );

    Ok(ShareMessage {
        phone,
        text: text.trim().to_string(),
    })
}

/// Hand the deep link to the system browser. A refusal is reported as
/// `NavigationBlocked`; the message itself was already produced successfully.
pub fn open_share_link(message: &ShareMessage) -> Result<(), ShareError> {
    let link = message.deep_link();
    tracing::debug!(phone = %message.phone, "opening share link");

    webbrowser::open(&link).map_err(|e| {
        tracing::warn!(error = %e, "share link was not opened");
        ShareError::NavigationBlocked
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project {
            project_id: 1,
            project_name: "Villa A".to_string(),
            project_client_id: 42,
            project_client_name: "A. Kulkarni".to_string(),
            project_contact_number: "9876543210".to_string(),
            project_type: "Residential".to_string(),
            project_description: String::new(),
            project_time: "2025-07-26T12:00:00Z".to_string(),
            project_address: "Vijayapur".to_string(),
            project_meeting_outcome: None,
            project_worked: None,
        }
    }

    #[test]
    fn normalizes_local_and_prefixed_numbers() {
        assert_eq!(normalize_phone("9876543210").unwrap(), "+919876543210");
        assert_eq!(normalize_phone("919876543210").unwrap(), "+919876543210");
        assert_eq!(normalize_phone("+449876543210").unwrap(), "+449876543210");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_phone("+919876543210").unwrap();
        assert_eq!(once, "+919876543210");
        assert_eq!(normalize_phone(&once).unwrap(), once);
    }

    #[test]
    fn strips_whitespace_before_normalizing() {
        assert_eq!(normalize_phone(" 98765 43210 ").unwrap(), "+919876543210");
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert_eq!(normalize_phone("123"), Err(ShareError::InvalidPhone));
        assert_eq!(
            normalize_phone("+1234567890123456"),
            Err(ShareError::InvalidPhone)
        );
        assert_eq!(normalize_phone("98765abcde"), Err(ShareError::InvalidPhone));
        assert_eq!(normalize_phone(""), Err(ShareError::InvalidPhone));
    }

    #[test]
    fn message_carries_normalized_phone_and_fields() {
        let message = build_share_message(&sample_project()).unwrap();
        assert_eq!(message.phone, "+919876543210");
        assert!(message.text.contains("*Client Name:* A. Kulkarni"));
        assert!(message.text.contains("*Client ID:* 42"));
        assert!(message.text.contains("*Meeting Time:* 26/07/2025, 12:00:00 pm"));
        assert!(message.text.contains("*Project Description:*\n-"));
        assert!(!message.text.contains("Meeting Outcome"));
    }

    #[test]
    fn message_includes_outcome_only_when_present() {
        let mut project = sample_project();
        project.project_meeting_outcome = Some("Client approved the plan".to_string());
        let message = build_share_message(&project).unwrap();
        assert!(
            message
                .text
                .contains("*Meeting Outcome:*\nClient approved the plan")
        );
    }

    #[test]
    fn message_is_byte_identical_across_calls() {
        let project = sample_project();
        let first = build_share_message(&project).unwrap();
        let second = build_share_message(&project).unwrap();
        assert_eq!(first.text, second.text);
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_contact_aborts_before_composition() {
        let mut project = sample_project();
        project.project_contact_number = "+1234567890123456".to_string();
        assert_eq!(build_share_message(&project), Err(ShareError::InvalidPhone));
    }

    #[test]
    fn deep_link_strips_plus_and_encodes_text() {
        let message = ShareMessage {
            phone: "+919876543210".to_string(),
            text: "hello world & more".to_string(),
        };
        assert_eq!(
            message.deep_link(),
            "https://wa.me/919876543210?text=hello%20world%20%26%20more"
        );
    }

    #[test]
    fn message_has_no_surrounding_whitespace() {
        let message = build_share_message(&sample_project()).unwrap();
        assert_eq!(message.text, message.text.trim());
    }
}
