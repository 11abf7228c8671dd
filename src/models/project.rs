use serde::{Deserialize, Serialize};

/// A project record as served by the backend. Field names on the wire are the
/// backend's own (camel-case with a few historical oddities), so every field
/// carries an explicit rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "projectId", default)]
    pub project_id: i32,
    #[serde(rename = "projectName")]
    pub project_name: String,
    #[serde(rename = "projectClientID")]
    pub project_client_id: i32,
    #[serde(rename = "projectClientName")]
    pub project_client_name: String,
    #[serde(rename = "projectContactNumber")]
    pub project_contact_number: String,
    #[serde(rename = "projectType")]
    pub project_type: String,
    #[serde(rename = "projectDescription", default)]
    pub project_description: String,
    /// Scheduled meeting time, ISO 8601 as sent by the backend.
    #[serde(rename = "projectTime")]
    pub project_time: String,
    #[serde(rename = "projectAddress")]
    pub project_address: String,
    #[serde(rename = "projectMeetingOutcome", default)]
    pub project_meeting_outcome: Option<String>,
    /// Comma-separated action items. The backend knows this field only as
    /// lowercase "projectworked".
    #[serde(rename = "projectworked", default)]
    pub project_worked: Option<String>,
}

impl Project {
    /// Action items derived from `project_worked`: split on commas, trimmed,
    /// empties dropped. Order is preserved and duplicates are kept.
    pub fn worked_items(&self) -> Vec<String> {
        match &self.project_worked {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Description text for rendering; empty descriptions print as "-".
    pub fn description_or_dash(&self) -> &str {
        if self.project_description.trim().is_empty() {
            "-"
        } else {
            &self.project_description
        }
    }

    /// Meeting outcome, present only when the meeting actually happened.
    pub fn meeting_outcome(&self) -> Option<&str> {
        self.project_meeting_outcome
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with_worked(worked: Option<&str>) -> Project {
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
            project_worked: worked.map(str::to_string),
        }
    }

    #[test]
    fn worked_items_trims_and_drops_empties() {
        let project = project_with_worked(Some("a, b ,, c"));
        assert_eq!(project.worked_items(), vec!["a", "b", "c"]);
    }

    #[test]
    fn worked_items_preserves_order_and_duplicates() {
        let project = project_with_worked(Some("walls, roof, walls"));
        assert_eq!(project.worked_items(), vec!["walls", "roof", "walls"]);
    }

    #[test]
    fn worked_items_empty_when_absent() {
        assert!(project_with_worked(None).worked_items().is_empty());
        assert!(project_with_worked(Some("  ,  ")).worked_items().is_empty());
    }

    #[test]
    fn empty_description_renders_as_dash() {
        let project = project_with_worked(None);
        assert_eq!(project.description_or_dash(), "-");
    }

    #[test]
    fn blank_outcome_counts_as_absent() {
        let mut project = project_with_worked(None);
        project.project_meeting_outcome = Some("   ".to_string());
        assert_eq!(project.meeting_outcome(), None);

        project.project_meeting_outcome = Some("Approved plan".to_string());
        assert_eq!(project.meeting_outcome(), Some("Approved plan"));
    }

    #[test]
    fn deserializes_backend_field_names() {
        let json = r#"{
            "projectId": 7,
            "projectName": "Villa A",
            "projectClientID": 42,
            "projectClientName": "A. Kulkarni",
            "projectContactNumber": "9876543210",
            "projectType": "Residential",
            "projectDescription": "Two floors",
            "projectTime": "2025-07-26T12:00:00Z",
            "projectAddress": "Vijayapur",
            "projectMeetingOutcome": null,
            "projectworked": "site visit, estimate"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.project_id, 7);
        assert_eq!(project.project_client_id, 42);
        assert_eq!(project.worked_items(), vec!["site visit", "estimate"]);
    }
}
