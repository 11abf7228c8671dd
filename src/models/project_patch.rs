use serde::Serialize;

/// Partial override body for the clone endpoint. The backend copies the
/// client's existing record and applies whatever is set here.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPatch {
    #[serde(rename = "projectName")]
    pub project_name: String,
    #[serde(rename = "projectDescription")]
    pub project_description: String,
    #[serde(rename = "projectTime")]
    pub project_time: String,
    #[serde(rename = "projectAddress")]
    pub project_address: String,
    #[serde(rename = "projectMeetingOutcome")]
    pub project_meeting_outcome: Option<String>,
    #[serde(rename = "projectworked")]
    pub project_worked: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_backend_field_names() {
        let patch = ProjectPatch {
            project_name: "Villa A - Update".to_string(),
            project_description: "Revised plan".to_string(),
            project_time: "2025-08-01T09:30:00Z".to_string(),
            project_address: "Begum Talab Road".to_string(),
            project_meeting_outcome: Some("Approved".to_string()),
            project_worked: None,
        };

        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value["projectName"], "Villa A - Update");
        assert_eq!(value["projectMeetingOutcome"], "Approved");
        assert!(value["projectworked"].is_null());
    }
}
