use serde::Serialize;

/// Body for the create endpoint. Mirrors `Project` minus the id, which the
/// backing store assigns.
#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
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
        let body = NewProject {
            project_name: "Villa A".to_string(),
            project_client_id: 42,
            project_client_name: "A. Kulkarni".to_string(),
            project_contact_number: "9876543210".to_string(),
            project_type: "Residential".to_string(),
            project_description: "Two floors".to_string(),
            project_time: "2025-07-26T12:00:00Z".to_string(),
            project_address: "Vijayapur".to_string(),
            project_meeting_outcome: None,
            project_worked: Some("site visit".to_string()),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["projectClientID"], 42);
        assert_eq!(value["projectworked"], "site visit");
        assert!(value["projectMeetingOutcome"].is_null());
        assert!(value.get("projectId").is_none());
    }
}
