use anyhow::{Context, Result, bail};
use reqwest::Response;
use serde::Deserialize;

use crate::config::Config;
use crate::models::{NewProject, Project, ProjectPatch};

/// Client for the firm's backend API. The backend owns all records; this side
/// only fetches, creates, and clones.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

/// Response shape shared by the mutation endpoints.
#[derive(Debug, Deserialize)]
struct MutationResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.backend_url().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Fetch every project recorded for a client. A non-2xx status or a
    /// non-JSON body both mean "not found or error".
    pub async fn get_projects(&self, client_id: i32) -> Result<Vec<Project>> {
        let url = format!("{}/api/getProject/{}", self.base_url, client_id);
        tracing::debug!(%url, "fetching projects");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("could not reach the backend")?;

        let response = expect_json(response)?;
        let projects: Vec<Project> = response
            .json()
            .await
            .context("backend returned an unexpected body")?;

        tracing::debug!(count = projects.len(), "projects fetched");
        Ok(projects)
    }

    /// Record a new project.
    pub async fn add_project(&self, project: &NewProject) -> Result<()> {
        let url = format!("{}/api/addProject", self.base_url);
        tracing::debug!(%url, "submitting project");

        let response = self
            .http
            .post(&url)
            .json(project)
            .send()
            .await
            .context("could not reach the backend")?;

        Self::check_mutation(response).await
    }

    /// Clone a client's existing project server-side and apply the overrides
    /// from `patch`. The backend owns the clone semantics entirely.
    pub async fn clone_project(&self, client_id: i32, patch: &ProjectPatch) -> Result<()> {
        let url = format!("{}/cloneAndAddProject/{}", self.base_url, client_id);
        tracing::debug!(%url, "cloning project");

        let response = self
            .http
            .post(&url)
            .json(patch)
            .send()
            .await
            .context("could not reach the backend")?;

        Self::check_mutation(response).await
    }

    async fn check_mutation(response: Response) -> Result<()> {
        let response = expect_json(response)?;
        let result: MutationResponse = response
            .json()
            .await
            .context("backend returned an unexpected body")?;

        if !result.success {
            let reason = result.error.unwrap_or_else(|| "submission failed".to_string());
            tracing::warn!(%reason, "backend rejected the request");
            bail!(reason);
        }

        Ok(())
    }
}

/// Reject non-2xx statuses and bodies that do not declare JSON. The backend
/// serves error pages as HTML, so the content type check is load-bearing.
fn expect_json(response: Response) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        bail!("backend responded with status {}", status);
    }

    let is_json = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);
    if !is_json {
        bail!("backend did not return JSON");
    }

    Ok(response)
}
