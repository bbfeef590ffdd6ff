use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::auth::Token;
use crate::error::{NotifyError, Result};

use super::types::{Job, WorkflowRun};

/// GitHub API client for fetching workflow run data.
#[derive(Clone)]
pub struct GitHubClient {
    /// HTTP client
    client: reqwest::Client,
    /// Base URL for GitHub API
    base_url: String,
    /// Repository owner
    owner: String,
    /// Repository name
    repo: String,
}

impl GitHubClient {
    /// Create a new GitHub API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - GitHub API base URL (e.g., "https://api.github.com")
    /// * `owner` - Repository owner/organization
    /// * `repo` - Repository name
    /// * `token` - GitHub token, sent as a Bearer credential
    ///
    /// # Returns
    ///
    /// A configured GitHub API client.
    pub fn new(base_url: String, owner: String, repo: String, token: &Token) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("cinotify/0.3"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                .map_err(|e| NotifyError::Config(format!("Invalid provider token: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| NotifyError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            owner,
            repo,
        })
    }

    /// Fetch a workflow run by identifier.
    ///
    /// Returns `Ok(None)` when the provider reports the run does not exist;
    /// any other non-success response is an error.
    pub async fn fetch_workflow_run(&self, run_id: u64) -> Result<Option<WorkflowRun>> {
        let url = format!(
            "{}/repos/{}/{}/actions/runs/{}",
            self.base_url, self.owner, self.repo, run_id
        );

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response).await?;

        Ok(Some(response.json().await?))
    }

    /// Fetch all jobs belonging to a workflow run.
    pub async fn fetch_workflow_jobs(&self, run_id: u64) -> Result<Vec<Job>> {
        let url = format!(
            "{}/repos/{}/{}/actions/runs/{}/jobs",
            self.base_url, self.owner, self.repo, run_id
        );

        let response = check_status(self.client.get(&url).send().await?).await?;
        let body: WorkflowJobsResponse = response.json().await?;

        Ok(body.jobs)
    }

    /// Fetch the most recent run other than the current one.
    ///
    /// Requests the two most recent runs, optionally filtered to `branch`,
    /// and returns the first entry in provider-returned order whose id
    /// differs from `current_run_id`.
    pub async fn fetch_previous_run(
        &self,
        branch: Option<&str>,
        current_run_id: u64,
    ) -> Result<Option<WorkflowRun>> {
        let mut url = format!(
            "{}/repos/{}/{}/actions/runs?per_page=2",
            self.base_url, self.owner, self.repo
        );

        if let Some(branch) = branch {
            url.push_str(&format!("&branch={branch}"));
        }

        let response = check_status(self.client.get(&url).send().await?).await?;
        let body: WorkflowRunsResponse = response.json().await?;

        Ok(body
            .workflow_runs
            .into_iter()
            .find(|run| run.id != current_run_id))
    }

    /// Fetch the most recent completed run sharing `run_number` that ended
    /// in failure.
    ///
    /// A workflow can be re-run under the same run number after edits; a hit
    /// here means this exact attempt previously failed and has been retried.
    pub async fn fetch_previous_same_number_failed_run(
        &self,
        workflow_id: u64,
        run_number: u64,
    ) -> Result<Option<WorkflowRun>> {
        let url = format!(
            "{}/repos/{}/{}/actions/workflows/{}/runs?status=completed",
            self.base_url, self.owner, self.repo, workflow_id
        );

        let response = check_status(self.client.get(&url).send().await?).await?;
        let body: WorkflowRunsResponse = response.json().await?;

        Ok(body
            .workflow_runs
            .into_iter()
            .find(|run| run.run_number == run_number && run.failed()))
    }
}

/// Map any non-success response to an API error carrying the body text.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());
        return Err(NotifyError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response)
}

/// Response from GitHub API for workflow runs.
#[derive(Deserialize)]
struct WorkflowRunsResponse {
    workflow_runs: Vec<WorkflowRun>,
}

/// Response from GitHub API for workflow jobs.
#[derive(Deserialize)]
struct WorkflowJobsResponse {
    jobs: Vec<Job>,
}
