use url::Url;

use crate::auth::Token;
use crate::error::{NotifyError, Result};

/// Runtime configuration, assembled once at process start and passed by
/// parameter to every component.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub side of the pipeline
    pub github: GitHubSettings,

    /// Slack side of the pipeline
    pub slack: SlackSettings,

    /// Whether successful runs produce a message at all
    pub send_success_message: bool,

    /// Whether to consult run history and report recoveries
    pub recovery_detection: bool,
}

#[derive(Debug, Clone)]
pub struct GitHubSettings {
    /// GitHub API base URL
    pub api_url: String,

    /// GitHub token, sent as a Bearer credential
    pub token: Token,

    /// Repository owner
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// Workflow run to report on
    pub run_id: u64,
}

#[derive(Debug, Clone)]
pub struct SlackSettings {
    /// Slack Web API base URL
    pub api_url: String,

    /// Bot token for authentication
    pub bot_token: Token,

    /// Target channel identifier
    pub channel: String,
}

/// Interpret a truthy environment flag: "true" (case-insensitive) enables,
/// anything else disables.
pub fn flag_enabled(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Validate a base URL and strip any trailing slash so paths can be appended.
pub fn validate_base_url(raw: &str, what: &str) -> Result<String> {
    Url::parse(raw)
        .map(|_| raw.trim_end_matches('/').to_string())
        .map_err(|e| NotifyError::Config(format!("Invalid {what} URL '{raw}': {e}")))
}
