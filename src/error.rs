use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Workflow run {0} was not found")]
    RunNotFound(u64),

    #[error("GitHub API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Slack API error: {0}")]
    Slack(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NotifyError>;
