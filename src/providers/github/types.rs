use chrono::{DateTime, Utc};
use serde::Deserialize;

/// GitHub Actions workflow run.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRun {
    /// Unique identifier for the workflow run
    pub id: u64,
    /// Name of the workflow
    pub name: String,
    /// Head branch, absent for runs not tied to a branch
    pub head_branch: Option<String>,
    /// SHA of the head commit
    pub head_sha: String,
    /// Web URL for the run
    pub html_url: String,
    /// Identifier of the workflow definition this run belongs to
    pub workflow_id: u64,
    /// Run number, stable across re-runs of the same attempt
    pub run_number: u64,
    /// Conclusion of the run (success, failure, etc.)
    pub conclusion: Option<String>,
    /// When the run was created
    pub created_at: DateTime<Utc>,
    /// When the run was updated
    pub updated_at: DateTime<Utc>,
}

impl WorkflowRun {
    /// Whether the run ended with a failure conclusion.
    pub fn failed(&self) -> bool {
        self.conclusion.as_deref() == Some("failure")
    }
}

/// Job within a GitHub Actions workflow run.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// Name of the job
    pub name: String,
    /// Conclusion of the job
    pub conclusion: Option<String>,
}

impl Job {
    /// Whether the job ended with a failure conclusion.
    pub fn failed(&self) -> bool {
        self.conclusion.as_deref() == Some("failure")
    }
}

/// Links for GitHub resources.
pub mod links {
    /// Generate URL for a commit.
    pub fn commit_url(owner: &str, repo: &str, sha: &str) -> String {
        format!("https://github.com/{}/{}/commit/{}", owner, repo, sha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_url() {
        let url = links::commit_url("octo", "widgets", "abc1234def");
        assert_eq!(url, "https://github.com/octo/widgets/commit/abc1234def");
    }

    #[test]
    fn test_run_failed_only_on_failure_conclusion() {
        let json = serde_json::json!({
            "id": 1,
            "name": "CI",
            "head_branch": "main",
            "head_sha": "abc1234def",
            "html_url": "https://github.com/octo/widgets/actions/runs/1",
            "workflow_id": 9,
            "run_number": 3,
            "conclusion": "failure",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:05:00Z",
        });
        let run: WorkflowRun = serde_json::from_value(json).unwrap();
        assert!(run.failed());

        let success = WorkflowRun {
            conclusion: Some("success".to_string()),
            ..run.clone()
        };
        assert!(!success.failed());

        let pending = WorkflowRun {
            conclusion: None,
            ..run
        };
        assert!(!pending.failed());
    }

    #[test]
    fn test_job_conclusion_may_be_null() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "name": "build",
            "conclusion": null,
        }))
        .unwrap();
        assert!(!job.failed());
    }
}
