use chrono::{DateTime, Utc};

use crate::providers::github::types::{links, WorkflowRun};

/// Format the elapsed time between two instants as `"{h}h {m}m {s}s"`.
///
/// Whole seconds only; zero-valued components are kept and nothing is
/// zero-padded.
pub fn format_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let total_seconds = (end - start).num_seconds();
    let (minutes, seconds) = (total_seconds / 60, total_seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);

    format!("{hours}h {minutes}m {seconds}s")
}

/// Build the failed-jobs message for a run.
pub fn failure_message(run: &WorkflowRun, owner: &str, repo: &str) -> String {
    format!(
        ":x: Workflow '{}' run {} has failed jobs in {}/{}.\nCommit: <{}|{}>\nWorkflow: <{}|Link>",
        run.name,
        run.id,
        owner,
        repo,
        links::commit_url(owner, repo, &run.head_sha),
        short_sha(&run.head_sha),
        run.html_url,
    )
}

/// Build the success message for a run.
///
/// Passing `recovered_duration` switches to the recovered-from-failure
/// wording and appends the build duration line.
pub fn success_message(
    run: &WorkflowRun,
    owner: &str,
    repo: &str,
    recovered_duration: Option<&str>,
) -> String {
    let headline_suffix = match recovered_duration {
        Some(_) => " after previous failure",
        None => "",
    };

    let mut message = format!(
        ":white_check_mark: Workflow '{}' run {} has succeeded in {}/{}{}.\nCommit: <{}|{}>\nWorkflow: <{}|Link>",
        run.name,
        run.id,
        owner,
        repo,
        headline_suffix,
        links::commit_url(owner, repo, &run.head_sha),
        short_sha(&run.head_sha),
        run.html_url,
    );

    if let Some(duration) = recovered_duration {
        message.push_str(&format!("\nBuild Duration: {duration}"));
    }

    message
}

fn short_sha(sha: &str) -> &str {
    &sha[..sha.len().min(7)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn run(id: u64) -> WorkflowRun {
        WorkflowRun {
            id,
            name: "CI".to_string(),
            head_branch: Some("main".to_string()),
            head_sha: "0123456789abcdef0123456789abcdef01234567".to_string(),
            html_url: format!("https://github.com/octo/widgets/actions/runs/{id}"),
            workflow_id: 77,
            run_number: 7,
            conclusion: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 12, 34).unwrap(),
        }
    }

    #[test]
    fn test_format_duration_decomposes_seconds() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(
            format_duration(start, start + Duration::seconds(3725)),
            "1h 2m 5s"
        );
    }

    #[test]
    fn test_format_duration_keeps_zero_components() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(format_duration(start, start), "0h 0m 0s");
        assert_eq!(
            format_duration(start, start + Duration::seconds(59)),
            "0h 0m 59s"
        );
        assert_eq!(
            format_duration(start, start + Duration::seconds(3600)),
            "1h 0m 0s"
        );
    }

    #[test]
    fn test_failure_message_shape() {
        let message = failure_message(&run(42), "octo", "widgets");

        assert!(message.contains(":x:"));
        assert!(message.contains("run 42"));
        assert!(message.contains("has failed jobs in octo/widgets."));
        assert!(message.contains("<https://github.com/octo/widgets/commit/0123456789abcdef0123456789abcdef01234567|0123456>"));
        assert!(message.contains("<https://github.com/octo/widgets/actions/runs/42|Link>"));
        assert!(!message.contains("Build Duration"));
    }

    #[test]
    fn test_plain_success_message_shape() {
        let message = success_message(&run(43), "octo", "widgets", None);

        assert!(message.contains(":white_check_mark:"));
        assert!(message.contains("run 43"));
        assert!(message.contains("has succeeded in octo/widgets."));
        assert!(!message.contains("after previous failure"));
        assert!(!message.contains("Build Duration"));
    }

    #[test]
    fn test_recovery_message_carries_duration_line() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let duration = format_duration(start, start + Duration::seconds(3661));
        let message = success_message(&run(43), "octo", "widgets", Some(&duration));

        assert!(message.contains("has succeeded in octo/widgets after previous failure."));
        assert!(message.ends_with("Build Duration: 1h 1m 1s"));
    }

    #[test]
    fn test_short_sha_truncates_to_seven_chars() {
        assert_eq!(short_sha("0123456789abcdef"), "0123456");
        assert_eq!(short_sha("abc"), "abc");
    }
}
