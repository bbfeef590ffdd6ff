use crate::providers::github::types::{Job, WorkflowRun};

/// Notification case derived for a workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCase {
    /// At least one job concluded in failure.
    Failure,
    /// Every job succeeded with no historical failure signal.
    PlainSuccess,
    /// Every job succeeded after a previous failure on the same branch or
    /// run-number lineage.
    RecoverySuccess,
    /// No message should be sent.
    Suppressed,
}

/// Classify the current run.
///
/// Pure function of the current job conclusions, the success-message flag,
/// and the two historical signals. The rules form an ordered decision table;
/// the first match wins:
///
/// 1. any failed job -> `Failure`
/// 2. success messages disabled -> `Suppressed`
/// 3. previous run failed, or a completed run with the same run number
///    failed -> `RecoverySuccess`
/// 4. otherwise -> `PlainSuccess`
///
/// An empty job list classifies as success: no job concluded in failure.
pub fn classify(
    jobs: &[Job],
    send_success_enabled: bool,
    previous_run: Option<&WorkflowRun>,
    previous_same_number_failed_run: Option<&WorkflowRun>,
) -> NotificationCase {
    if jobs.iter().any(Job::failed) {
        return NotificationCase::Failure;
    }

    if !send_success_enabled {
        return NotificationCase::Suppressed;
    }

    let recovered_on_branch = previous_run.is_some_and(WorkflowRun::failed);
    if recovered_on_branch || previous_same_number_failed_run.is_some() {
        return NotificationCase::RecoverySuccess;
    }

    NotificationCase::PlainSuccess
}
