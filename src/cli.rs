use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use crate::auth::Token;
use crate::classify::{classify, NotificationCase};
use crate::config::{flag_enabled, validate_base_url, Config, GitHubSettings, SlackSettings};
use crate::error::NotifyError;
use crate::message;
use crate::providers::github::GitHubClient;
use crate::slack::SlackClient;

#[derive(Parser)]
#[command(name = "cinotify")]
#[command(author, version, about = "CI workflow outcome notifier", long_about = None)]
pub struct Cli {
    /// Slack bot token
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    bot_token: String,

    /// Slack channel to notify
    #[arg(long, env = "CHANNEL")]
    channel: String,

    /// CI provider token, sent as a Bearer credential
    #[arg(long, env = "PROVIDER_TOKEN", hide_env_values = true)]
    provider_token: String,

    /// Repository owner
    #[arg(long, env = "REPO_OWNER")]
    repo_owner: String,

    /// Repository name
    #[arg(long, env = "REPO_NAME")]
    repo_name: String,

    /// Workflow run to report on
    #[arg(long, env = "RUN_ID")]
    run_id: u64,

    /// Also send a message on success ("true" enables, anything else disables)
    #[arg(long, env = "SEND_SUCCESS_MESSAGE", default_value = "false")]
    send_success_message: String,

    /// Detect and report recoveries from a previous failure
    #[arg(long, env = "RECOVERY_DETECTION", default_value = "true")]
    recovery_detection: String,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    github_api_url: String,

    /// Slack Web API base URL
    #[arg(long, env = "SLACK_API_URL", default_value = "https://slack.com/api")]
    slack_api_url: String,
}

impl Cli {
    /// Assemble the runtime configuration from the parsed arguments.
    fn to_config(&self) -> Result<Config, NotifyError> {
        Ok(Config {
            github: GitHubSettings {
                api_url: validate_base_url(&self.github_api_url, "GitHub API")?,
                token: Token::from(self.provider_token.as_str()),
                owner: self.repo_owner.clone(),
                repo: self.repo_name.clone(),
                run_id: self.run_id,
            },
            slack: SlackSettings {
                api_url: validate_base_url(&self.slack_api_url, "Slack API")?,
                bot_token: Token::from(self.bot_token.as_str()),
                channel: self.channel.clone(),
            },
            send_success_message: flag_enabled(&self.send_success_message),
            recovery_detection: flag_enabled(&self.recovery_detection),
        })
    }

    pub async fn execute(&self) -> Result<()> {
        let config = self.to_config()?;
        notify_run_outcome(&config).await
    }
}

/// Fetch the run's outcome and history, classify it, and notify Slack.
///
/// Runs once per invocation: fetch run and jobs, fetch the two history
/// signals (skipped when recovery detection is off), classify, send.
async fn notify_run_outcome(config: &Config) -> Result<()> {
    let github = GitHubClient::new(
        config.github.api_url.clone(),
        config.github.owner.clone(),
        config.github.repo.clone(),
        &config.github.token,
    )?;
    let slack = SlackClient::new(
        config.slack.api_url.clone(),
        config.slack.bot_token.clone(),
        config.slack.channel.clone(),
    );

    info!(
        "Reporting workflow run {} in {}/{}",
        config.github.run_id, config.github.owner, config.github.repo
    );

    let run = github
        .fetch_workflow_run(config.github.run_id)
        .await
        .context("Failed to fetch workflow run")?
        .ok_or(NotifyError::RunNotFound(config.github.run_id))?;

    let jobs = github
        .fetch_workflow_jobs(run.id)
        .await
        .context("Failed to fetch workflow jobs")?;
    info!("Fetched {} jobs for workflow '{}'", jobs.len(), run.name);

    // The two history signals are independent of each other; fetch them
    // concurrently. Both are skipped entirely when recovery detection is off.
    let (previous_run, previous_same_number_failed_run) = if config.recovery_detection {
        let (previous, same_number_failed) = tokio::join!(
            github.fetch_previous_run(run.head_branch.as_deref(), run.id),
            github.fetch_previous_same_number_failed_run(run.workflow_id, run.run_number),
        );
        (
            previous.context("Failed to fetch previous run")?,
            same_number_failed.context("Failed to fetch previous same-number run")?,
        )
    } else {
        (None, None)
    };

    let case = classify(
        &jobs,
        config.send_success_message,
        previous_run.as_ref(),
        previous_same_number_failed_run.as_ref(),
    );

    let owner = &config.github.owner;
    let repo = &config.github.repo;
    match case {
        NotificationCase::Failure => {
            let failed: Vec<&str> = jobs
                .iter()
                .filter(|job| job.failed())
                .map(|job| job.name.as_str())
                .collect();
            warn!("Run {} has failed jobs: {}", run.id, failed.join(", "));

            slack
                .notify(&message::failure_message(&run, owner, repo))
                .await;
        }
        NotificationCase::RecoverySuccess => {
            let duration = message::format_duration(run.created_at, run.updated_at);
            slack
                .notify(&message::success_message(&run, owner, repo, Some(&duration)))
                .await;
        }
        // With recovery detection on, routine successes send nothing.
        NotificationCase::PlainSuccess if !config.recovery_detection => {
            slack
                .notify(&message::success_message(&run, owner, repo, None))
                .await;
        }
        NotificationCase::PlainSuccess | NotificationCase::Suppressed => {
            info!("No notification to send for run {}", run.id);
        }
    }

    Ok(())
}
