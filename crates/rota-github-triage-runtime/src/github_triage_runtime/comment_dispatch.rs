//! Mention-triggered comment command dispatch.
//!
//! Machine-authored comments are ignored unconditionally before parsing;
//! everything else requires the bot mention token. Dispatch failures are
//! caught here and surfaced as a best-effort error comment.

use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use tracing::{error, info, warn};

use rota_core::{current_unix_timestamp_ms, format_unix_ms_utc};
use rota_github_triage::triage_command::{parse_triage_command, TriageCommand};
use rota_github_triage::triage_render::{
    render_check_failure_comment, render_check_success_comment, render_check_timeout_comment,
    render_check_working_comment, render_dispatch_error_comment, render_help_comment,
    render_unknown_command_comment, truncate_for_error,
};
use rota_github_triage::webhook_payload::WebhookPayload;

use super::{GithubTriageRuntime, RepoRef};

pub(super) async fn handle_comment_created(
    runtime: &GithubTriageRuntime,
    payload: &WebhookPayload,
) -> Result<()> {
    let Some(comment) = payload.comment.as_ref() else {
        bail!("comment event carried no comment record");
    };
    if comment.user.is_machine() {
        info!(author = %comment.user.login, "ignoring machine-authored comment");
        return Ok(());
    }

    let body = comment.body.as_deref().unwrap_or_default();
    let mention = runtime.bot_mention();
    if !body.contains(&mention) {
        return Ok(());
    }

    let (repo, number) = runtime.comment_target(payload)?;
    info!(
        repo = %repo.as_slug(),
        number,
        author = %comment.user.login,
        "bot mentioned in comment"
    );

    let command = parse_triage_command(body).unwrap_or_else(|| TriageCommand::Unknown {
        raw: body.trim().to_string(),
    });

    if let Err(dispatch_error) =
        dispatch_command(runtime, &repo, number, &comment.user.login, command).await
    {
        error!(
            repo = %repo.as_slug(),
            number,
            error = %dispatch_error,
            "comment command dispatch failed"
        );
        let error_body = render_dispatch_error_comment(&dispatch_error.to_string());
        if let Err(post_error) = runtime
            .github
            .create_issue_comment(&repo, number, &error_body)
            .await
        {
            warn!(number, error = %post_error, "failed to post dispatch error comment");
        }
    }
    Ok(())
}

async fn dispatch_command(
    runtime: &GithubTriageRuntime,
    repo: &RepoRef,
    number: u64,
    author: &str,
    command: TriageCommand,
) -> Result<()> {
    match command {
        TriageCommand::Check { branch, command } => {
            execute_check_command(runtime, repo, number, author, &branch, &command).await
        }
        TriageCommand::Help => {
            let body = render_help_comment(&runtime.bot_mention());
            runtime
                .github
                .create_issue_comment(repo, number, &body)
                .await
                .context("failed to post help comment")?;
            info!(number, "posted help comment");
            Ok(())
        }
        TriageCommand::Unknown { raw } => {
            info!(number, raw = %truncate_for_error(&raw, 120), "unrecognized command");
            let body = render_unknown_command_comment(&runtime.bot_mention());
            runtime
                .github
                .create_issue_comment(repo, number, &body)
                .await
                .context("failed to post unknown-command comment")?;
            Ok(())
        }
    }
}

/// Check flow: one visible status comment whose identity is fixed at
/// creation; only its body transitions to a terminal state.
async fn execute_check_command(
    runtime: &GithubTriageRuntime,
    repo: &RepoRef,
    number: u64,
    author: &str,
    branch: &str,
    command: &str,
) -> Result<()> {
    info!(number, branch, command, "executing check command");

    let working_body = render_check_working_comment(
        branch,
        command,
        author,
        &format_unix_ms_utc(current_unix_timestamp_ms()),
    );
    let working_comment = runtime
        .github
        .create_issue_comment(repo, number, &working_body)
        .await
        .context("failed to post check progress comment")?;

    let started = Instant::now();
    let timeout = Duration::from_millis(runtime.config.check_timeout_ms.max(1));
    let outcome = tokio::time::timeout(timeout, run_check(runtime.config.check_delay_ms)).await;
    let duration_ms = started.elapsed().as_millis() as u64;

    let terminal_body = match outcome {
        Ok(Ok(())) => {
            info!(number, branch, duration_ms, "check run succeeded");
            render_check_success_comment(branch, command, &repo.as_slug(), duration_ms)
        }
        Ok(Err(run_error)) => {
            warn!(number, branch, error = %run_error, "check run failed");
            render_check_failure_comment(branch, command, &run_error.to_string())
        }
        Err(_elapsed) => {
            warn!(number, branch, timeout_ms = runtime.config.check_timeout_ms, "check run timed out");
            render_check_timeout_comment(branch, command, runtime.config.check_timeout_ms)
        }
    };

    finalize_check_comment(runtime, repo, number, working_comment.id, &terminal_body).await;
    Ok(())
}

/// Simulated check execution. The bot never runs commands itself; a real
/// deployment would delegate to CI here and await its terminal state.
async fn run_check(delay_ms: u64) -> Result<()> {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    Ok(())
}

/// Edits the progress comment in place; when the edit fails, falls back to
/// a fresh comment so the terminal state stays visible.
async fn finalize_check_comment(
    runtime: &GithubTriageRuntime,
    repo: &RepoRef,
    number: u64,
    working_comment_id: u64,
    body: &str,
) {
    match runtime
        .github
        .update_issue_comment(repo, working_comment_id, body)
        .await
    {
        Ok(_) => {}
        Err(update_error) => {
            warn!(
                number,
                comment_id = working_comment_id,
                error = %update_error,
                "failed to update check progress comment"
            );
            let fallback_body = format!(
                "{body}\n\n_(warning: failed to update progress comment: {})_",
                truncate_for_error(&update_error.to_string(), 200)
            );
            if let Err(create_error) = runtime
                .github
                .create_issue_comment(repo, number, &fallback_body)
                .await
            {
                warn!(number, error = %create_error, "failed to post fallback check comment");
            }
        }
    }
}
