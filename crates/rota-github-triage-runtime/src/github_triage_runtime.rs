//! GitHub triage bot runtime: webhook event routing, board sync, and
//! comment-command dispatch.

use anyhow::{anyhow, bail, Result};
use tracing::{info, warn};

use rota_github_triage::priority::{pick_priority, PriorityTag};
use rota_github_triage::triage_template::{maybe_triage_template, TRIAGE_LABEL};
use rota_github_triage::webhook_payload::{LabelValue, WebhookPayload};

mod board_api_client;
mod board_config;
mod board_sync;
mod comment_dispatch;
mod github_api_client;
mod webhook_server;

#[cfg(test)]
mod tests;

use board_api_client::BoardApiClient;
use github_api_client::GithubApiClient;

pub use board_config::{
    BoardConfig, PriorityOptionMap, StatusOptionMap, STATUS_DONE, STATUS_IN_PROGRESS,
    STATUS_NOT_STARTED, STATUS_WONT_FIX,
};
pub use webhook_server::run_github_triage_server;

#[derive(Debug, Clone)]
/// Runtime configuration for the triage bot, assembled once at startup and
/// shared read-only across event handlers.
pub struct GithubTriageRuntimeConfig {
    pub api_base: String,
    pub graphql_url: String,
    pub token: String,
    pub bot_login: String,
    pub team_mention: String,
    pub board: BoardConfig,
    pub request_timeout_ms: u64,
    pub check_delay_ms: u64,
    pub check_timeout_ms: u64,
    pub membership_page_size: u32,
    pub bind: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let (owner, name) = trimmed
            .split_once('/')
            .ok_or_else(|| anyhow!("invalid repository slug '{raw}', expected owner/repo"))?;
        let owner = owner.trim();
        let name = name.trim();
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            bail!("invalid repository slug '{raw}', expected owner/repo");
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    fn as_slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Shared per-process runtime handed to every webhook delivery.
pub struct GithubTriageRuntime {
    config: GithubTriageRuntimeConfig,
    github: GithubApiClient,
    board: BoardApiClient,
}

impl GithubTriageRuntime {
    pub fn new(config: GithubTriageRuntimeConfig) -> Result<Self> {
        let github = GithubApiClient::new(
            config.api_base.clone(),
            config.token.clone(),
            config.request_timeout_ms,
        )?;
        let board = BoardApiClient::new(
            config.graphql_url.clone(),
            config.token.clone(),
            config.request_timeout_ms,
        )?;
        Ok(Self {
            config,
            github,
            board,
        })
    }

    fn bot_mention(&self) -> String {
        format!("@{}", self.config.bot_login)
    }

    /// Routes one webhook delivery to its handler. Handler failures are
    /// logged here and never propagate back to the delivery layer.
    pub async fn handle_event(&self, event: &str, payload: WebhookPayload) {
        let action = payload.action.clone().unwrap_or_default();
        let outcome = match (event, action.as_str()) {
            ("issues", "opened") | ("pull_request", "opened") => {
                self.handle_content_opened(&payload).await
            }
            ("issues", "labeled")
            | ("issues", "edited")
            | ("pull_request", "labeled")
            | ("pull_request", "edited") => self.handle_content_labeled(&payload).await,
            ("issue_comment", "created") => {
                comment_dispatch::handle_comment_created(self, &payload).await
            }
            _ => {
                info!(event, action = %action, "ignoring unsupported webhook event");
                Ok(())
            }
        };
        if let Err(error) = outcome {
            warn!(event, action = %action, error = %error, "webhook event handling failed");
        }
    }

    /// Issue/PR opened: register on the board, post the triage template for
    /// labeled issues, seed the status field, and apply a priority label.
    async fn handle_content_opened(&self, payload: &WebhookPayload) -> Result<()> {
        let Some(content) = payload.content() else {
            bail!("content event carried neither issue nor pull_request");
        };
        info!(
            number = content.number,
            title = content.title.as_deref().unwrap_or_default(),
            "content opened"
        );

        let item_id = match payload.content_node_id() {
            Some(content_ref) => self.ensure_item(content_ref).await,
            None => {
                warn!(number = content.number, "missing content node id, skipping board sync");
                None
            }
        };

        if payload.issue.is_some() {
            self.maybe_post_triage(payload, &content.labels).await;
        }

        if let Some(item_id) = item_id.as_deref() {
            self.set_status(item_id, STATUS_NOT_STARTED).await;
            if let Some(tag) = pick_priority(payload) {
                self.set_priority(item_id, tag).await;
            }
        }
        Ok(())
    }

    /// Issue/PR labeled or edited: re-evaluate the triage gate and the
    /// priority labels. Edits reuse this path so label changes re-sync.
    async fn handle_content_labeled(&self, payload: &WebhookPayload) -> Result<()> {
        let Some(content) = payload.content() else {
            bail!("content event carried neither issue nor pull_request");
        };
        info!(
            number = content.number,
            label = payload
                .label
                .as_ref()
                .and_then(LabelValue::name)
                .unwrap_or_default(),
            "content labeled"
        );

        if payload.issue.is_some()
            && payload.label.as_ref().and_then(LabelValue::name) == Some(TRIAGE_LABEL)
        {
            self.maybe_post_triage(payload, &content.labels).await;
        }

        let Some(content_ref) = payload.content_node_id() else {
            return Ok(());
        };
        if let Some(tag) = pick_priority(payload) {
            if let Some(item_id) = self.ensure_item(content_ref).await {
                self.set_priority(&item_id, tag).await;
            }
        }
        Ok(())
    }

    /// Posts the triage template when the gate label is present; posting
    /// failures are logged and swallowed.
    async fn maybe_post_triage(&self, payload: &WebhookPayload, labels: &[LabelValue]) {
        let Some(body) = maybe_triage_template(labels, &self.config.team_mention) else {
            return;
        };
        match self.comment_target(payload) {
            Ok((repo, number)) => {
                match self.github.create_issue_comment(&repo, number, &body).await {
                    Ok(_) => info!(number, "posted triage template"),
                    Err(error) => warn!(number, error = %error, "failed to post triage template"),
                }
            }
            Err(error) => warn!(error = %error, "cannot address triage template"),
        }
    }

    /// Idempotently registers the content on the configured board.
    async fn ensure_item(&self, content_ref: &str) -> Option<String> {
        let Some(board_id) = self.config.board.board_id.as_deref() else {
            warn!("board id not configured, skipping board sync");
            return None;
        };
        board_sync::ensure_board_item(
            &self.board,
            board_id,
            content_ref,
            self.config.membership_page_size,
        )
        .await
    }

    async fn set_priority(&self, item_id: &str, tag: PriorityTag) {
        let Some(board_id) = self.config.board.board_id.as_deref() else {
            return;
        };
        info!(priority = tag.as_str(), "applying board priority");
        board_sync::set_single_select_field(
            &self.board,
            board_id,
            Some(item_id),
            self.config.board.priority_field_id.as_deref(),
            self.config.board.priority_option_id(tag),
        )
        .await;
    }

    async fn set_status(&self, item_id: &str, status: &str) {
        let Some(board_id) = self.config.board.board_id.as_deref() else {
            return;
        };
        board_sync::set_single_select_field(
            &self.board,
            board_id,
            Some(item_id),
            self.config.board.status_field_id.as_deref(),
            self.config.board.status_option_id(status),
        )
        .await;
    }

    /// Resolves the repository and issue/PR number a reply comment targets.
    fn comment_target(&self, payload: &WebhookPayload) -> Result<(RepoRef, u64)> {
        let repository = payload
            .repository
            .as_ref()
            .ok_or_else(|| anyhow!("payload carried no repository reference"))?;
        let repo = RepoRef::parse(&repository.full_name)?;
        let number = payload
            .content()
            .map(|content| content.number)
            .ok_or_else(|| anyhow!("payload carried no issue or pull_request number"))?;
        Ok((repo, number))
    }
}
