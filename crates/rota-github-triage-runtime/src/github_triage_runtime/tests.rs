//! Tests for triage runtime board sync, comment dispatch, and webhook routing.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use serde_json::json;
use tower::ServiceExt;

use rota_github_triage::priority::PriorityTag;
use rota_github_triage::webhook_payload::WebhookPayload;

use super::board_api_client::BoardApiClient;
use super::board_sync::{ensure_board_item, set_single_select_field};
use super::webhook_server::build_webhook_router;
use super::{
    BoardConfig, GithubTriageRuntime, GithubTriageRuntimeConfig, PriorityOptionMap, RepoRef,
    StatusOptionMap, STATUS_NOT_STARTED, STATUS_WONT_FIX,
};

fn test_board_config() -> BoardConfig {
    BoardConfig {
        board_id: Some("BOARD_1".to_string()),
        priority_field_id: Some("FIELD_PRIORITY".to_string()),
        status_field_id: Some("FIELD_STATUS".to_string()),
        priority_options: PriorityOptionMap {
            p0: Some("OPT_P0".to_string()),
            p1: Some("OPT_P1".to_string()),
            p2: Some("OPT_P2".to_string()),
            p3: Some("OPT_P3".to_string()),
        },
        status_options: StatusOptionMap {
            not_started: Some("OPT_NOT_STARTED".to_string()),
            in_progress: Some("OPT_IN_PROGRESS".to_string()),
            done: Some("OPT_DONE".to_string()),
            wont_fix: Some("OPT_WONT_FIX".to_string()),
        },
    }
}

fn test_runtime_config(base_url: &str) -> GithubTriageRuntimeConfig {
    GithubTriageRuntimeConfig {
        api_base: base_url.to_string(),
        graphql_url: format!("{base_url}/graphql"),
        token: "test-token".to_string(),
        bot_login: "rota-triage-bot".to_string(),
        team_mention: "@acme/devs".to_string(),
        board: test_board_config(),
        request_timeout_ms: 3_000,
        check_delay_ms: 1,
        check_timeout_ms: 5_000,
        membership_page_size: 50,
        bind: "127.0.0.1:0".to_string(),
    }
}

fn test_runtime(base_url: &str) -> GithubTriageRuntime {
    GithubTriageRuntime::new(test_runtime_config(base_url)).expect("runtime")
}

fn test_board_client(base_url: &str) -> BoardApiClient {
    BoardApiClient::new(format!("{base_url}/graphql"), "test-token".to_string(), 3_000)
        .expect("board client")
}

fn comment_payload(body: &str, author: &str, actor_type: &str) -> WebhookPayload {
    serde_json::from_value(json!({
        "action": "created",
        "issue": {"number": 7, "node_id": "NODE_7", "labels": []},
        "comment": {
            "id": 900,
            "body": body,
            "user": {"login": author, "type": actor_type}
        },
        "repository": {"full_name": "owner/repo"},
        "sender": {"login": author, "type": actor_type}
    }))
    .expect("payload")
}

fn issue_opened_payload(labels: serde_json::Value) -> WebhookPayload {
    serde_json::from_value(json!({
        "action": "opened",
        "issue": {
            "number": 42,
            "title": "Broken build",
            "node_id": "NODE_42",
            "labels": labels
        },
        "repository": {"full_name": "owner/repo"}
    }))
    .expect("payload")
}

fn pull_request_opened_payload(labels: serde_json::Value) -> WebhookPayload {
    serde_json::from_value(json!({
        "action": "opened",
        "pull_request": {
            "number": 77,
            "title": "Fix build",
            "node_id": "NODE_77",
            "labels": labels
        },
        "repository": {"full_name": "owner/repo"}
    }))
    .expect("payload")
}

fn issue_labeled_payload(label: &str, labels: serde_json::Value) -> WebhookPayload {
    serde_json::from_value(json!({
        "action": "labeled",
        "issue": {
            "number": 42,
            "title": "Broken build",
            "node_id": "NODE_42",
            "labels": labels
        },
        "label": {"name": label},
        "repository": {"full_name": "owner/repo"}
    }))
    .expect("payload")
}
