use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};

use rota_github_triage::triage_render::truncate_for_error;

const ADD_ITEM_MUTATION: &str = "\
mutation($projectId: ID!, $contentId: ID!) {
  addProjectV2ItemById(input: { projectId: $projectId, contentId: $contentId }) {
    item { id }
  }
}";

const ITEM_MEMBERSHIPS_QUERY: &str = "\
query($contentId: ID!, $first: Int!) {
  node(id: $contentId) {
    ... on Issue {
      projectItems(first: $first, includeArchived: false) {
        nodes { id project { id } }
      }
    }
    ... on PullRequest {
      projectItems(first: $first, includeArchived: false) {
        nodes { id project { id } }
      }
    }
  }
}";

const UPDATE_FIELD_MUTATION: &str = "\
mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $optionId: String!) {
  updateProjectV2ItemFieldValue(input: {
    projectId: $projectId,
    itemId: $itemId,
    fieldId: $fieldId,
    value: { singleSelectOptionId: $optionId }
  }) { clientMutationId }
}";

/// GraphQL client for the project board. Single attempt per call; a
/// response carrying an `errors` array counts as a failed call.
#[derive(Clone)]
pub(super) struct BoardApiClient {
    http: reqwest::Client,
    graphql_url: String,
}

impl BoardApiClient {
    pub(super) fn new(graphql_url: String, token: String, request_timeout_ms: u64) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("rota-github-triage-bot"),
        );
        let auth_header = format!("Bearer {}", token.trim());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_header)
                .context("invalid board authorization header")?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create board api client")?;
        Ok(Self {
            http: client,
            graphql_url,
        })
    }

    /// Registers the content on the board; `None` when the board answered
    /// without an item id (typically: already registered).
    pub(super) async fn add_item(
        &self,
        board_id: &str,
        content_ref: &str,
    ) -> Result<Option<String>> {
        let data = self
            .graphql(
                "add board item",
                ADD_ITEM_MUTATION,
                json!({ "projectId": board_id, "contentId": content_ref }),
            )
            .await?;
        Ok(data
            .pointer("/addProjectV2ItemById/item/id")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// Looks up the content's existing board memberships (one bounded page)
    /// and returns the item belonging to `board_id`.
    pub(super) async fn find_item(
        &self,
        board_id: &str,
        content_ref: &str,
        page_size: u32,
    ) -> Result<Option<String>> {
        let data = self
            .graphql(
                "find board item",
                ITEM_MEMBERSHIPS_QUERY,
                json!({ "contentId": content_ref, "first": page_size }),
            )
            .await?;
        let nodes = data
            .pointer("/node/projectItems/nodes")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Ok(nodes.iter().find_map(|node| {
            let matches = node.pointer("/project/id").and_then(Value::as_str) == Some(board_id);
            if matches {
                node.get("id").and_then(Value::as_str).map(str::to_string)
            } else {
                None
            }
        }))
    }

    pub(super) async fn update_single_select_field(
        &self,
        board_id: &str,
        item_id: &str,
        field_id: &str,
        option_id: &str,
    ) -> Result<()> {
        self.graphql(
            "update single-select field",
            UPDATE_FIELD_MUTATION,
            json!({
                "projectId": board_id,
                "itemId": item_id,
                "fieldId": field_id,
                "optionId": option_id,
            }),
        )
        .await?;
        Ok(())
    }

    async fn graphql(&self, operation: &str, query: &str, variables: Value) -> Result<Value> {
        let payload = json!({ "query": query, "variables": variables });
        let response = self
            .http
            .post(&self.graphql_url)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("board api {operation} request failed"))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "board api {operation} failed with status {}: {}",
                status.as_u16(),
                truncate_for_error(&body, 800)
            );
        }
        let parsed: Value = response
            .json()
            .await
            .with_context(|| format!("failed to decode board {operation}"))?;
        if let Some(errors) = parsed.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                bail!(
                    "board api {operation} returned errors: {}",
                    truncate_for_error(&Value::Array(errors.clone()).to_string(), 800)
                );
            }
        }
        Ok(parsed.get("data").cloned().unwrap_or(Value::Null))
    }
}
