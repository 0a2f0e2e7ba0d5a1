use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
/// Public struct `WebhookPayload` used across Rota components.
pub struct WebhookPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub issue: Option<ContentRecord>,
    #[serde(default)]
    pub pull_request: Option<ContentRecord>,
    #[serde(default)]
    pub label: Option<LabelValue>,
    #[serde(default)]
    pub comment: Option<CommentRecord>,
    #[serde(default)]
    pub repository: Option<RepositoryRecord>,
    #[serde(default)]
    pub sender: Option<ActorRecord>,
}

impl WebhookPayload {
    /// Returns the issue or pull-request record carried by this payload.
    pub fn content(&self) -> Option<&ContentRecord> {
        self.issue.as_ref().or(self.pull_request.as_ref())
    }

    /// Returns the stable node id addressing the issue/PR on the board.
    pub fn content_node_id(&self) -> Option<&str> {
        self.content().and_then(|content| content.node_id.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
/// Public struct `ContentRecord` used across Rota components.
pub struct ContentRecord {
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub labels: Vec<LabelValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
/// Label entry as delivered by the platform, either a bare name or a record.
pub enum LabelValue {
    Name(String),
    Record {
        #[serde(default)]
        name: Option<String>,
    },
}

impl LabelValue {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Record { name } => name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
/// Public struct `CommentRecord` used across Rota components.
pub struct CommentRecord {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    pub user: ActorRecord,
}

#[derive(Debug, Clone, Deserialize)]
/// Public struct `ActorRecord` used across Rota components.
pub struct ActorRecord {
    pub login: String,
    #[serde(default, rename = "type")]
    pub actor_type: Option<String>,
}

impl ActorRecord {
    /// True when the platform attributes this actor to a machine account.
    pub fn is_machine(&self) -> bool {
        self.actor_type.as_deref() == Some("Bot")
    }
}

#[derive(Debug, Clone, Deserialize)]
/// Public struct `RepositoryRecord` used across Rota components.
pub struct RepositoryRecord {
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::{LabelValue, WebhookPayload};

    #[test]
    fn unit_content_prefers_issue_over_pull_request() {
        let payload: WebhookPayload = serde_json::from_value(serde_json::json!({
            "issue": {"number": 7, "node_id": "NODE_ISSUE"},
            "pull_request": {"number": 8, "node_id": "NODE_PR"}
        }))
        .expect("payload");
        assert_eq!(payload.content().map(|content| content.number), Some(7));
        assert_eq!(payload.content_node_id(), Some("NODE_ISSUE"));
    }

    #[test]
    fn functional_payload_accepts_bare_and_record_label_forms() {
        let payload: WebhookPayload = serde_json::from_value(serde_json::json!({
            "issue": {
                "number": 3,
                "labels": ["bug", {"name": "p1"}, {"name": null}]
            }
        }))
        .expect("payload");
        let labels = &payload.issue.as_ref().expect("issue").labels;
        assert_eq!(labels[0].name(), Some("bug"));
        assert_eq!(labels[1].name(), Some("p1"));
        assert_eq!(labels[2].name(), None);
    }

    #[test]
    fn integration_comment_payload_exposes_author_machine_flag() {
        let payload: WebhookPayload = serde_json::from_value(serde_json::json!({
            "action": "created",
            "issue": {"number": 12},
            "comment": {
                "id": 900,
                "body": "hello",
                "user": {"login": "rota-triage-bot", "type": "Bot"}
            }
        }))
        .expect("payload");
        let comment = payload.comment.as_ref().expect("comment");
        assert!(comment.user.is_machine());
        assert_eq!(comment.body.as_deref(), Some("hello"));
    }

    #[test]
    fn regression_payload_tolerates_missing_optional_fields() {
        let payload: WebhookPayload =
            serde_json::from_value(serde_json::json!({"action": "opened"})).expect("payload");
        assert!(payload.content().is_none());
        assert!(payload.content_node_id().is_none());
        assert!(payload.label.is_none());
    }

    #[test]
    fn regression_direct_label_field_accepts_record_form() {
        let payload: WebhookPayload = serde_json::from_value(serde_json::json!({
            "issue": {"number": 4},
            "label": {"name": "P2"}
        }))
        .expect("payload");
        assert_eq!(
            payload.label.as_ref().and_then(LabelValue::name),
            Some("P2")
        );
    }
}
