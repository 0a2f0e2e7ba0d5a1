use crate::label_helpers::normalize_labels;
use crate::webhook_payload::{LabelValue, WebhookPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Enumerates supported `PriorityTag` values.
pub enum PriorityTag {
    P0,
    P1,
    P2,
    P3,
}

impl PriorityTag {
    /// Parses a label name into a priority tag, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "p0" => Some(Self::P0),
            "p1" => Some(Self::P1),
            "p2" => Some(Self::P2),
            "p3" => Some(Self::P3),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P0 => "p0",
            Self::P1 => "p1",
            Self::P2 => "p2",
            Self::P3 => "p3",
        }
    }
}

/// Derives the priority tag for an event payload.
///
/// The just-applied label wins when it is itself a priority label; otherwise
/// the issue/PR label set is scanned in the order the platform delivered it
/// and the first matching entry wins.
pub fn pick_priority(payload: &WebhookPayload) -> Option<PriorityTag> {
    if let Some(tag) = payload
        .label
        .as_ref()
        .and_then(LabelValue::name)
        .and_then(PriorityTag::parse)
    {
        return Some(tag);
    }

    let labels = payload.content().map(|content| content.labels.as_slice())?;
    normalize_labels(labels)
        .iter()
        .find_map(|name| PriorityTag::parse(name))
}
