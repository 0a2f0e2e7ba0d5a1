use crate::webhook_payload::LabelValue;

/// Normalizes platform label entries into plain names, dropping entries
/// that carry no name. All matching logic runs on the normalized form.
pub fn normalize_labels(labels: &[LabelValue]) -> Vec<String> {
    labels
        .iter()
        .filter_map(|label| label.name())
        .map(str::to_string)
        .collect()
}

/// True when the label set contains `name` exactly (case-sensitive).
pub fn has_label(labels: &[LabelValue], name: &str) -> bool {
    labels.iter().any(|label| label.name() == Some(name))
}

#[cfg(test)]
mod tests {
    use super::{has_label, normalize_labels};
    use crate::webhook_payload::LabelValue;

    fn mixed_labels() -> Vec<LabelValue> {
        vec![
            LabelValue::Name("bug".to_string()),
            LabelValue::Record {
                name: Some("Triage Needed".to_string()),
            },
            LabelValue::Record { name: None },
        ]
    }

    #[test]
    fn unit_normalize_labels_drops_nameless_entries() {
        let labels = normalize_labels(&mixed_labels());
        assert_eq!(labels, vec!["bug".to_string(), "Triage Needed".to_string()]);
    }

    #[test]
    fn functional_has_label_accepts_both_representations() {
        let labels = mixed_labels();
        assert!(has_label(&labels, "bug"));
        assert!(has_label(&labels, "Triage Needed"));
    }

    #[test]
    fn regression_has_label_is_case_sensitive() {
        let labels = mixed_labels();
        assert!(!has_label(&labels, "triage needed"));
        assert!(!has_label(&labels, "BUG"));
        assert!(!has_label(&labels, "missing"));
    }
}
