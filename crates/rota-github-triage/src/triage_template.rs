use crate::label_helpers::has_label;
use crate::webhook_payload::LabelValue;

/// Label that gates triage template emission; matched exactly.
pub const TRIAGE_LABEL: &str = "Triage Needed";

/// Renders the fixed triage template addressed to `team_mention`.
pub fn render_triage_template(team_mention: &str) -> String {
    format!(
        "{team_mention}, please complete the attached triage:\n\n\
### Assessment:\n\
**Reproducible** - Yes / No  \n\
**Priority** - p0 / p1 / p2 / p3  \n\
**Impact** -  \n\
**Suspected Cause** -  \n\n\
### Plan for Resolution:\n\
- [ ] **Step 1** -  \n\
- [ ] **Step 2** -  \n\n\
### Other:\n\
- **Affected files / modules** -  \n\
- **Other relevant issues/PRs** -"
    )
}

/// Emits the triage template when the label set carries the exact triage
/// label, independent of any other labels present.
pub fn maybe_triage_template(labels: &[LabelValue], team_mention: &str) -> Option<String> {
    has_label(labels, TRIAGE_LABEL).then(|| render_triage_template(team_mention))
}

#[cfg(test)]
mod tests {
    use super::{maybe_triage_template, render_triage_template, TRIAGE_LABEL};
    use crate::webhook_payload::LabelValue;

    #[test]
    fn unit_template_is_addressed_to_the_team_mention() {
        let body = render_triage_template("@acme/devs");
        assert!(body.starts_with("@acme/devs, please complete the attached triage:"));
        assert!(body.contains("### Assessment:"));
        assert!(body.contains("### Plan for Resolution:"));
    }

    #[test]
    fn functional_template_emitted_iff_exact_label_present() {
        let labels = vec![
            LabelValue::Name("bug".to_string()),
            LabelValue::Record {
                name: Some(TRIAGE_LABEL.to_string()),
            },
            LabelValue::Name("p1".to_string()),
        ];
        assert!(maybe_triage_template(&labels, "@acme/devs").is_some());

        let without = vec![
            LabelValue::Name("bug".to_string()),
            LabelValue::Name("p1".to_string()),
        ];
        assert!(maybe_triage_template(&without, "@acme/devs").is_none());
    }

    #[test]
    fn regression_label_gate_is_case_sensitive_and_exact() {
        let lowercase = vec![LabelValue::Name("triage needed".to_string())];
        assert!(maybe_triage_template(&lowercase, "@acme/devs").is_none());
        let padded = vec![LabelValue::Name("Triage Needed Now".to_string())];
        assert!(maybe_triage_template(&padded, "@acme/devs").is_none());
    }

    #[test]
    fn regression_emission_independent_of_priority_labels() {
        let only_triage = vec![LabelValue::Name(TRIAGE_LABEL.to_string())];
        assert!(maybe_triage_template(&only_triage, "@acme/devs").is_some());
    }
}
