//! Rule pipeline and the `Remediator` entry point.
//!
//! Rules run as sequential passes: each rule sees the output of the one before
//! it, so text inserted by an earlier rule is visible to later rules.

use crate::model::{RemediationResult, SourceMetadata};
use crate::rule::RULES;
use crate::tag::{Clock, ProvenanceTag, SystemClock};

/// Substitutions performed by a single rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Rule number within the table
    pub rule: usize,
    /// Number of fragments the rule rewrote
    pub substitutions: usize,
}

/// Rewritten text plus a per-rule account of what changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    /// Text after every rule has run
    pub text: String,
    /// One entry per rule, in application order
    pub outcomes: Vec<RuleOutcome>,
}

impl Remediation {
    /// Total substitutions across all rules
    pub fn total_substitutions(&self) -> usize {
        self.outcomes.iter().map(|o| o.substitutions).sum()
    }
}

/// Run every rule over `text` in table order, tagging each rewrite with `tag`
pub fn apply_rules(text: &str, tag: &ProvenanceTag) -> Remediation {
    let mut current = text.to_string();
    let mut outcomes = Vec::with_capacity(RULES.len());

    for rule in RULES.iter() {
        let (next, substitutions) = rule.apply(&current, tag);
        current = next;
        outcomes.push(RuleOutcome {
            rule: rule.number,
            substitutions,
        });
    }

    Remediation {
        text: current,
        outcomes,
    }
}

/// Remediates code blocks, dating each provenance tag from its clock
pub struct Remediator {
    clock: Box<dyn Clock>,
}

impl Remediator {
    /// Create a remediator reading dates from `clock`
    pub fn new<C: Clock + 'static>(clock: C) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }

    /// Create a remediator that reads the local wall-clock date
    pub fn system() -> Self {
        Self::new(SystemClock)
    }

    /// Remediate `code`, echoing `metadata` into the result
    pub fn remediate(&self, metadata: SourceMetadata, code: String) -> RemediationResult {
        self.remediate_with_outcomes(metadata, code).0
    }

    /// Like [`Remediator::remediate`], also returning per-rule substitution counts
    pub fn remediate_with_outcomes(
        &self,
        metadata: SourceMetadata,
        code: String,
    ) -> (RemediationResult, Vec<RuleOutcome>) {
        // The date is read once so every rewrite in this call carries the same tag
        let tag = ProvenanceTag::from_clock(self.clock.as_ref());
        let remediation = apply_rules(&code, &tag);

        let result = RemediationResult {
            metadata,
            original_code: code,
            remediated_code: remediation.text,
        };
        (result, remediation.outcomes)
    }
}

impl Default for Remediator {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::FixedClock;
    use chrono::NaiveDate;

    const TAG: &str = "\"Added By Pwc 2024-03-15,";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn remediator() -> Remediator {
        Remediator::new(FixedClock::new(date()))
    }

    #[test]
    fn test_outcomes_cover_every_rule() {
        let remediation = apply_rules("vbuk-gbstk vbup vbup", &ProvenanceTag::for_date(date()));
        let counts: Vec<_> = remediation
            .outcomes
            .iter()
            .map(|o| (o.rule, o.substitutions))
            .collect();
        assert_eq!(counts, vec![(1, 1), (2, 0), (3, 0), (4, 0), (5, 2), (6, 0)]);
        assert_eq!(remediation.total_substitutions(), 3);
    }

    #[test]
    fn test_tag_repeated_per_substitution() {
        let remediation = apply_rules("vbuk vbuk vbuk", &ProvenanceTag::for_date(date()));
        assert_eq!(remediation.text.matches(TAG).count(), 3);
    }

    #[test]
    fn test_cascade_through_inserted_text() {
        // Rule 1 keeps the field name `vbup`; rule 5 then rewrites it
        let remediation = apply_rules("vbuk-vbup", &ProvenanceTag::for_date(date()));
        assert_eq!(remediation.text, format!("vbak-VBAP {TAG} {TAG}"));
    }

    #[test]
    fn test_compound_before_standalone() {
        let remediation = apply_rules("vbtyp-x vbtyp", &ProvenanceTag::for_date(date()));
        assert_eq!(remediation.text, format!("vbtypl-x {TAG} VBTYPL {TAG}"));
    }

    #[test]
    fn test_remediate_echoes_metadata() {
        let metadata = SourceMetadata::new("ZPROG", "ZPROG_TOP", "PROG").with_name("ZPROG");
        let result = remediator().remediate(metadata.clone(), "TABLES vbuk.".to_string());

        assert_eq!(result.metadata, metadata);
        assert_eq!(result.original_code, "TABLES vbuk.");
        assert_eq!(result.remediated_code, format!("TABLES VBAK {TAG}."));
    }

    #[test]
    fn test_remediate_with_outcomes() {
        let metadata = SourceMetadata::new("ZPROG", "ZPROG_TOP", "PROG");
        let (result, outcomes) =
            remediator().remediate_with_outcomes(metadata, "vbup~posnr".to_string());
        assert_eq!(result.remediated_code, format!("vbap~posnr {TAG}"));
        assert_eq!(outcomes.len(), RULES.len());
        assert_eq!(outcomes[1].substitutions, 1);
    }

    #[test]
    fn test_system_remediator_uses_today() {
        let today = chrono::Local::now().date_naive();
        let result = Remediator::default()
            .remediate(SourceMetadata::new("P", "I", "PROG"), "vbuk".to_string());
        // Tolerate a date rollover between the two reads
        let expected_today = format!("VBAK {}", ProvenanceTag::for_date(today));
        let expected_next = format!("VBAK {}", ProvenanceTag::for_date(today.succ_opt().unwrap()));
        assert!(
            result.remediated_code == expected_today || result.remediated_code == expected_next
        );
    }
}
