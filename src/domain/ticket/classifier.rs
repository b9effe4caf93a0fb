//! Deterministic ticket categorization
//!
//! Weighted keyword-pattern matching over subject + description. Each
//! category owns a fixed pattern list and a weight; the score for a category
//! is the fraction of its patterns that match, scaled by the weight. Ties
//! break toward the category declared earlier in the table.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::decision::{ClassificationResult, ModelUsed, TicketCategory};
use crate::domain::ticket::TicketRecord;

struct CategoryRule {
    category: TicketCategory,
    patterns: &'static [&'static str],
    weight: f64,

    /// Categories that demand urgent handling regardless of confidence
    priority_boost: bool,
}

/// Declaration order doubles as tie-break precedence:
/// security > outage > billing > howto.
const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: TicketCategory::Security,
        patterns: &[
            r"(?i)\b(hack|breach|unauthorized|suspicious|security)\b",
            r"(?i)\b(attack|compromise|intrusion|malware|virus)\b",
            r"(?i)\b(phishing|scam|fraud|identity)\b",
            r"(?i)\bunauthorized\s+access\b",
            r"(?i)\bsecurity\s+(concern|issue|problem|alert)\b",
        ],
        weight: 1.0,
        priority_boost: true,
    },
    CategoryRule {
        category: TicketCategory::Outage,
        patterns: &[
            r"(?i)\b(down|outage|unavailable|not\s+working)\b",
            r"(?i)\b(error|crash|fail|broken)\b",
            r"(?i)\b(urgent|emergency|critical|production)\b",
            r"(?i)\bsystem\s+(down|not\s+responding)\b",
            r"(?i)\bcan'?t\s+(access|connect|reach|load)\b",
        ],
        weight: 0.95,
        priority_boost: true,
    },
    CategoryRule {
        category: TicketCategory::Billing,
        patterns: &[
            r"(?i)\b(invoice|bill|charge|payment)\b",
            r"(?i)\b(price|cost|fee|discount)\b",
            r"(?i)\b(refund|credit|overcharge)\b",
            r"(?i)\b(subscription|renewal|cancel)\b",
            r"(?i)\bdiscrepancy\b",
        ],
        weight: 0.85,
        priority_boost: false,
    },
    CategoryRule {
        category: TicketCategory::Howto,
        patterns: &[
            r"(?i)\b(how\s+(do|can|to)|what\s+is)\b",
            r"(?i)\b(help|guide|tutorial|instructions)\b",
            r"(?i)\b(setup|configure|enable|disable)\b",
            r"(?i)\b(password|login|account|profile)\b",
            r"(?i)\bstep\s*-?\s*by\s*-?\s*step\b",
        ],
        weight: 0.7,
        priority_boost: false,
    },
];

/// Compiled pattern tables, one entry per category rule
static COMPILED_RULES: Lazy<Vec<Vec<Regex>>> = Lazy::new(|| {
    CATEGORY_RULES
        .iter()
        .map(|rule| {
            rule.patterns
                .iter()
                .map(|p| Regex::new(p).expect("invalid category pattern"))
                .collect()
        })
        .collect()
});

/// Deterministic, total ticket classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketClassifier;

impl TicketClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a ticket from its subject and description.
    ///
    /// Empty content short-circuits to the explicit unclassifiable result
    /// (category `other`, confidence 0.0) rather than guessing.
    pub fn classify(&self, ticket: &TicketRecord) -> ClassificationResult {
        if !ticket.has_content() {
            return ClassificationResult::no_content();
        }

        self.classify_text(&ticket.content())
    }

    /// Classify raw text (already-joined subject + description)
    pub fn classify_text(&self, text: &str) -> ClassificationResult {
        if text.trim().is_empty() {
            return ClassificationResult::no_content();
        }

        let mut winner: Option<(usize, f64, usize)> = None;

        for (index, rule) in CATEGORY_RULES.iter().enumerate() {
            let matched = COMPILED_RULES[index]
                .iter()
                .filter(|pattern| pattern.is_match(text))
                .count();

            if matched == 0 {
                continue;
            }

            let raw_score = (matched as f64 / rule.patterns.len() as f64) * rule.weight;

            // Strictly-greater keeps the earlier category on ties
            match winner {
                Some((_, best, _)) if raw_score <= best => {}
                _ => winner = Some((index, raw_score, matched)),
            }
        }

        match winner {
            Some((index, raw_score, matched)) => {
                let rule = &CATEGORY_RULES[index];
                ClassificationResult::new(
                    rule.category,
                    raw_score,
                    rule.priority_boost,
                    format!(
                        "Matched {}/{} {} patterns (weight {:.2})",
                        matched,
                        rule.patterns.len(),
                        rule.category,
                        rule.weight
                    ),
                    ModelUsed::RuleBased,
                )
                .with_matched_patterns(matched)
            }
            None => ClassificationResult::new(
                TicketCategory::Other,
                0.5,
                false,
                "No category pattern matched",
                ModelUsed::RuleBased,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(subject: &str, description: &str) -> ClassificationResult {
        TicketClassifier::new().classify(&TicketRecord::new("500-1", subject, description))
    }

    #[test]
    fn test_outage_classification_with_escalation() {
        let result = classify("URGENT: system down", "We can't access production since 9am");

        assert_eq!(result.category, TicketCategory::Outage);
        assert!(result.requires_escalation);
        assert!(result.confidence > 0.0);
        assert_eq!(result.model_used, ModelUsed::RuleBased);
    }

    #[test]
    fn test_security_classification() {
        let result = classify(
            "Suspicious login attempts",
            "We detected unauthorized access and a possible breach of our account",
        );

        assert_eq!(result.category, TicketCategory::Security);
        assert!(result.requires_escalation);
    }

    #[test]
    fn test_billing_does_not_escalate() {
        let result = classify(
            "Invoice discrepancy",
            "The charge on our last invoice does not match the quoted price",
        );

        assert_eq!(result.category, TicketCategory::Billing);
        assert!(!result.requires_escalation);
    }

    #[test]
    fn test_howto_classification() {
        let result = classify(
            "How do I configure SSO?",
            "Looking for a step-by-step guide to setup single sign-on",
        );

        assert_eq!(result.category, TicketCategory::Howto);
        assert!(!result.requires_escalation);
    }

    #[test]
    fn test_no_match_falls_back_to_other() {
        let result = classify("Greetings", "Just wanted to say the weather is nice");

        assert_eq!(result.category, TicketCategory::Other);
        assert_eq!(result.confidence, 0.5);
        assert!(!result.requires_escalation);
    }

    #[test]
    fn test_empty_content_short_circuits() {
        let result = classify("", "");

        assert_eq!(result.category, TicketCategory::Other);
        assert_eq!(result.confidence, 0.0);
        assert!(!result.requires_escalation);
        assert!(result.reasoning.to_lowercase().contains("no subject or description"));
    }

    #[test]
    fn test_tie_breaks_toward_earlier_category() {
        // "security" (1 of 5 security patterns) vs "password" (1 of 5 howto
        // patterns): security's higher weight wins outright, but an equal
        // raw score must also resolve to the earlier declaration.
        let result = classify("security", "password");
        assert_eq!(result.category, TicketCategory::Security);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let ticket = TicketRecord::new("500-9", "System outage", "Production is down again");
        let classifier = TicketClassifier::new();

        assert_eq!(classifier.classify(&ticket), classifier.classify(&ticket));
    }

    #[test]
    fn test_category_always_in_declared_set() {
        for text in ["invoice", "down", "hack", "how do I", "zzz", ""] {
            let result = TicketClassifier::new().classify_text(text);
            assert!(matches!(
                result.category,
                TicketCategory::Security
                    | TicketCategory::Outage
                    | TicketCategory::Billing
                    | TicketCategory::Howto
                    | TicketCategory::Other
            ));
        }
    }
}
