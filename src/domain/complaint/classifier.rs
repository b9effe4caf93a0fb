//! Deterministic complaint classification
//!
//! Distinguishes product complaints from internal IT-support requests by
//! keyword matching. The first product category with any keyword hit wins;
//! IT support only applies when no product keyword matched.

use crate::domain::decision::{ComplaintClassification, ModelUsed, ProductCategory};
use crate::domain::ticket::TicketRecord;

/// Product keyword table; declaration order is match precedence
const PRODUCT_KEYWORDS: &[(ProductCategory, &[&str])] = &[
    (
        ProductCategory::Switches,
        &["switch", "hirschmann", "ethernet switch", "industrial switch"],
    ),
    (
        ProductCategory::Cables,
        &["cable", "wire", "fiber", "cabling", "conductor"],
    ),
    (
        ProductCategory::Connectors,
        &["connector", "terminal", "plug", "socket", "patch"],
    ),
    (
        ProductCategory::Software,
        &["software", "firmware", "app", "application", "update"],
    ),
    (
        ProductCategory::Infrastructure,
        &["rack", "cabinet", "enclosure", "infrastructure"],
    ),
];

const IT_KEYWORDS: &[&str] = &[
    "password", "login", "portal", "access", "account", "vpn", "email", "computer",
];

/// Rule-based results carry a fixed mid confidence; keyword matching is
/// reliable but coarser than a full semantic read.
const RULE_CONFIDENCE: f64 = 0.6;

/// Deterministic, total complaint classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplaintClassifier;

impl ComplaintClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a complaint ticket.
    ///
    /// Empty content short-circuits to the explicit unclassifiable result.
    pub fn classify(&self, ticket: &TicketRecord) -> ComplaintClassification {
        if !ticket.has_content() {
            return ComplaintClassification::no_content();
        }

        let content = ticket.content().to_lowercase();

        let product_match = PRODUCT_KEYWORDS.iter().find_map(|(category, keywords)| {
            keywords
                .iter()
                .find(|kw| content.contains(*kw))
                .map(|kw| (*category, *kw))
        });

        if let Some((category, keyword)) = product_match {
            return ComplaintClassification::new(
                true,
                false,
                category,
                RULE_CONFIDENCE,
                format!("Matched product keyword '{keyword}' ({category})"),
                ModelUsed::RuleBased,
            );
        }

        let it_match = IT_KEYWORDS.iter().find(|kw| content.contains(*kw));
        if let Some(keyword) = it_match {
            return ComplaintClassification::new(
                false,
                true,
                ProductCategory::None,
                RULE_CONFIDENCE,
                format!("Matched IT-support keyword '{keyword}'"),
                ModelUsed::RuleBased,
            );
        }

        ComplaintClassification::new(
            false,
            false,
            ProductCategory::None,
            RULE_CONFIDENCE,
            "No product or IT-support keyword matched",
            ModelUsed::RuleBased,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(subject: &str, description: &str) -> ComplaintClassification {
        ComplaintClassifier::new().classify(&TicketRecord::new("500-1", subject, description))
    }

    #[test]
    fn test_product_complaint_by_category() {
        let result = classify("Broken switch", "The industrial switch stopped forwarding traffic");
        assert!(result.is_product_complaint);
        assert!(!result.is_it_support);
        assert_eq!(result.product_category, ProductCategory::Switches);
    }

    #[test]
    fn test_product_precedence_over_it_keywords() {
        // Mentions both a cable and the IT word "access"; product wins
        let result = classify("Faulty cable", "Cannot access the device through the patch cable");
        assert!(result.is_product_complaint);
        assert!(!result.is_it_support);
    }

    #[test]
    fn test_it_support_detection() {
        let result = classify("Locked out", "I forgot my password for the portal");
        assert!(!result.is_product_complaint);
        assert!(result.is_it_support);
        assert_eq!(result.product_category, ProductCategory::None);
    }

    #[test]
    fn test_neither_product_nor_it() {
        let result = classify("General feedback", "Your delivery was late last week");
        assert!(!result.is_product_complaint);
        assert!(!result.is_it_support);
    }

    #[test]
    fn test_empty_content_short_circuits() {
        let result = classify("", "  ");
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.product_category, ProductCategory::None);
        assert!(result.reasoning.contains("No subject or description"));
    }
}
