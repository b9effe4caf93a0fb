//! Decision result types shared by the deterministic and LLM-backed paths

use serde::{Deserialize, Serialize};

/// Provenance tag recording which decision path produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ModelUsed {
    /// Smart (LLM) call succeeded and its output was used verbatim
    Llm,

    /// Deterministic path ran directly (smart call disabled)
    #[default]
    RuleBased,

    /// Smart call failed; deterministic path supplied the result
    Fallback,
}

impl ModelUsed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Llm => "llm",
            Self::RuleBased => "rule-based",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for ModelUsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a lead qualification decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Qualification score, always clamped to [0, 1]
    pub score: f64,

    /// Decision confidence in [0, 1]; deterministic results carry 1.0
    pub confidence: f64,

    /// Component-by-component breakdown of how the score was reached
    pub reasoning: String,

    pub model_used: ModelUsed,
}

impl ScoreResult {
    /// Create a result, clamping the score to [0, 1] and rounding it to
    /// two decimal places.
    pub fn new(
        score: f64,
        confidence: f64,
        reasoning: impl Into<String>,
        model_used: ModelUsed,
    ) -> Self {
        Self {
            score: round2(score.clamp(0.0, 1.0)),
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: reasoning.into(),
            model_used,
        }
    }

    /// Re-tag the provenance without touching the decision itself
    pub fn tagged(mut self, model_used: ModelUsed) -> Self {
        self.model_used = model_used;
        self
    }
}

/// Ticket triage category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    Security,
    Outage,
    Billing,
    Howto,
    Other,
}

impl TicketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Outage => "outage",
            Self::Billing => "billing",
            Self::Howto => "howto",
            Self::Other => "other",
        }
    }

    /// Parse a category name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "security" => Some(Self::Security),
            "outage" => Some(Self::Outage),
            "billing" => Some(Self::Billing),
            "howto" | "how-to" => Some(Self::Howto),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a ticket triage classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: TicketCategory,

    /// Classification confidence in [0, 1]
    pub confidence: f64,

    /// Whether the winning category demands urgent, non-automated handling
    pub requires_escalation: bool,

    /// Number of patterns the winning category matched (0 for LLM results)
    pub matched_patterns: usize,

    pub reasoning: String,

    pub model_used: ModelUsed,
}

impl ClassificationResult {
    pub fn new(
        category: TicketCategory,
        confidence: f64,
        requires_escalation: bool,
        reasoning: impl Into<String>,
        model_used: ModelUsed,
    ) -> Self {
        Self {
            category,
            confidence: confidence.clamp(0.0, 1.0),
            requires_escalation,
            matched_patterns: 0,
            reasoning: reasoning.into(),
            model_used,
        }
    }

    pub fn with_matched_patterns(mut self, matched: usize) -> Self {
        self.matched_patterns = matched;
        self
    }

    pub fn tagged(mut self, model_used: ModelUsed) -> Self {
        self.model_used = model_used;
        self
    }

    /// The explicit unclassifiable outcome for tickets with no content
    pub fn no_content() -> Self {
        Self::new(
            TicketCategory::Other,
            0.0,
            false,
            "No subject or description provided; nothing to classify",
            ModelUsed::RuleBased,
        )
    }
}

/// Product category for the complaint classification variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Switches,
    Cables,
    Connectors,
    Software,
    Infrastructure,
    #[default]
    None,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Switches => "switches",
            Self::Cables => "cables",
            Self::Connectors => "connectors",
            Self::Software => "software",
            Self::Infrastructure => "infrastructure",
            Self::None => "none",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "switches" => Some(Self::Switches),
            "cables" => Some(Self::Cables),
            "connectors" => Some(Self::Connectors),
            "software" => Some(Self::Software),
            "infrastructure" => Some(Self::Infrastructure),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the product-vs-IT complaint classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintClassification {
    pub is_product_complaint: bool,
    pub is_it_support: bool,
    pub product_category: ProductCategory,

    /// Classification confidence in [0, 1]
    pub confidence: f64,

    pub reasoning: String,

    pub model_used: ModelUsed,
}

impl ComplaintClassification {
    pub fn new(
        is_product_complaint: bool,
        is_it_support: bool,
        product_category: ProductCategory,
        confidence: f64,
        reasoning: impl Into<String>,
        model_used: ModelUsed,
    ) -> Self {
        Self {
            is_product_complaint,
            is_it_support,
            product_category,
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: reasoning.into(),
            model_used,
        }
    }

    pub fn tagged(mut self, model_used: ModelUsed) -> Self {
        self.model_used = model_used;
        self
    }

    /// The explicit unclassifiable outcome for complaints with no content
    pub fn no_content() -> Self {
        Self::new(
            false,
            false,
            ProductCategory::None,
            0.0,
            "No subject or description provided; nothing to classify",
            ModelUsed::RuleBased,
        )
    }
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
