//! Deterministic lead qualification scoring
//!
//! Pure rule-based scoring: a bucketed weighted sum over title seniority,
//! company size, industry fit and buying signals, plus an enrichment bonus
//! from ERP context. No smart calls anywhere in this path.

use super::{EnrichedContext, LeadRecord};
use crate::domain::decision::{round2, ModelUsed, ScoreResult};

/// Seniority keyword table; the highest-scoring matching keyword wins.
/// Matching is case-insensitive substring containment.
const TITLE_KEYWORDS: &[(&str, f64)] = &[
    ("chief", 0.30),
    ("ceo", 0.30),
    ("cto", 0.30),
    ("cfo", 0.30),
    ("cio", 0.30),
    ("coo", 0.30),
    ("president", 0.30),
    ("vice president", 0.25),
    ("vp", 0.25),
    ("director", 0.18),
    ("head of", 0.18),
    ("manager", 0.12),
    ("owner", 0.10),
    ("founder", 0.10),
    ("senior", 0.08),
    ("lead", 0.08),
    ("principal", 0.08),
    ("engineer", 0.03),
    ("analyst", 0.03),
    ("developer", 0.03),
    ("specialist", 0.03),
    ("coordinator", 0.03),
];

/// Default title component when no keyword matches or no title is present
const TITLE_UNKNOWN: f64 = 0.05;

/// Company size tiers: (min employees, min annual revenue, component value).
/// The larger of the employee bucket and the revenue bucket applies.
const SIZE_TIERS: &[(u32, f64, f64)] = &[
    (10_000, 500_000_000.0, 0.25),
    (5_000, 250_000_000.0, 0.22),
    (1_000, 100_000_000.0, 0.18),
    (500, 50_000_000.0, 0.15),
    (100, 10_000_000.0, 0.11),
    (50, 5_000_000.0, 0.07),
    (10, 500_000.0, 0.04),
];

/// Smallest company size component (below every tier)
const SIZE_FLOOR: f64 = 0.01;

/// Industry fit table
const INDUSTRY_FIT: &[(&str, f64)] = &[
    ("technology", 0.15),
    ("financial services", 0.15),
    ("healthcare", 0.15),
    ("manufacturing", 0.12),
    ("telecommunications", 0.12),
    ("energy", 0.10),
    ("logistics", 0.08),
    ("retail", 0.03),
];

const INDUSTRY_UNKNOWN: f64 = 0.05;

/// Buying-signal keywords scanned in the free-text description,
/// each worth +0.02 and applied at most once
const SIGNAL_KEYWORDS: &[&str] = &["budget", "timeline", "project", "approved"];

/// Cap on the buying-signals bucket
const SIGNALS_MAX: f64 = 0.20;

/// Cap on the enrichment bonus bucket
const ENRICHMENT_MAX: f64 = 0.10;

/// Component-by-component breakdown of a deterministic score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub title: f64,
    pub company_size: f64,
    pub industry: f64,
    pub buying_signals: f64,
    pub enrichment: f64,
    pub total: f64,
}

impl ScoreBreakdown {
    /// Auditable enumeration of every component value
    pub fn reasoning(&self) -> String {
        format!(
            "Rule-based score: title={:.2}, company_size={:.2}, industry={:.2}, \
             buying_signals={:.2}, enrichment={:.2}, total={:.2}",
            self.title,
            self.company_size,
            self.industry,
            self.buying_signals,
            self.enrichment,
            self.total
        )
    }
}

/// Deterministic, total lead scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadScorer;

impl LeadScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a lead against its enrichment context.
    ///
    /// Total for every input; the result is clamped to [0, 1], rounded to
    /// two decimals, and tagged `rule-based` with confidence 1.0.
    pub fn score(&self, lead: &LeadRecord, enriched: &EnrichedContext) -> ScoreResult {
        let breakdown = self.breakdown(lead, enriched);
        ScoreResult::new(breakdown.total, 1.0, breakdown.reasoning(), ModelUsed::RuleBased)
    }

    /// Compute the full component breakdown
    pub fn breakdown(&self, lead: &LeadRecord, enriched: &EnrichedContext) -> ScoreBreakdown {
        let title = title_component(lead.title.as_deref());
        let company_size = size_component(lead.employee_count, lead.annual_revenue);
        let industry = industry_component(lead.industry.as_deref());
        let buying_signals = signals_component(
            lead.rating.as_deref(),
            lead.source.as_deref(),
            lead.description.as_deref(),
        );
        let enrichment = enrichment_component(enriched);

        let total = round2(
            (title + company_size + industry + buying_signals + enrichment).min(1.0),
        );

        ScoreBreakdown {
            title,
            company_size,
            industry,
            buying_signals,
            enrichment,
            total,
        }
    }
}

fn title_component(title: Option<&str>) -> f64 {
    let Some(title) = title else {
        return TITLE_UNKNOWN;
    };

    let title = title.to_lowercase();
    TITLE_KEYWORDS
        .iter()
        .filter(|(keyword, _)| title.contains(keyword))
        .map(|(_, value)| *value)
        .reduce(f64::max)
        .unwrap_or(TITLE_UNKNOWN)
}

fn size_component(employees: Option<u32>, revenue: Option<f64>) -> f64 {
    let employees = employees.unwrap_or(0);
    let revenue = revenue.unwrap_or(0.0);

    let by_employees = SIZE_TIERS
        .iter()
        .find(|(min_emp, _, _)| employees >= *min_emp)
        .map(|(_, _, value)| *value)
        .unwrap_or(SIZE_FLOOR);

    let by_revenue = SIZE_TIERS
        .iter()
        .find(|(_, min_rev, _)| revenue >= *min_rev)
        .map(|(_, _, value)| *value)
        .unwrap_or(SIZE_FLOOR);

    by_employees.max(by_revenue)
}

fn industry_component(industry: Option<&str>) -> f64 {
    let Some(industry) = industry else {
        return INDUSTRY_UNKNOWN;
    };

    let industry = industry.trim().to_lowercase();
    INDUSTRY_FIT
        .iter()
        .find(|(name, _)| *name == industry)
        .map(|(_, value)| *value)
        .unwrap_or(INDUSTRY_UNKNOWN)
}

fn signals_component(
    rating: Option<&str>,
    source: Option<&str>,
    description: Option<&str>,
) -> f64 {
    let rating_value = match rating.map(|r| r.trim().to_lowercase()) {
        Some(r) if r == "hot" => 0.10,
        Some(r) if r == "warm" => 0.06,
        Some(r) if r == "cold" => 0.02,
        _ => 0.0,
    };

    let source_value = match source.map(|s| s.trim().to_lowercase()) {
        Some(s) if s == "partner referral" => 0.08,
        Some(s) if s == "event" => 0.06,
        Some(s) if s == "web" => 0.04,
        Some(s) if s == "cold call" => 0.02,
        _ => 0.0,
    };

    let description = description.map(|d| d.to_lowercase()).unwrap_or_default();
    let keyword_value = SIGNAL_KEYWORDS
        .iter()
        .filter(|keyword| description.contains(*keyword))
        .count() as f64
        * 0.02;

    (rating_value + source_value + keyword_value).min(SIGNALS_MAX)
}

fn enrichment_component(enriched: &EnrichedContext) -> f64 {
    let mut bonus: f64 = 0.0;

    if enriched.has_order_history() {
        bonus += 0.08;
    }

    match enriched.credit_rating.as_deref().map(str::trim) {
        Some("A") | Some("A+") => bonus += 0.05,
        Some("B") => bonus += 0.03,
        _ => {}
    }

    if enriched.recent_order {
        bonus += 0.02;
    }

    if enriched.total_order_value >= 1_000_000.0 {
        bonus += 0.02;
    }

    bonus.min(ENRICHMENT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::erp::{PartnerRecord, SalesOrder};
    use chrono::{Duration, Utc};

    fn enterprise_lead() -> LeadRecord {
        LeadRecord::new("L-1", "Jordan Kim", "Globex")
            .with_title("CTO")
            .with_employee_count(12_000)
            .with_annual_revenue(600_000_000.0)
            .with_industry("Technology")
            .with_rating("Hot")
            .with_source("Partner Referral")
    }

    fn rich_context() -> EnrichedContext {
        let as_of = Utc::now();
        let partner = PartnerRecord::new("BP-7", "Globex").with_credit_rating("A+");
        let orders = vec![
            SalesOrder::new("SO-1", "BP-7", 800_000.0, as_of - Duration::days(20)),
            SalesOrder::new("SO-2", "BP-7", 600_000.0, as_of - Duration::days(200)),
        ];
        EnrichedContext::from_partner(&partner, &orders, as_of)
    }

    #[test]
    fn test_title_component_highest_match_wins() {
        assert_eq!(title_component(Some("CTO")), 0.30);
        assert_eq!(title_component(Some("Senior Vice President")), 0.25);
        assert_eq!(title_component(Some("Director of Engineering")), 0.18);
        assert_eq!(title_component(Some("IT Manager")), 0.12);
        assert_eq!(title_component(Some("Owner")), 0.10);
        assert_eq!(title_component(Some("Senior Analyst")), 0.08);
        assert_eq!(title_component(Some("Data Analyst")), 0.03);
        assert_eq!(title_component(Some("Astronaut")), 0.05);
        assert_eq!(title_component(None), 0.05);
    }

    #[test]
    fn test_size_component_takes_larger_bucket() {
        // Big revenue, tiny headcount: revenue bucket wins
        assert_eq!(size_component(Some(5), Some(600_000_000.0)), 0.25);
        // Big headcount, no revenue data: employee bucket wins
        assert_eq!(size_component(Some(11_000), None), 0.25);
        assert_eq!(size_component(Some(120), Some(2_000_000.0)), 0.11);
        assert_eq!(size_component(Some(5), Some(50_000.0)), 0.01);
        assert_eq!(size_component(None, None), 0.01);
    }

    #[test]
    fn test_industry_component_table() {
        assert_eq!(industry_component(Some("Technology")), 0.15);
        assert_eq!(industry_component(Some("Financial Services")), 0.15);
        assert_eq!(industry_component(Some("Manufacturing")), 0.12);
        assert_eq!(industry_component(Some("Energy")), 0.10);
        assert_eq!(industry_component(Some("Logistics")), 0.08);
        assert_eq!(industry_component(Some("Retail")), 0.03);
        assert_eq!(industry_component(Some("Agriculture")), 0.05);
        assert_eq!(industry_component(None), 0.05);
    }

    #[test]
    fn test_signal_keywords_apply_once_each() {
        let description = "budget approved, budget confirmed, project timeline attached";
        let value = signals_component(None, None, Some(description));
        // budget + approved + project + timeline, once each
        assert!((value - 0.08).abs() < 1e-9);
    }

    #[test]
    fn test_signals_capped_at_bucket_maximum() {
        let value = signals_component(
            Some("Hot"),
            Some("Partner Referral"),
            Some("budget timeline project approved"),
        );
        assert_eq!(value, SIGNALS_MAX);
    }

    #[test]
    fn test_enrichment_bonus_capped() {
        let ctx = rich_context();
        assert_eq!(enrichment_component(&ctx), ENRICHMENT_MAX);
    }

    #[test]
    fn test_enrichment_bonus_credit_tiers() {
        let mut ctx = EnrichedContext::empty();
        ctx.credit_rating = Some("B".to_string());
        assert!((enrichment_component(&ctx) - 0.03).abs() < 1e-9);

        ctx.credit_rating = Some("C".to_string());
        assert_eq!(enrichment_component(&ctx), 0.0);
    }

    #[test]
    fn test_high_value_lead_scores_above_ae_threshold() {
        let result = LeadScorer::new().score(&enterprise_lead(), &rich_context());
        assert!(result.score >= 0.75, "expected AE-band score, got {}", result.score);
        assert_eq!(result.model_used, ModelUsed::RuleBased);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_low_value_lead_scores_below_sdr_threshold() {
        let lead = LeadRecord::new("L-2", "Sam Low", "Corner Shop")
            .with_title("Analyst")
            .with_employee_count(5)
            .with_annual_revenue(50_000.0)
            .with_industry("Retail")
            .with_rating("Cold")
            .with_source("Cold Call");

        let result = LeadScorer::new().score(&lead, &EnrichedContext::empty());
        assert!(result.score < 0.45, "expected nurture-band score, got {}", result.score);
    }

    #[test]
    fn test_score_always_within_unit_interval() {
        let scorer = LeadScorer::new();
        let empty = LeadRecord::new("L-3", "", "");
        let result = scorer.score(&empty, &EnrichedContext::empty());
        assert!(result.score >= 0.0 && result.score <= 1.0);

        let result = scorer.score(&enterprise_lead(), &rich_context());
        assert!(result.score >= 0.0 && result.score <= 1.0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let scorer = LeadScorer::new();
        let lead = enterprise_lead();
        let ctx = rich_context();

        let first = scorer.score(&lead, &ctx);
        let second = scorer.score(&lead, &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reasoning_enumerates_components() {
        let breakdown = LeadScorer::new().breakdown(&enterprise_lead(), &rich_context());
        let reasoning = breakdown.reasoning();

        assert!(reasoning.contains("title=0.30"));
        assert!(reasoning.contains("company_size=0.25"));
        assert!(reasoning.contains("industry=0.15"));
        assert!(reasoning.contains("enrichment=0.10"));
        assert!(reasoning.contains(&format!("total={:.2}", breakdown.total)));
    }
}
