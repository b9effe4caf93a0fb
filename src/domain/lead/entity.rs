//! Lead domain entities

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::erp::{PartnerRecord, SalesOrder};

/// A prospective customer record to be qualified and routed.
///
/// Immutable once fetched within a pipeline run; scoring and routing read
/// from it but never write back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    /// CRM record identifier
    pub id: String,

    /// Contact name
    pub name: String,

    /// Company name (used for enrichment lookup)
    pub company: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Job title, matched against the seniority keyword table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    /// Lead source (e.g. "Partner Referral", "Web", "Cold Call")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Rating assigned by marketing (e.g. "Hot", "Warm", "Cold")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_revenue: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Free-text description, scanned for buying-signal keywords
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LeadRecord {
    /// Create a minimal lead record
    pub fn new(id: impl Into<String>, name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            company: company.into(),
            email: None,
            phone: None,
            title: None,
            industry: None,
            source: None,
            status: None,
            rating: None,
            annual_revenue: None,
            employee_count: None,
            website: None,
            description: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    pub fn with_annual_revenue(mut self, revenue: f64) -> Self {
        self.annual_revenue = Some(revenue);
        self
    }

    pub fn with_employee_count(mut self, count: u32) -> Self {
        self.employee_count = Some(count);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Supplementary account context pulled from the ERP system.
///
/// An empty context (no partner match) is a valid, non-error state; the
/// scorer simply awards no enrichment bonus. `recent_order` is resolved at
/// enrichment time so scoring stays a pure function of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_name: Option<String>,

    /// ERP credit rating (e.g. "A+", "A", "B")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_rating: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,

    pub total_orders: usize,

    /// Lifetime order value across the partner's history
    pub total_order_value: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_order_date: Option<DateTime<Utc>>,

    /// Whether an order landed within the last six months of enrichment
    pub recent_order: bool,
}

impl EnrichedContext {
    /// An empty context: no partner match was found
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the context from a partner record and its order history,
    /// evaluated as of the given instant.
    pub fn from_partner(partner: &PartnerRecord, orders: &[SalesOrder], as_of: DateTime<Utc>) -> Self {
        let last_order_date = orders.iter().map(|o| o.ordered_at).max();
        let recent_order = last_order_date
            .map(|d| as_of - d <= Duration::days(183))
            .unwrap_or(false);

        Self {
            partner_id: Some(partner.id.clone()),
            partner_name: Some(partner.name.clone()),
            credit_rating: partner.credit_rating.clone(),
            account_status: partner.account_status.clone(),
            total_orders: orders.len(),
            total_order_value: orders.iter().map(|o| o.net_amount).sum(),
            last_order_date,
            recent_order,
        }
    }

    /// Whether a business partner was matched at all
    pub fn has_partner(&self) -> bool {
        self.partner_id.is_some()
    }

    /// Whether the matched partner has any order history
    pub fn has_order_history(&self) -> bool {
        self.has_partner() && self.total_orders > 0
    }
}
