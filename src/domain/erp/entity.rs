//! ERP-side entities returned by the enrichment source

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A business partner known to the ERP system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerRecord {
    pub id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_rating: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
}

impl PartnerRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credit_rating: None,
            account_status: None,
            payment_terms: None,
        }
    }

    pub fn with_credit_rating(mut self, rating: impl Into<String>) -> Self {
        self.credit_rating = Some(rating.into());
        self
    }

    pub fn with_account_status(mut self, status: impl Into<String>) -> Self {
        self.account_status = Some(status.into());
        self
    }

    pub fn with_payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = Some(terms.into());
        self
    }
}

/// A sales order on a business partner's account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    pub id: String,
    pub partner_id: String,
    pub net_amount: f64,
    pub ordered_at: DateTime<Utc>,

    /// Whether the order is still open (not yet delivered/billed)
    #[serde(default)]
    pub open: bool,
}

impl SalesOrder {
    pub fn new(
        id: impl Into<String>,
        partner_id: impl Into<String>,
        net_amount: f64,
        ordered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            partner_id: partner_id.into(),
            net_amount,
            ordered_at,
            open: false,
        }
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }
}

/// Order context attached to a support ticket during triage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErpOrderContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,

    pub has_open_orders: bool,
    pub total_order_value: f64,
}

impl ErpOrderContext {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_orders(partner_id: impl Into<String>, orders: &[SalesOrder]) -> Self {
        Self {
            partner_id: Some(partner_id.into()),
            has_open_orders: orders.iter().any(|o| o.open),
            total_order_value: orders.iter().map(|o| o.net_amount).sum(),
        }
    }
}
