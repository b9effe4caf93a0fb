//! Score-based lead routing policy

use serde::{Deserialize, Serialize};

/// Team a lead is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerType {
    /// Account Executive: immediate engagement
    #[serde(rename = "AE")]
    AccountExecutive,

    /// Sales Development Rep: qualification call first
    #[serde(rename = "SDR")]
    SalesDevelopment,

    /// Marketing nurture campaign
    #[serde(rename = "Nurture")]
    Nurture,
}

impl OwnerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccountExecutive => "AE",
            Self::SalesDevelopment => "SDR",
            Self::Nurture => "Nurture",
        }
    }
}

impl std::fmt::Display for OwnerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Follow-up priority band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    P3,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Routing decision for a qualified lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub owner_type: OwnerType,
    pub priority: Priority,

    /// Concrete owner id from routing configuration; empty until resolved
    #[serde(default)]
    pub owner_id: String,

    pub reason: String,
}

impl RouteDecision {
    pub fn with_owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self
    }
}

/// Map a qualification score to a routing decision.
///
/// Bands are closed on their lower bound: 0.75 routes to AE, 0.45 to SDR.
/// The score is the only input; no other lead field participates.
pub fn route_lead(score: f64) -> RouteDecision {
    if score >= 0.75 {
        RouteDecision {
            owner_type: OwnerType::AccountExecutive,
            priority: Priority::P1,
            owner_id: String::new(),
            reason: format!("High-value lead (score: {score:.2}) - immediate AE engagement"),
        }
    } else if score >= 0.45 {
        RouteDecision {
            owner_type: OwnerType::SalesDevelopment,
            priority: Priority::P2,
            owner_id: String::new(),
            reason: format!("Qualified lead (score: {score:.2}) - SDR qualification needed"),
        }
    } else {
        RouteDecision {
            owner_type: OwnerType::Nurture,
            priority: Priority::P3,
            owner_id: String::new(),
            reason: format!("Early-stage lead (score: {score:.2}) - nurture campaign"),
        }
    }
}
