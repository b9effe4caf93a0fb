//! Classification-based complaint routing
//!
//! IT-support issues go to the services agent with a portal redirect;
//! product complaints and anything unclear go to the product expert.

use serde::{Deserialize, Serialize};

use crate::domain::decision::ComplaintClassification;

/// Action for a classified complaint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintAction {
    EmailProductExpert,
    EmailServicesAgent,
}

impl ComplaintAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailProductExpert => "email_product_expert",
            Self::EmailServicesAgent => "email_services_agent",
        }
    }
}

impl std::fmt::Display for ComplaintAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recipient addresses and redirect target used by complaint routing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplaintRecipients {
    /// Product expert inbox; falls back to `notification_email` when empty
    #[serde(default)]
    pub product_expert_email: String,

    /// Services agent inbox; falls back to `notification_email` when empty
    #[serde(default)]
    pub services_agent_email: String,

    /// Catch-all notification inbox
    #[serde(default)]
    pub notification_email: String,

    /// Self-service IT portal handed to IT-support requesters
    #[serde(default)]
    pub it_portal_url: String,
}

impl ComplaintRecipients {
    fn product_expert(&self) -> &str {
        if self.product_expert_email.is_empty() {
            &self.notification_email
        } else {
            &self.product_expert_email
        }
    }

    fn services_agent(&self) -> &str {
        if self.services_agent_email.is_empty() {
            &self.notification_email
        } else {
            &self.services_agent_email
        }
    }
}

/// Decision for complaint handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintDecision {
    pub action: ComplaintAction,
    pub recipient_email: String,

    /// IT portal link, set only for services-agent routing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,

    pub reason: String,
}

/// Map a complaint classification to its handling decision.
///
/// IT support → services agent with the portal redirect. Product complaints
/// and unclear cases → product expert (product review is the safer default
/// for anything that is not clearly an internal IT request).
pub fn route_complaint(
    classification: &ComplaintClassification,
    recipients: &ComplaintRecipients,
) -> ComplaintDecision {
    if classification.is_it_support {
        return ComplaintDecision {
            action: ComplaintAction::EmailServicesAgent,
            recipient_email: recipients.services_agent().to_string(),
            redirect_url: Some(recipients.it_portal_url.clone()),
            reason: "IT support issue detected; notifying services agent with portal link"
                .to_string(),
        };
    }

    let reason = if classification.is_product_complaint {
        format!(
            "Product complaint ({}) detected; notifying product expert",
            classification.product_category
        )
    } else {
        "General inquiry (not IT support); notifying product expert for review".to_string()
    };

    ComplaintDecision {
        action: ComplaintAction::EmailProductExpert,
        recipient_email: recipients.product_expert().to_string(),
        redirect_url: None,
        reason,
    }
}
