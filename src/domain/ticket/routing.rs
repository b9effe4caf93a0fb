//! Category-based ticket action policy

use serde::{Deserialize, Serialize};

use crate::domain::decision::TicketCategory;
use crate::domain::kb::{format_suggestions, KbSuggestion};

/// Action to take on a triaged ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketAction {
    /// Reply automatically with self-service material
    AutoReply,

    /// Ask the requester for more detail
    RequestInfo,

    /// Hand off to urgent, non-automated handling
    Escalate,
}

impl TicketAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutoReply => "auto_reply",
            Self::RequestInfo => "request_info",
            Self::Escalate => "escalate",
        }
    }
}

impl std::fmt::Display for TicketAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority raise applied on escalation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityChange {
    High,
    Critical,
}

impl PriorityChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for PriorityChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decision for ticket handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketDecision {
    pub action: TicketAction,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_change: Option<PriorityChange>,
}

impl TicketDecision {
    fn new(action: TicketAction) -> Self {
        Self {
            action,
            response_template: None,
            escalation_reason: None,
            priority_change: None,
        }
    }
}

const HOWTO_AUTO_REPLY: &str = "Thank you for contacting support.\n\n\
Based on your question, I found some helpful resources that may assist you:\n\n\
{kb_articles}\n\n\
If these articles don't answer your question, please reply to this message and \
a support representative will follow up within 24 hours.\n\n\
Best regards,\nSupport Team";

const BILLING_INFO_REQUEST: &str = "Thank you for contacting our billing department.\n\n\
To assist you with your billing inquiry, please provide:\n\
1. Invoice number or date range\n\
2. Specific line items in question\n\
3. Your expected amount vs. charged amount\n\n\
Our billing team will review your case within 1-2 business days.\n\n\
Best regards,\nBilling Support";

const OUTAGE_ESCALATION: &str = "[ESCALATED - SYSTEM OUTAGE]\n\n\
This ticket has been automatically escalated to our incident response team.\n\n\
Current system status: https://status.example.com\n\
Incident updates will be posted to the status page.\n\n\
If this is affecting production systems, our on-call engineer has been notified.\n\n\
Ticket Priority: HIGH";

const SECURITY_ESCALATION: &str = "[ESCALATED - SECURITY CONCERN]\n\n\
This ticket has been automatically escalated to our Security Operations team.\n\n\
DO NOT share any sensitive information in this ticket.\n\n\
A security analyst will contact you within 1 hour during business hours.\n\n\
Ticket Priority: CRITICAL";

const OTHER_INFO_REQUEST: &str = "Thank you for contacting support.\n\n\
We've received your request and need some additional information to assist you:\n\
1. Please describe the issue in more detail\n\
2. What were you trying to accomplish?\n\
3. Any error messages or screenshots would be helpful\n\n\
A support representative will follow up within 24-48 hours.\n\n\
Best regards,\nSupport Team";

/// Map a ticket category to its handling decision.
///
/// howto → auto-reply (with KB articles when available); billing →
/// request_info; outage/security → escalate with a priority raise (High for
/// outage, Critical for security); everything else → request_info.
pub fn route_ticket(category: TicketCategory, kb_suggestions: &[KbSuggestion]) -> TicketDecision {
    match category {
        TicketCategory::Howto => {
            let mut decision = TicketDecision::new(TicketAction::AutoReply);
            decision.response_template = Some(
                HOWTO_AUTO_REPLY.replace("{kb_articles}", &format_suggestions(kb_suggestions)),
            );
            decision
        }
        TicketCategory::Billing => {
            let mut decision = TicketDecision::new(TicketAction::RequestInfo);
            decision.response_template = Some(BILLING_INFO_REQUEST.to_string());
            decision
        }
        TicketCategory::Outage => {
            let mut decision = TicketDecision::new(TicketAction::Escalate);
            decision.response_template = Some(OUTAGE_ESCALATION.to_string());
            decision.escalation_reason = Some("Auto-escalated: OUTAGE category detected".to_string());
            decision.priority_change = Some(PriorityChange::High);
            decision
        }
        TicketCategory::Security => {
            let mut decision = TicketDecision::new(TicketAction::Escalate);
            decision.response_template = Some(SECURITY_ESCALATION.to_string());
            decision.escalation_reason =
                Some("Auto-escalated: SECURITY category detected".to_string());
            decision.priority_change = Some(PriorityChange::Critical);
            decision
        }
        TicketCategory::Other => {
            let mut decision = TicketDecision::new(TicketAction::RequestInfo);
            decision.response_template = Some(OTHER_INFO_REQUEST.to_string());
            decision
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kb::search_articles;

    #[test]
    fn test_howto_auto_reply_includes_articles() {
        let suggestions = search_articles("password reset", Some(TicketCategory::Howto), 3);
        let decision = route_ticket(TicketCategory::Howto, &suggestions);

        assert_eq!(decision.action, TicketAction::AutoReply);
        let template = decision.response_template.unwrap();
        assert!(template.contains("How to Reset Your Password"));
        assert!(decision.priority_change.is_none());
    }

    #[test]
    fn test_billing_requests_info() {
        let decision = route_ticket(TicketCategory::Billing, &[]);
        assert_eq!(decision.action, TicketAction::RequestInfo);
        assert!(decision.response_template.unwrap().contains("billing"));
    }

    #[test]
    fn test_outage_escalates_to_high() {
        let decision = route_ticket(TicketCategory::Outage, &[]);
        assert_eq!(decision.action, TicketAction::Escalate);
        assert_eq!(decision.priority_change, Some(PriorityChange::High));
        assert!(decision.escalation_reason.unwrap().contains("OUTAGE"));
    }

    #[test]
    fn test_security_escalates_to_critical() {
        let decision = route_ticket(TicketCategory::Security, &[]);
        assert_eq!(decision.action, TicketAction::Escalate);
        assert_eq!(decision.priority_change, Some(PriorityChange::Critical));
    }

    #[test]
    fn test_other_requests_info() {
        let decision = route_ticket(TicketCategory::Other, &[]);
        assert_eq!(decision.action, TicketAction::RequestInfo);
    }
}
