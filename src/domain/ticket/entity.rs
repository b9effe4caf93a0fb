//! Support ticket entities

use serde::{Deserialize, Serialize};

/// A support case to be categorized and actioned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    /// CRM record identifier
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,

    pub subject: String,
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    /// Channel the case arrived through (e.g. "Web", "Email", "Phone")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl TicketRecord {
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            case_number: None,
            subject: subject.into(),
            description: description.into(),
            status: None,
            priority: None,
            origin: None,
        }
    }

    pub fn with_case_number(mut self, case_number: impl Into<String>) -> Self {
        self.case_number = Some(case_number.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Subject and description joined for classification
    pub fn content(&self) -> String {
        format!("{} {}", self.subject, self.description)
            .trim()
            .to_string()
    }

    /// Whether the ticket carries any classifiable text at all
    pub fn has_content(&self) -> bool {
        !self.subject.trim().is_empty() || !self.description.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_joins_subject_and_description() {
        let ticket = TicketRecord::new("500-1", "Login broken", "Cannot sign in since Monday");
        assert_eq!(ticket.content(), "Login broken Cannot sign in since Monday");
        assert!(ticket.has_content());
    }

    #[test]
    fn test_empty_ticket_has_no_content() {
        let ticket = TicketRecord::new("500-2", "", "   ");
        assert!(!ticket.has_content());
    }
}
