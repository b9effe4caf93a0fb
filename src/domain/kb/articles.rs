//! Built-in knowledge base articles

use crate::domain::decision::TicketCategory;

/// A knowledge base article with its search keywords
#[derive(Debug, Clone, Copy)]
pub struct KbArticle {
    pub id: &'static str,
    pub title: &'static str,
    pub category: TicketCategory,
    pub keywords: &'static [&'static str],
    pub summary: &'static str,
    pub url: &'static str,

    /// Base relevance before keyword-match scaling
    pub relevance_base: f64,
}

pub const KB_ARTICLES: &[KbArticle] = &[
    KbArticle {
        id: "KB0001",
        title: "How to Reset Your Password",
        category: TicketCategory::Howto,
        keywords: &["password", "reset", "forgot", "login", "access", "locked"],
        summary: "Step-by-step guide to reset your account password via email verification.",
        url: "/kb/articles/KB0001",
        relevance_base: 0.9,
    },
    KbArticle {
        id: "KB0002",
        title: "Two-Factor Authentication Setup",
        category: TicketCategory::Howto,
        keywords: &["2fa", "two-factor", "mfa", "authentication", "security", "setup"],
        summary: "Guide to enabling and configuring two-factor authentication for your account.",
        url: "/kb/articles/KB0002",
        relevance_base: 0.85,
    },
    KbArticle {
        id: "KB0003",
        title: "Understanding Your Invoice",
        category: TicketCategory::Billing,
        keywords: &["invoice", "bill", "charge", "payment", "price", "cost", "fee"],
        summary: "Explanation of invoice line items, taxes, and payment terms.",
        url: "/kb/articles/KB0003",
        relevance_base: 0.88,
    },
    KbArticle {
        id: "KB0004",
        title: "Payment Methods and Options",
        category: TicketCategory::Billing,
        keywords: &["payment", "credit card", "bank", "wire", "ach", "method"],
        summary: "Available payment methods including credit card, ACH, and wire transfer.",
        url: "/kb/articles/KB0004",
        relevance_base: 0.85,
    },
    KbArticle {
        id: "KB0005",
        title: "System Status and Monitoring",
        category: TicketCategory::Outage,
        keywords: &["status", "down", "outage", "incident", "monitoring", "uptime"],
        summary: "How to check system status and subscribe to incident notifications.",
        url: "/kb/articles/KB0005",
        relevance_base: 0.9,
    },
    KbArticle {
        id: "KB0006",
        title: "Incident Response Procedures",
        category: TicketCategory::Outage,
        keywords: &["incident", "response", "sla", "recovery", "emergency", "urgent"],
        summary: "Our incident response procedures and SLA commitments.",
        url: "/kb/articles/KB0006",
        relevance_base: 0.87,
    },
    KbArticle {
        id: "KB0007",
        title: "Security Best Practices",
        category: TicketCategory::Security,
        keywords: &["security", "breach", "hack", "unauthorized", "suspicious", "protect"],
        summary: "Security best practices and how to report suspicious activity.",
        url: "/kb/articles/KB0007",
        relevance_base: 0.92,
    },
    KbArticle {
        id: "KB0008",
        title: "Data Privacy and Compliance",
        category: TicketCategory::Security,
        keywords: &["privacy", "gdpr", "compliance", "data", "personal", "deletion"],
        summary: "Our data privacy policies and compliance certifications.",
        url: "/kb/articles/KB0008",
        relevance_base: 0.88,
    },
    KbArticle {
        id: "KB0009",
        title: "Getting Started Guide",
        category: TicketCategory::Howto,
        keywords: &["start", "begin", "new", "onboarding", "tutorial", "guide"],
        summary: "Complete onboarding guide for new users.",
        url: "/kb/articles/KB0009",
        relevance_base: 0.8,
    },
    KbArticle {
        id: "KB0010",
        title: "API Documentation Overview",
        category: TicketCategory::Howto,
        keywords: &["api", "integration", "developer", "documentation", "endpoint"],
        summary: "Overview of our REST API and integration capabilities.",
        url: "/kb/articles/KB0010",
        relevance_base: 0.75,
    },
];
