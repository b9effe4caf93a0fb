//! Deterministic keyword search over the article table

use serde::{Deserialize, Serialize};

use super::articles::KB_ARTICLES;
use crate::domain::decision::TicketCategory;

/// An article suggestion attached to a ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KbSuggestion {
    pub article_id: String,
    pub title: String,
    pub relevance_score: f64,
    pub summary: String,
    pub url: String,
}

/// Search the knowledge base by keyword match.
///
/// Relevance = base relevance × (0.5 + 0.5 × matched-keyword ratio).
/// Results are sorted by relevance, ties by article id, and truncated to
/// `limit`. Purely deterministic.
pub fn search_articles(
    query: &str,
    category: Option<TicketCategory>,
    limit: usize,
) -> Vec<KbSuggestion> {
    let query = query.to_lowercase();

    let mut scored: Vec<KbSuggestion> = KB_ARTICLES
        .iter()
        .filter(|article| category.is_none_or(|c| article.category == c))
        .filter_map(|article| {
            let matches = article
                .keywords
                .iter()
                .filter(|kw| query.contains(*kw))
                .count();

            if matches == 0 {
                return None;
            }

            let ratio = matches as f64 / article.keywords.len() as f64;
            let relevance = article.relevance_base * (0.5 + 0.5 * ratio);

            Some(KbSuggestion {
                article_id: article.id.to_string(),
                title: article.title.to_string(),
                relevance_score: (relevance * 1000.0).round() / 1000.0,
                summary: article.summary.to_string(),
                url: article.url.to_string(),
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.article_id.cmp(&b.article_id))
    });
    scored.truncate(limit);
    scored
}

/// Render suggestions as a numbered list for response templates
pub fn format_suggestions(suggestions: &[KbSuggestion]) -> String {
    if suggestions.is_empty() {
        return "No specific articles found. Please describe your question in more detail."
            .to_string();
    }

    let mut lines = Vec::new();
    for (i, suggestion) in suggestions.iter().enumerate() {
        lines.push(format!("{}. **{}**", i + 1, suggestion.title));
        lines.push(format!("   {}", suggestion.summary));
        lines.push(format!("   Read more: {}", suggestion.url));
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_matches_password_articles() {
        let results = search_articles("forgot my password and my account is locked", None, 3);

        assert!(!results.is_empty());
        assert_eq!(results[0].article_id, "KB0001");
    }

    #[test]
    fn test_category_filter() {
        let results = search_articles("payment invoice charge", Some(TicketCategory::Billing), 5);

        assert!(!results.is_empty());
        assert!(results.iter().all(|s| s.article_id == "KB0003" || s.article_id == "KB0004"));
    }

    #[test]
    fn test_no_match_returns_empty() {
        let results = search_articles("xyzzy plugh", None, 3);
        assert!(results.is_empty());
    }

    #[test]
    fn test_limit_and_determinism() {
        let first = search_articles("password login access security", None, 2);
        let second = search_articles("password login access security", None, 2);

        assert!(first.len() <= 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_format_suggestions_empty() {
        let text = format_suggestions(&[]);
        assert!(text.contains("No specific articles found"));
    }

    #[test]
    fn test_format_suggestions_lists_titles() {
        let suggestions = search_articles("password reset", None, 2);
        let text = format_suggestions(&suggestions);
        assert!(text.contains("1. **"));
        assert!(text.contains("Read more: /kb/articles/"));
    }
}
