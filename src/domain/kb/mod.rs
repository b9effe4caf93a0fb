//! Knowledge base lookup
//!
//! A fixed article table with deterministic keyword search, used to attach
//! self-service suggestions to howto tickets.

mod articles;
mod search;

pub use articles::{KbArticle, KB_ARTICLES};
pub use search::{format_suggestions, search_articles, KbSuggestion};
