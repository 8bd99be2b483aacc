//! Display titles and external search links.

use super::registry::TitleRule;
use crate::domain::Topic;

/// Title used when the title-bearing field is absent.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

const SEARCH_URL: &str = "https://www.google.com/search";

/// Derive the display title of `topic` according to `rule`.
pub fn extract_title(rule: TitleRule, topic: &Topic) -> String {
    match rule {
        TitleRule::Field(field) => topic
            .text_field(field)
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        TitleRule::Id { suffix } => match (topic.id(), suffix) {
            (Some(id), Some(word)) => format!("{} {}", id, word),
            (Some(id), None) => id,
            (None, _) => UNKNOWN_TITLE.to_string(),
        },
    }
}

/// Search link for `title` restricted to `domain`.
pub fn search_link(title: &str, domain: &str) -> String {
    format!("{}?q={}+site%3A{}", SEARCH_URL, quote_plus(title), domain)
}

/// Form-style percent-encoding: unreserved characters pass, space becomes `+`.
fn quote_plus(s: &str) -> String {
    urlencoding::encode(s).replace("%20", "+")
}
