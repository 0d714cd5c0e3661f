//! The normalized article record shared by every content source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A published article, normalized from whichever source produced it.
///
/// Core fields are always present on the entity even when the wire format
/// omits them: adapters resolve every absent value to a concrete default
/// before construction (empty string for text, fetch-time `now` for the
/// publication date). Optional metadata stays optional.
///
/// Articles are immutable value records. Sources build them fresh on every
/// fetch; no identity persists across fetches except by equal `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Unique within one fetch result. Uniqueness is the producing source's
    /// responsibility and is not re-validated downstream.
    pub id: String,
    pub title: String,
    /// Short summary text. May be empty.
    pub excerpt: String,
    /// Full article markup. May be empty, and may equal `excerpt` when the
    /// source provides no richer body.
    pub content_html: String,
    /// Never absent: sources that omit a publication date get fetch-time now.
    pub published_at: DateTime<Utc>,
    /// Canonical link to the article. May be empty.
    pub url: String,
    pub author: Option<String>,
    pub image_url: Option<Url>,
    /// Ordered as the source listed them; not deduplicated. Tag comparisons
    /// are always case-insensitive (see the controller's filters).
    pub tags: Vec<String>,
    pub reading_time_minutes: Option<u32>,
}

impl Article {
    /// True when any of title, excerpt, or a tag contains `query`,
    /// case-insensitively. An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.excerpt.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(&needle))
    }

    /// True when the tag list contains `tag` under case-insensitive
    /// exact comparison.
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article_with_tags(tags: &[&str]) -> Article {
        Article {
            id: "a-1".into(),
            title: "Proto-danksharding lands".into(),
            excerpt: "Blob fees drop across L2s".into(),
            content_html: String::new(),
            published_at: Utc.with_ymd_and_hms(2025, 12, 10, 15, 4, 5).unwrap(),
            url: String::new(),
            author: None,
            image_url: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            reading_time_minutes: None,
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        let article = article_with_tags(&[]);
        assert!(article.matches_query(""));
    }

    #[test]
    fn query_matches_title_case_insensitively() {
        let article = article_with_tags(&[]);
        assert!(article.matches_query("DANKSHARDING"));
        assert!(!article.matches_query("verkle"));
    }

    #[test]
    fn query_matches_tags() {
        let article = article_with_tags(&["Rollups", "EIP"]);
        assert!(article.matches_query("rollup"));
    }

    #[test]
    fn tag_match_is_exact_but_case_insensitive() {
        let article = article_with_tags(&["rollups"]);
        assert!(article.has_tag("Rollups"));
        assert!(!article.has_tag("rollup"));
    }

    #[test]
    fn tag_match_folds_non_ascii_case() {
        let article = article_with_tags(&["défi"]);
        assert!(article.has_tag("DÉFI"));
        assert!(article.matches_query("DÉFI"));
    }
}
