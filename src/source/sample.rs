//! Static sample source for development builds and tests.

use crate::model::Article;
use crate::source::{ContentSource, SourceError};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use url::Url;

/// A source serving a fixed, deterministic article set resembling a CMS
/// payload. Never fails. Selected by configuration in development builds so
/// the presentation layer stays usable without network or credentials.
#[derive(Default)]
pub struct SampleSource;

impl SampleSource {
    pub fn new() -> Self {
        Self
    }

    /// The fixed sample set, newest first not guaranteed - the controller
    /// sorts. Includes edge-case records (future-dated, empty-field draft)
    /// to exercise consumers.
    pub fn sample_articles() -> Vec<Article> {
        vec![
            Article {
                id: "ew-001".into(),
                title: "EIP-4844 Ships on Mainnet".into(),
                excerpt: "Proto-danksharding lands with lower blob fees and improved data availability.".into(),
                content_html: concat!(
                    "<h2>Why it matters</h2>",
                    "<p>Proto-danksharding introduces blob-carrying transactions to reduce L2 costs.</p>",
                    "<p>Rollups benefit from cheaper data and improved throughput.</p>",
                ).into(),
                published_at: Utc.with_ymd_and_hms(2025, 12, 10, 15, 4, 5).unwrap(),
                url: "https://etherworld.example/eip-4844".into(),
                author: Some("Ada Validator".into()),
                image_url: Url::parse("https://etherworld.example/assets/eip-4844.png").ok(),
                tags: vec!["EIP".into(), "Sharding".into(), "Rollups".into()],
                reading_time_minutes: Some(6),
            },
            Article {
                id: "ew-002".into(),
                title: "The Merge, Two Years Later".into(),
                excerpt: "Energy savings, validator participation, and MEV dynamics in review.".into(),
                content_html: concat!(
                    "<p>Post-Merge, Ethereum reduced energy usage by ~99.95%.</p>",
                    "<p>Validator set grew steadily, while MEV-boost adoption reshaped proposer rewards.</p>",
                ).into(),
                published_at: Utc.with_ymd_and_hms(2025, 11, 28, 9, 30, 0).unwrap(),
                url: "https://etherworld.example/merge-two-years".into(),
                author: Some("Satoshi Burner".into()),
                image_url: Url::parse("https://etherworld.example/assets/merge.jpg").ok(),
                tags: vec!["Merge".into(), "Proof-of-Stake".into()],
                reading_time_minutes: Some(8),
            },
            Article {
                id: "ew-003".into(),
                title: "Road to Verkle Trees".into(),
                excerpt: "State expiry, smaller witnesses, and the path to stateless clients.".into(),
                content_html: "<p>Verkle trees promise succinct proofs, enabling lighter clients and faster sync.</p>".into(),
                published_at: Utc.with_ymd_and_hms(2025, 11, 5, 12, 0, 0).unwrap(),
                url: "https://etherworld.example/verkle-roadmap".into(),
                author: Some("Chain Researcher".into()),
                image_url: None,
                tags: vec!["Verkle".into(), "Client".into()],
                reading_time_minutes: Some(4),
            },
            // Future-dated article: consumers must not assume past timestamps
            Article {
                id: "ew-004".into(),
                title: "A very long-form deep dive into bytecode and optimizations for EVM clients".into(),
                excerpt: "This is a long excerpt that should be truncated in the list.".into(),
                content_html: "<p>Long form content paragraph.</p>".repeat(30),
                published_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
                url: "https://etherworld.example/deep-dive-bytecode".into(),
                author: Some("Dev Rel".into()),
                image_url: None,
                tags: vec!["Deep Dive".into(), "EVM".into()],
                reading_time_minutes: Some(25),
            },
            // Draft with every optional field empty or absent
            Article {
                id: "ew-005".into(),
                title: "Draft: State Expiry Proposal".into(),
                excerpt: String::new(),
                content_html: String::new(),
                published_at: Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap(),
                url: "https://etherworld.example/state-expiry-draft".into(),
                author: None,
                image_url: None,
                tags: Vec::new(),
                reading_time_minutes: None,
            },
        ]
    }
}

#[async_trait]
impl ContentSource for SampleSource {
    async fn fetch_articles(&self) -> Result<Vec<Article>, SourceError> {
        Ok(Self::sample_articles())
    }
}
