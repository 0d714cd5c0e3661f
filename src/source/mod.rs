//! Content sources and their composition.
//!
//! A content source retrieves the full article list from one origin. Three
//! real implementations exist, plus a static one:
//!
//! - [`GhostSource`] - structured Ghost Content API, strict decode
//! - [`RssSource`] - RSS syndication feed, best-effort parse, never fails
//! - [`FallbackSource`] - primary/fallback composition of two sources
//! - [`SampleSource`] - deterministic in-memory articles for development
//!
//! Sources are stateless apart from fixed configuration and may be reused or
//! rebuilt per call. None retains or mutates articles after returning them.

mod fallback;
mod ghost;
mod rss;
mod sample;

pub use fallback::FallbackSource;
pub use ghost::GhostSource;
pub use rss::RssSource;
pub use sample::SampleSource;

use crate::config::Config;
use crate::model::Article;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Errors raised by content sources.
///
/// Only the structured API source raises; the RSS source signals failure by
/// returning an empty list, and the fallback composition recovers per its
/// policy. The controller translates whatever remains into one generic
/// user-facing message.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Required credential absent, empty, or left at its placeholder value.
    /// Fatal to that source; not retried automatically.
    #[error("Source misconfigured: {0}")]
    Configuration(String),
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Payload could not be decoded as the expected document shape.
    /// All-or-nothing: one malformed record invalidates the whole fetch.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// A component able to retrieve the list of published articles from one
/// origin. Implementations must not retain or mutate entities after
/// returning them.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_articles(&self) -> Result<Vec<Article>, SourceError>;
}

/// Assembles the active content source from configuration.
///
/// With `use_live_sources` set, builds the Ghost API source with the RSS
/// feed as fallback; otherwise returns the static sample source. This is
/// the single place source selection happens - callers receive a trait
/// object and never branch on the concrete type.
pub fn build_source(config: &Config, client: reqwest::Client) -> Result<Arc<dyn ContentSource>> {
    if !config.use_live_sources {
        tracing::debug!("Using static sample source");
        return Ok(Arc::new(SampleSource::new()));
    }

    let base_url = Url::parse(&config.ghost.base_url)
        .with_context(|| format!("Invalid Ghost base URL: {}", config.ghost.base_url))?;
    let feed_url = Url::parse(&config.rss_feed_url)
        .with_context(|| format!("Invalid RSS feed URL: {}", config.rss_feed_url))?;

    let primary = Arc::new(GhostSource::new(
        client.clone(),
        base_url,
        config.ghost_api_key(),
        config.ghost.limit,
    ));
    let fallback = Arc::new(RssSource::new(client, feed_url));
    Ok(Arc::new(FallbackSource::new(primary, fallback)))
}
