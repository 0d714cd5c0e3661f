//! Primary/fallback composition of two content sources.

use crate::model::Article;
use crate::source::{ContentSource, SourceError};
use async_trait::async_trait;
use std::sync::Arc;

/// Wraps a primary and a fallback source behind one [`ContentSource`].
///
/// Policy: the primary's success is returned unconditionally, even when
/// empty - empty-but-successful is a valid result and must not trigger the
/// fallback. When the primary fails, the fallback is consulted strictly
/// afterwards (never raced); a non-empty fallback result silently masks the
/// outage, while an empty or failed fallback propagates the *primary's*
/// original error so structured-source failures stay diagnosable.
pub struct FallbackSource {
    primary: Arc<dyn ContentSource>,
    fallback: Arc<dyn ContentSource>,
}

impl FallbackSource {
    pub fn new(primary: Arc<dyn ContentSource>, fallback: Arc<dyn ContentSource>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl ContentSource for FallbackSource {
    async fn fetch_articles(&self) -> Result<Vec<Article>, SourceError> {
        let primary_err = match self.primary.fetch_articles().await {
            Ok(articles) => return Ok(articles),
            Err(e) => e,
        };

        tracing::warn!(error = %primary_err, "Primary source failed, trying fallback");

        match self.fallback.fetch_articles().await {
            Ok(articles) if !articles.is_empty() => {
                tracing::info!(count = articles.len(), "Fallback source masked primary outage");
                Ok(articles)
            }
            Ok(_) => Err(primary_err),
            Err(fallback_err) => {
                // The fallback's own error is deliberately discarded
                tracing::warn!(error = %fallback_err, "Fallback source also failed");
                Err(primary_err)
            }
        }
    }
}
