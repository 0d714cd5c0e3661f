//! Offline storage boundary consumed by presentation layers.
//!
//! The pipeline itself never persists anything beyond the controller's
//! in-memory result; this trait is the seam a host application implements
//! to offer saved-article features. `save` and `delete` are expected to be
//! idempotent.

use crate::model::Article;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Abstraction for offline storage of articles.
#[async_trait]
pub trait OfflineStore: Send + Sync {
    async fn save(&self, article: &Article) -> Result<()>;
    async fn fetch_saved(&self) -> Result<Vec<Article>>;
    async fn delete(&self, article_id: &str) -> Result<()>;
    async fn is_saved(&self, article_id: &str) -> bool;
}

/// Store that keeps nothing. Placeholder for hosts without offline support.
#[derive(Default)]
pub struct NoopOfflineStore;

#[async_trait]
impl OfflineStore for NoopOfflineStore {
    async fn save(&self, _article: &Article) -> Result<()> {
        Ok(())
    }

    async fn fetch_saved(&self) -> Result<Vec<Article>> {
        Ok(Vec::new())
    }

    async fn delete(&self, _article_id: &str) -> Result<()> {
        Ok(())
    }

    async fn is_saved(&self, _article_id: &str) -> bool {
        false
    }
}

/// In-memory store keyed by article id. Saving an already-saved article
/// replaces it; deleting an absent id is a no-op.
#[derive(Default)]
pub struct MemoryStore {
    articles: Mutex<HashMap<String, Article>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OfflineStore for MemoryStore {
    async fn save(&self, article: &Article) -> Result<()> {
        let mut articles = self.articles.lock().expect("store mutex poisoned");
        articles.insert(article.id.clone(), article.clone());
        Ok(())
    }

    async fn fetch_saved(&self) -> Result<Vec<Article>> {
        let articles = self.articles.lock().expect("store mutex poisoned");
        Ok(articles.values().cloned().collect())
    }

    async fn delete(&self, article_id: &str) -> Result<()> {
        let mut articles = self.articles.lock().expect("store mutex poisoned");
        articles.remove(article_id);
        Ok(())
    }

    async fn is_saved(&self, article_id: &str) -> bool {
        let articles = self.articles.lock().expect("store mutex poisoned");
        articles.contains_key(article_id)
    }
}
