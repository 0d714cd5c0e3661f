//! Feed state machines driving the presentation boundary.
//!
//! A controller owns the fetch lifecycle for one article list: it asks its
//! [`ContentSource`] for articles, sorts them newest-first, and publishes a
//! [`FeedSnapshot`] on every transition through a `tokio::sync::watch`
//! channel so any frontend can subscribe without this crate depending on an
//! observation framework.
//!
//! Loads are single-flight: a request arriving while one is already in
//! flight is a no-op - not queued, not restarted. The in-flight fetch always
//! runs to completion. Source errors never reach subscribers; they are
//! replaced by one fixed user-facing message.

use crate::model::Article;
use crate::source::ContentSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Fixed user-facing message for a failed load. Internal error detail is
/// logged, never shown.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load articles.";

/// Where the controller is in its fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// One observable state of a feed controller.
///
/// `articles` survives a failed reload: a stale-but-valid list stays
/// visible alongside the error until a later load succeeds.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub phase: FeedPhase,
    pub articles: Vec<Article>,
    pub error: Option<String>,
}

impl FeedSnapshot {
    fn idle() -> Self {
        Self {
            phase: FeedPhase::Idle,
            articles: Vec::new(),
            error: None,
        }
    }
}

/// Sorts newest-first by publication date. The sort is stable, so equal
/// timestamps keep their source order; applying it twice changes nothing.
pub fn sort_descending(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// Controller for the main article feed.
pub struct FeedController {
    source: Arc<dyn ContentSource>,
    in_flight: AtomicBool,
    state: watch::Sender<FeedSnapshot>,
}

impl FeedController {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            in_flight: AtomicBool::new(false),
            state: watch::Sender::new(FeedSnapshot::idle()),
        }
    }

    /// Fetches articles and publishes the resulting state.
    ///
    /// Single-flight: when a load is already in flight this returns
    /// immediately without touching the state. On success the result list
    /// is sorted newest-first and any previous error is cleared; on failure
    /// the previous list is kept and the error is set to
    /// [`LOAD_ERROR_MESSAGE`].
    pub async fn load(&self) {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Load already in flight, ignoring request");
            return;
        }

        self.state.send_modify(|s| s.phase = FeedPhase::Loading);

        let result = self.source.fetch_articles().await;
        self.state.send_modify(|s| match result {
            Ok(mut articles) => {
                sort_descending(&mut articles);
                s.articles = articles;
                s.error = None;
                s.phase = FeedPhase::Loaded;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Feed load failed");
                s.error = Some(LOAD_ERROR_MESSAGE.to_string());
                s.phase = FeedPhase::Failed;
            }
        });

        self.in_flight.store(false, Ordering::Release);
    }

    /// Current state; a clone, detached from future transitions.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().phase == FeedPhase::Loading
    }

    pub fn articles(&self) -> Vec<Article> {
        self.state.borrow().articles.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Free-text view over the current list: case-insensitive substring
    /// match against title, excerpt, or any tag. An empty query returns the
    /// full list. Pure - the underlying state is untouched.
    pub fn search(&self, query: &str) -> Vec<Article> {
        self.state
            .borrow()
            .articles
            .iter()
            .filter(|a| a.matches_query(query))
            .cloned()
            .collect()
    }
}

/// Controller for a single tag's feed.
///
/// Same lifecycle as [`FeedController`], with two deliberate differences:
/// the result list is narrowed to articles carrying the tag
/// (case-insensitive exact match), and a failed load clears the list
/// instead of preserving stale results, with the error message
/// parameterized by the tag name.
pub struct TagFeedController {
    tag: String,
    source: Arc<dyn ContentSource>,
    in_flight: AtomicBool,
    state: watch::Sender<FeedSnapshot>,
}

impl TagFeedController {
    pub fn new(tag: impl Into<String>, source: Arc<dyn ContentSource>) -> Self {
        Self {
            tag: tag.into(),
            source,
            in_flight: AtomicBool::new(false),
            state: watch::Sender::new(FeedSnapshot::idle()),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Display title for the tag feed, e.g. `#Rollups`.
    pub fn title(&self) -> String {
        format!("#{}", self.tag)
    }

    pub async fn load(&self) {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(tag = %self.tag, "Load already in flight, ignoring request");
            return;
        }

        self.state.send_modify(|s| s.phase = FeedPhase::Loading);

        let result = self.source.fetch_articles().await;
        self.state.send_modify(|s| match result {
            Ok(articles) => {
                let mut matching: Vec<Article> = articles
                    .into_iter()
                    .filter(|a| a.has_tag(&self.tag))
                    .collect();
                sort_descending(&mut matching);
                s.articles = matching;
                s.error = None;
                s.phase = FeedPhase::Loaded;
            }
            Err(e) => {
                tracing::warn!(tag = %self.tag, error = %e, "Tag feed load failed");
                s.articles = Vec::new();
                s.error = Some(format!("Failed to load {} articles.", self.tag));
                s.phase = FeedPhase::Failed;
            }
        });

        self.in_flight.store(false, Ordering::Release);
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().phase == FeedPhase::Loading
    }

    pub fn articles(&self) -> Vec<Article> {
        self.state.borrow().articles.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }
}
