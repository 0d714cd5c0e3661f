//! Resilient article aggregation core.
//!
//! Fetches published articles from a Ghost-style content API with an RSS
//! syndication feed as fallback, normalizes both into one [`Article`] shape,
//! and exposes the result through an async [`FeedController`] that owns the
//! loading / loaded / failed lifecycle plus sorting and filtering.
//!
//! # Architecture
//!
//! - [`model`] - The normalized `Article` record and its construction rules
//! - [`source`] - The `ContentSource` trait and its implementations:
//!   Ghost content API, RSS feed, fallback composition, static samples
//! - [`controller`] - Feed state machine with single-flight loading,
//!   descending date sort, free-text search, and tag filtering
//! - [`config`] - Source selection and credentials, from TOML and environment
//! - [`store`] - Offline storage boundary consumed by presentation layers
//!
//! Data flows one way: controller asks a source, the source yields articles
//! (or a typed error), the controller sorts and publishes a state snapshot.
//! Nothing here retains entities across fetches or mutates them after
//! construction.

pub mod config;
pub mod controller;
pub mod model;
pub mod source;
pub mod store;

pub use config::Config;
pub use controller::{FeedController, FeedPhase, FeedSnapshot, TagFeedController};
pub use model::Article;
pub use source::{build_source, ContentSource, SourceError};
