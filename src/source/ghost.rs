//! Structured content source backed by the Ghost Content API.
//!
//! Issues one GET against the posts endpoint and decodes the JSON envelope
//! strictly: a single malformed record fails the whole fetch with a
//! [`SourceError::Decode`], never partial results. Absent optional fields
//! are resolved to concrete defaults during mapping so downstream code
//! never sees ambiguity.

use crate::model::Article;
use crate::source::{ContentSource, SourceError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

const POSTS_PATH: &str = "ghost/api/content/posts/";

/// Field projection requested from the API; one network round-trip carries
/// exactly what the mapping below consumes.
const POSTS_FIELDS: &str =
    "id,title,excerpt,html,published_at,url,feature_image,primary_tag,reading_time,primary_author";

/// Unconfigured deployments ship with this literal in place of a real key.
const PLACEHOLDER_API_KEY: &str = "<ghost-content-api-key>";

/// Content source for a Ghost CMS instance.
pub struct GhostSource {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<SecretString>,
    limit: u32,
}

impl GhostSource {
    pub fn new(
        client: reqwest::Client,
        base_url: Url,
        api_key: Option<SecretString>,
        limit: u32,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            limit,
        }
    }

    /// Returns the configured key, or a `Configuration` error when it is
    /// absent, empty, or still the shipped placeholder.
    fn require_api_key(&self) -> Result<&SecretString, SourceError> {
        match &self.api_key {
            Some(key)
                if !key.expose_secret().is_empty()
                    && key.expose_secret() != PLACEHOLDER_API_KEY =>
            {
                Ok(key)
            }
            _ => Err(SourceError::Configuration(
                "Ghost content API key is not set".to_string(),
            )),
        }
    }

    fn posts_url(&self) -> Result<Url, SourceError> {
        self.base_url.join(POSTS_PATH).map_err(|e| {
            SourceError::Configuration(format!("Invalid Ghost posts URL: {}", e))
        })
    }
}

#[async_trait]
impl ContentSource for GhostSource {
    async fn fetch_articles(&self) -> Result<Vec<Article>, SourceError> {
        let key = self.require_api_key()?;
        let url = self.posts_url()?;
        let limit = self.limit.to_string();

        let response = self
            .client
            .get(url)
            .query(&[
                ("key", key.expose_secret()),
                ("limit", limit.as_str()),
                ("fields", POSTS_FIELDS),
            ])
            .send()
            .await
            .map_err(SourceError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(SourceError::Network)?;
        let envelope: PostsEnvelope =
            serde_json::from_slice(&body).map_err(|e| SourceError::Decode(e.to_string()))?;

        tracing::debug!(count = envelope.posts.len(), "Fetched Ghost posts");
        Ok(envelope.posts.into_iter().map(Post::into_article).collect())
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct PostsEnvelope {
    posts: Vec<Post>,
}

/// One record as the Content API serves it. Optionality mirrors the wire:
/// every field the API may omit is an `Option` here and resolved to a
/// concrete default in [`Post::into_article`], never later.
#[derive(Debug, Deserialize)]
struct Post {
    id: String,
    title: String,
    excerpt: Option<String>,
    html: Option<String>,
    published_at: Option<DateTime<Utc>>,
    url: Option<String>,
    feature_image: Option<String>,
    primary_tag: Option<Tag>,
    reading_time: Option<u32>,
    primary_author: Option<Author>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Author {
    name: Option<String>,
}

impl Post {
    fn into_article(self) -> Article {
        Article {
            id: self.id,
            title: self.title,
            excerpt: self.excerpt.unwrap_or_default(),
            content_html: self.html.unwrap_or_default(),
            published_at: self.published_at.unwrap_or_else(Utc::now),
            url: self.url.unwrap_or_default(),
            author: self.primary_author.and_then(|a| a.name),
            image_url: self.feature_image.and_then(|u| Url::parse(&u).ok()),
            // Only the primary tag is projected, not the full tag set
            tags: self.primary_tag.map(|t| vec![t.name]).unwrap_or_default(),
            reading_time_minutes: self.reading_time,
        }
    }
}
