//! Best-effort RSS/Atom syndication source.
//!
//! This adapter exists purely as a fallback, so it has no raised-error
//! channel: transport failures, malformed markup, and invalid items all
//! degrade to omission. A fetch that yields nothing returns an empty list,
//! which the fallback composition treats as the failure signal.
//!
//! Parsing is a flat streaming state machine over quick-xml events rather
//! than recursive descent - feed nesting is shallow and uniform, so two
//! states suffice: outside an item, or inside one with a per-item
//! accumulator that buffers child-element text until the item closes.

use crate::model::Article;
use crate::source::{ContentSource, SourceError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use url::Url;
use uuid::Uuid;

/// RFC-822 style publication date, numeric UTC offset only.
/// Anything else yields a missing timestamp, backfilled to fetch-time now.
const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Content source for an RSS/Atom feed.
pub struct RssSource {
    client: reqwest::Client,
    feed_url: Url,
}

impl RssSource {
    pub fn new(client: reqwest::Client, feed_url: Url) -> Self {
        Self { client, feed_url }
    }
}

#[async_trait]
impl ContentSource for RssSource {
    async fn fetch_articles(&self) -> Result<Vec<Article>, SourceError> {
        let response = match self.client.get(self.feed_url.clone()).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(feed = %self.feed_url, error = %e, "RSS fetch failed");
                return Ok(Vec::new());
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                feed = %self.feed_url,
                status = %response.status(),
                "RSS feed returned non-success status"
            );
            return Ok(Vec::new());
        }

        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(feed = %self.feed_url, error = %e, "RSS body read failed");
                return Ok(Vec::new());
            }
        };

        Ok(parse_feed(&body))
    }
}

// ============================================================================
// Parser
// ============================================================================

/// Parses a syndication document into articles.
///
/// Defensive by contract: a document that is not well-formed XML yields an
/// empty list, and items without a title are silently dropped. Namespaced
/// elements are matched by local name, so `content:encoded` is recognized
/// regardless of prefix.
///
/// # Security
///
/// XXE is structurally impossible here: quick-xml (0.37) never parses
/// `<!ENTITY>` declarations, and only the five XML builtins are resolved
/// during unescaping (see SEC-002 pin in Cargo.toml).
pub(crate) fn parse_feed(bytes: &[u8]) -> Vec<Article> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut articles = Vec::new();
    let mut current: Option<ItemAccumulator> = None;
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if is_item_boundary(e.local_name().as_ref()) {
                    current = Some(ItemAccumulator::default());
                }
                text.clear();
            }
            Ok(Event::Text(t)) => match t.unescape() {
                Ok(s) => text.push_str(&s),
                Err(e) => {
                    // Undefined entity or bad escape: treat as malformed markup
                    tracing::debug!(error = %e, "Dropping unparseable feed");
                    return Vec::new();
                }
            },
            Ok(Event::CData(t)) => {
                text.push_str(&String::from_utf8_lossy(&t.into_inner()));
            }
            Ok(Event::End(e)) => {
                let local = e.local_name().as_ref().to_ascii_lowercase();
                if is_item_boundary(&local) {
                    if let Some(item) = current.take() {
                        match item.into_article() {
                            Some(article) => articles.push(article),
                            None => {
                                tracing::debug!("Dropping feed item without a title");
                            }
                        }
                    }
                } else if let Some(item) = current.as_mut() {
                    item.assign(&local, text.trim());
                }
                text.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                // Malformed markup discards the whole document, never raises
                tracing::debug!(error = %e, "Feed is not well-formed XML");
                return Vec::new();
            }
            _ => {}
        }
        buf.clear();
    }

    articles
}

fn is_item_boundary(local_name: &[u8]) -> bool {
    local_name.eq_ignore_ascii_case(b"item") || local_name.eq_ignore_ascii_case(b"entry")
}

/// Transient per-item parse state. Buffers child-element text between an
/// item's open and close tags, then converts to one [`Article`] and is
/// discarded. Never persisted, never exposed.
#[derive(Debug, Default)]
struct ItemAccumulator {
    guid: Option<String>,
    link: Option<String>,
    title: Option<String>,
    description: Option<String>,
    content_encoded: Option<String>,
    pub_date: Option<String>,
}

impl ItemAccumulator {
    /// Routes a closed child element's text into the matching field.
    /// `local` is already lowercased; unrecognized elements are ignored.
    fn assign(&mut self, local: &[u8], value: &str) {
        let value = value.to_string();
        match local {
            b"guid" => self.guid = Some(value),
            b"link" => self.link = Some(value),
            b"title" => self.title = Some(value),
            b"description" => self.description = Some(value),
            b"encoded" => self.content_encoded = Some(value),
            b"pubdate" => self.pub_date = Some(value),
            _ => {}
        }
    }

    /// Converts the accumulator to an article, or `None` when the item has
    /// no usable title. Id resolution: non-empty guid, else non-empty link,
    /// else a fresh unique token. Body falls back to the excerpt when the
    /// encoded content is absent, so the two may be identical.
    fn into_article(self) -> Option<Article> {
        let title = self.title.filter(|t| !t.is_empty())?;

        let link = self.link.filter(|l| !l.is_empty());
        let id = self
            .guid
            .filter(|g| !g.is_empty())
            .or_else(|| link.clone())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let excerpt = self.description.unwrap_or_default();
        let content_html = match self.content_encoded {
            Some(encoded) if !encoded.is_empty() => encoded,
            _ => excerpt.clone(),
        };
        let published_at = self
            .pub_date
            .as_deref()
            .and_then(parse_pub_date)
            .unwrap_or_else(Utc::now);

        Some(Article {
            id,
            title,
            excerpt,
            content_html,
            published_at,
            url: link.unwrap_or_default(),
            author: None,
            image_url: None,
            tags: Vec::new(),
            reading_time_minutes: None,
        })
    }
}

fn parse_pub_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(s, PUB_DATE_FORMAT)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
