//! Link domain models.
//!
//! Saved links and search hits are distinct types: a relevance score only exists in
//! the context of one query, so [`Link`] has no score field at all and [`ScoredLink`]
//! always carries one. The two collections can never be mixed up by construction.

use crate::backend::encode_query_component;
use serde::{Deserialize, Deserializer, Serialize};

/// Image service used to fetch favicons. Keyed by domain, 16px icons.
const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

/// A saved link as returned by the backend's list operation.
///
/// `title` and `summary` may be empty; the backend owns both. Missing or `null`
/// values decode as empty. Extra fields in the payload (including a stray `score`)
/// are ignored when decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Link {
    /// Creates a link from its three display fields.
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            summary: summary.into(),
        }
    }

    /// Returns the host part of the link's URL, if it parses.
    ///
    /// # Examples
    ///
    /// ```
    /// use knowledgelink::Link;
    ///
    /// let link = Link::new("https://doc.rust-lang.org/book/", "The Book", "");
    /// assert_eq!(link.domain().as_deref(), Some("doc.rust-lang.org"));
    /// assert_eq!(Link::new("not a url", "", "").domain(), None);
    /// ```
    #[must_use]
    pub fn domain(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_string))
    }

    /// Builds the favicon image URL for this link.
    ///
    /// Falls back to keying the service by the raw URL when no domain can be
    /// extracted; a broken icon is acceptable.
    #[must_use]
    pub fn favicon_url(&self) -> String {
        let key = self.domain().unwrap_or_else(|| self.url.clone());
        format!("{FAVICON_SERVICE}?domain={}&sz=16", encode_query_component(&key))
    }

    /// Title to display, falling back to the URL while the backend has none.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

/// A ranked search hit: a link plus its relevance score for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLink {
    #[serde(flatten)]
    pub link: Link,
    pub score: f64,
}

impl ScoredLink {
    /// Formats the score the way the result cards display it.
    ///
    /// # Examples
    ///
    /// ```
    /// use knowledgelink::{Link, ScoredLink};
    ///
    /// let hit = ScoredLink { link: Link::new("a", "A", "..."), score: 0.91 };
    /// assert_eq!(hit.relevance_label(), "Relevance Score: 0.9100");
    /// ```
    #[must_use]
    pub fn relevance_label(&self) -> String {
        format!("Relevance Score: {:.4}", self.score)
    }
}
