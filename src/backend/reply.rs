//! Replies from the host and their decoding.

use super::context::RequestContext;
use crate::domain::error::{KnowledgeLinkError, Result};
use crate::domain::{Link, ScoredLink, Session};
use serde::Deserialize;

/// A completed host web request, routed back by its context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub context: RequestContext,
    pub status: u16,
    pub body: Vec<u8>,
}

/// FastAPI-style error body.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl Reply {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Fails with [`KnowledgeLinkError::Http`] unless the status is 2xx.
    ///
    /// # Errors
    ///
    /// Returns the status and any `detail` message from the body.
    pub fn ensure_success(&self) -> Result<()> {
        if self.is_success() {
            return Ok(());
        }

        let detail = serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .map(|body| match body.detail {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            });

        Err(KnowledgeLinkError::Http {
            status: self.status,
            detail,
        })
    }

    /// Decodes a list-links reply.
    ///
    /// # Errors
    ///
    /// Non-2xx status or a body that is not an array of links.
    pub fn saved_links(&self) -> Result<Vec<Link>> {
        self.ensure_success()?;
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decodes a search reply. Every entry must carry a score.
    ///
    /// # Errors
    ///
    /// Non-2xx status or a body that is not an array of scored links.
    pub fn search_hits(&self) -> Result<Vec<ScoredLink>> {
        self.ensure_success()?;
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decodes a session reply. `{}`, `null` and an empty body mean no session.
    ///
    /// # Errors
    ///
    /// Non-2xx status or a malformed session object.
    pub fn session(&self) -> Result<Option<Session>> {
        self.ensure_success()?;

        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let value: serde_json::Value = serde_json::from_slice(&self.body)?;
        let has_user = value.get("user").is_some_and(|user| !user.is_null());
        if !has_user {
            return Ok(None);
        }

        Ok(Some(serde_json::from_value(value)?))
    }

    /// Checks a create-link acknowledgement. The body is ignored.
    ///
    /// # Errors
    ///
    /// Non-2xx status.
    pub fn acknowledgement(&self) -> Result<()> {
        self.ensure_success()
    }
}
