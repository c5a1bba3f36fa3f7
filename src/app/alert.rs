//! Blocking notices shown over the main surface.

use crate::domain::KnowledgeLinkError;

/// Message shown when a link could not be added.
pub const INGEST_FAILED: &str = "Failed to add link. Is the URL valid and public?";

/// A modal notice. While one is showing, only dismissal is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub detail: Option<String>,
}

impl Alert {
    /// Alert for a failed or abandoned ingestion.
    ///
    /// The backend's `detail` is shown when present, otherwise the error itself.
    #[must_use]
    pub fn ingestion_failed(error: &KnowledgeLinkError) -> Self {
        let detail = error.detail().map_or_else(|| error.to_string(), str::to_string);
        Self {
            message: INGEST_FAILED.to_string(),
            detail: Some(detail),
        }
    }
}
