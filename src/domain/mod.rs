//! Domain layer for the KnowledgeLink plugin.
//!
//! Core types independent of Zellij APIs: links and search hits, sessions, and the
//! crate error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`link`]: Saved links and scored search hits
//! - [`session`]: Identity-service session model and status

pub mod error;
pub mod link;
pub mod session;

pub use error::{KnowledgeLinkError, Result};
pub use link::{Link, ScoredLink};
pub use session::{Session, SessionContext, SessionStatus, SessionUser};
