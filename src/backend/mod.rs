//! Collaborator protocol for the identity service and the link backend.
//!
//! All requests go out through Zellij's host `web_request` and come back as
//! `WebRequestResult` events, so nothing here blocks or performs I/O itself.
//!
//! # Modules
//!
//! - `context`: Request ids, kinds and trace context carried through the host
//! - `endpoints`: URL construction and request building
//! - `pending`: In-flight request bookkeeping with timeouts
//! - `reply`: Decoding of host replies into domain types

pub mod context;
pub mod endpoints;
pub mod pending;
pub mod reply;

pub use context::{RequestContext, RequestId, RequestKind, TraceContext};
pub use endpoints::{encode_query_component, ApiClient, ApiRequest, Endpoints, HttpMethod, OutgoingRequest};
pub use pending::PendingRequest;
pub use reply::Reply;
