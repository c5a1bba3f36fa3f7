//! Application layer coordinating state, events, and actions.
//!
//! The layer is a sans-IO state machine: it never performs a request itself, it
//! returns [`Action`]s for the plugin shim and receives their outcomes back as
//! [`Event`]s.
//!
//! ```text
//! Keys/Timer → Events → handle_event → Controllers → Actions → Host calls
//!                 ↑                                              ↓
//!                 └──────────── Event::Response(Reply) ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`session`]: Session gate, polling and the session epoch
//! - [`links`]: Saved links and ingestion
//! - [`search`]: Search query, results and the view-selection rule
//! - [`alert`]: Blocking notices
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event routing and surface rules
//! - [`modes`]: Input focus
//! - [`state`]: Central application state
//! - `view`: View model computation

pub mod actions;
pub mod alert;
pub mod handler;
pub mod links;
pub mod modes;
pub mod search;
pub mod session;
pub mod state;
mod view;

pub use actions::Action;
pub use alert::Alert;
pub use handler::{handle_event, Event};
pub use links::{IngestOutcome, LinkStore};
pub use modes::InputMode;
pub use search::{ListSelection, SearchOverlay};
pub use session::{GateTransition, SessionGate};
pub use state::AppState;
