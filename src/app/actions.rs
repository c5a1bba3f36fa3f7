//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. Actions are
//! the boundary between pure state transitions and effectful host calls: web
//! requests, opening a browser, hiding the pane.
//!
//! # Example
//!
//! ```rust
//! use knowledgelink::Action;
//!
//! let actions = vec![Action::OpenUrl { url: "https://www.rust-lang.org".to_string() }];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::backend::OutgoingRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a web request through the host. The reply arrives later as an
    /// [`Event::Response`](crate::app::Event::Response) carrying the same context.
    SendRequest(OutgoingRequest),

    /// Opens a URL in the user's browser (a new context, outside the terminal).
    ///
    /// Used for interactive sign-in and for following saved links.
    OpenUrl {
        /// Absolute URL to open.
        url: String,
    },
}

impl Action {
    /// Returns the request when this action sends one.
    #[must_use]
    pub const fn request(&self) -> Option<&OutgoingRequest> {
        match self {
            Self::SendRequest(request) => Some(request),
            Self::CloseFocus | Self::OpenUrl { .. } => None,
        }
    }
}
