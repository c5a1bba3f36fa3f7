//! Input mode state for the main surface.
//!
//! The main surface has two text inputs, the URL bar and the search bar. At most one
//! of them has focus; in [`InputMode::Normal`] keys navigate and trigger commands.
//!
//! # Example
//!
//! ```rust
//! use knowledgelink::InputMode;
//!
//! let mode = InputMode::EditingQuery;
//! assert!(mode.is_editing());
//! ```

/// Current input handling mode.
///
/// Controls which keybindings are active and which input bar shows a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and command mode.
    ///
    /// Available keybindings: j/k (navigate), a (add link), / (search),
    /// enter/o (open), r (refresh), c (clear search), x (cancel), L (sign out), q (quit).
    #[default]
    Normal,

    /// Typing into the URL bar. Enter submits the link for ingestion.
    EditingUrl,

    /// Typing into the search bar. Enter submits the query.
    EditingQuery,
}

impl InputMode {
    #[must_use]
    pub const fn is_editing(self) -> bool {
        matches!(self, Self::EditingUrl | Self::EditingQuery)
    }
}
