//! Application state: the three controllers plus the UI state they share.
//!
//! [`AppState`] is the single source of truth for everything rendered. The session
//! gate, link store and search overlay each own their data and in-flight requests;
//! the fields here hold what belongs to the surface itself (input buffers,
//! selection, the alert, the theme).

use super::alert::Alert;
use super::links::LinkStore;
use super::modes::InputMode;
use super::search::{ListSelection, SearchOverlay};
use super::session::SessionGate;
use crate::backend::ApiClient;
use crate::ui::theme::Theme;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Session status, epoch and polling.
    pub gate: SessionGate,

    /// Saved links and ingestions.
    pub links: LinkStore,

    /// Search query and results.
    pub search: SearchOverlay,

    /// Which input, if any, receives typed characters.
    pub input_mode: InputMode,

    /// URL bar contents. Cleared once the backend accepts the link.
    pub url_input: String,

    /// Zero-based index into the visible list. Wraps during navigation.
    pub selected_index: usize,

    /// Modal alert. While set, only dismissal is accepted.
    pub alert: Option<Alert>,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Identity provider used for interactive sign-in.
    pub sign_in_provider: String,

    /// Advanced on every tick while something is in flight.
    pub spinner_frame: usize,

    /// Issues every outgoing request.
    pub client: ApiClient,
}

impl AppState {
    /// Creates state in the loading surface. `poll_ticks` is the session re-check interval.
    #[must_use]
    pub fn new(client: ApiClient, poll_ticks: u32, sign_in_provider: impl Into<String>, theme: Theme) -> Self {
        Self {
            gate: SessionGate::new(poll_ticks),
            links: LinkStore::default(),
            search: SearchOverlay::default(),
            input_mode: InputMode::Normal,
            url_input: String::new(),
            selected_index: 0,
            alert: None,
            theme,
            sign_in_provider: sign_in_provider.into(),
            spinner_frame: 0,
            client,
        }
    }

    /// The list currently shown: search results while a query is present.
    #[must_use]
    pub fn visible(&self) -> ListSelection<'_> {
        self.search.select(self.links.links())
    }

    pub fn move_selection_down(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    pub fn move_selection_up(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Keeps the selection inside the visible list after it changed.
    pub fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected_index = if len == 0 { 0 } else { self.selected_index.min(len - 1) };
    }

    /// URL of the selected link, if any.
    #[must_use]
    pub fn selected_url(&self) -> Option<&str> {
        self.visible()
            .get(self.selected_index)
            .map(|(link, _)| link.url.as_str())
    }

    /// Whether anything the user can see is waiting on a reply.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.gate.is_checking()
            || self.links.ingestion_in_progress()
            || self.links.is_refreshing()
            || self.search.search_in_progress()
    }

    /// Drops everything shown for the previous session.
    pub fn reset_session_view(&mut self) {
        self.links.reset();
        self.search.reset();
        self.url_input.clear();
        self.input_mode = InputMode::Normal;
        self.selected_index = 0;
        self.alert = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Endpoints;

    fn state() -> AppState {
        let client = ApiClient::new(Endpoints::new("http://localhost:3000", "", None), 30);
        AppState::new(client, 15, "google", Theme::default())
    }

    #[test]
    fn navigation_on_empty_list_is_noop() {
        let mut state = state();
        state.move_selection_down();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        assert!(state.selected_url().is_none());
    }

    #[test]
    fn starts_idle_and_signed_out_of_view() {
        let state = state();
        assert!(!state.is_busy());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.alert.is_none());
    }
}
