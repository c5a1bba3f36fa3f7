//! View model types representing renderable UI state.
//!
//! View models are computed from application state by `AppState::compute_viewmodel()`
//! and consumed by the renderer. They contain no business logic, only display-ready
//! data: wrapped summaries, the visible window of cards, and which surface to draw.
//!
//! # Example
//!
//! ```rust
//! use knowledgelink::ui::viewmodel::{EmptyState, FooterInfo, Screen, UIViewModel};
//!
//! let vm = UIViewModel {
//!     screen: Screen::Loading { spinner: '⠋', message: "Checking session".to_string() },
//!     footer: FooterInfo { keybindings: "q: hide".to_string() },
//!     alert: None,
//! };
//! assert!(vm.alert.is_none());
//! # let _ = EmptyState { message: String::new(), subtitle: String::new() };
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Which surface fills the pane.
    pub screen: Screen,

    /// Footer information (keybindings for the current mode).
    pub footer: FooterInfo,

    /// Modal alert drawn over everything else.
    pub alert: Option<AlertInfo>,
}

/// The surface chosen by the session gate.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Session status not yet known.
    Loading {
        spinner: char,
        message: String,
    },

    /// Signed out: the sign-in call to action.
    SignIn(SignInInfo),

    /// Signed in: inputs and the link list.
    Main(MainView),
}

/// Sign-in surface content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInInfo {
    pub title: String,
    pub tagline: String,
    pub button: String,
}

/// Main surface content.
#[derive(Debug, Clone, PartialEq)]
pub struct MainView {
    pub header: HeaderInfo,
    pub url_bar: InputBarInfo,
    pub search_bar: InputBarInfo,
    pub list: ListPanel,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,

    /// Greeting line under the title.
    pub subtitle: String,
}

/// One of the two text inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBarInfo {
    /// Label drawn into the top border.
    pub label: String,

    /// Current text.
    pub text: String,

    /// Shown dimmed while `text` is empty.
    pub placeholder: String,

    /// Whether the input has keyboard focus.
    pub focused: bool,

    /// Progress label with spinner while the bar's request is in flight.
    pub busy: Option<String>,
}

/// The visible link list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPanel {
    /// "Your Saved Links" or "Search Results", with count.
    pub title: String,

    /// Cards inside the visible window.
    pub cards: Vec<DisplayItem>,

    /// Shown instead of cards when nothing is saved yet.
    pub empty_state: Option<EmptyState>,

    /// Cards hidden above the window.
    pub hidden_above: usize,

    /// Cards hidden below the window.
    pub hidden_below: usize,
}

/// Display information for a single link card.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    /// Title, or the URL when the link has none. Truncated to fit.
    pub title: String,

    /// Target of the title hyperlink. `None` when the URL is unsafe to embed.
    pub url: Option<String>,

    /// Favicon service URL for the link's domain. `None` when unsafe to embed.
    pub favicon_url: Option<String>,

    /// Host name shown next to the title.
    pub domain: Option<String>,

    /// Summary wrapped to the card width.
    pub summary_lines: Vec<String>,

    /// "Relevance Score: 0.8765" for search results.
    pub relevance: Option<String>,

    /// Whether this item is currently selected.
    pub is_selected: bool,
}

impl DisplayItem {
    /// Rows the card occupies, including the spacer line after it.
    #[must_use]
    pub fn height(&self) -> usize {
        2 + self.summary_lines.len() + usize::from(self.relevance.is_some())
    }
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "a: add  /: search  q: hide").
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Modal alert content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertInfo {
    pub message: String,
    pub detail: Option<String>,
    pub hint: String,
}
