//! View model computation.
//!
//! The session gate picks the surface; on the main surface the search overlay picks
//! the list, and cards are windowed so the selection always stays on screen.

use super::modes::InputMode;
use super::search::ListSelection;
use super::state::AppState;
use crate::domain::{Link, SessionStatus};
use crate::ui::components::{CARD_INDENT, MAIN_CHROME_ROWS};
use crate::ui::helpers::{hyperlink_target, sanitize, spinner, truncate, wrap};
use crate::ui::viewmodel::{
    AlertInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, InputBarInfo, ListPanel, MainView, Screen,
    SignInInfo, UIViewModel,
};

/// Summary lines kept per card.
const MAX_SUMMARY_LINES: usize = 3;

impl AppState {
    /// Computes a renderable view model for a pane of `rows` x `cols` cells.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let screen = match self.gate.status() {
            SessionStatus::Loading => Screen::Loading {
                spinner: spinner(self.spinner_frame),
                message: "Checking your session...".to_string(),
            },
            SessionStatus::Unauthenticated => Screen::SignIn(SignInInfo {
                title: "Welcome to KnowledgeLink".to_string(),
                tagline: "Your personal, searchable knowledge base. Save links, get AI summaries, and find what you need with natural language.".to_string(),
                button: format!("Sign in with {}", capitalize(&self.sign_in_provider)),
            }),
            SessionStatus::Authenticated(session) => Screen::Main(MainView {
                header: HeaderInfo {
                    title: "KnowledgeLink".to_string(),
                    subtitle: format!("Welcome, {}", sanitize(session.display_name())),
                },
                url_bar: self.compute_url_bar(),
                search_bar: self.compute_search_bar(),
                list: self.compute_list(rows, cols),
            }),
        };

        let alert = self.alert.as_ref().map(|alert| AlertInfo {
            message: alert.message.clone(),
            detail: alert.detail.as_deref().map(sanitize),
            hint: "Press Enter or Esc to dismiss".to_string(),
        });

        UIViewModel {
            screen,
            footer: self.compute_footer(),
            alert,
        }
    }

    fn compute_url_bar(&self) -> InputBarInfo {
        InputBarInfo {
            label: "Add a link".to_string(),
            text: self.url_input.clone(),
            placeholder: "Paste a URL to save and summarize... (a)".to_string(),
            focused: self.input_mode == InputMode::EditingUrl,
            busy: self
                .links
                .ingestion_in_progress()
                .then(|| format!("{} Adding...", spinner(self.spinner_frame))),
        }
    }

    fn compute_search_bar(&self) -> InputBarInfo {
        InputBarInfo {
            label: "Search".to_string(),
            text: self.search.query().to_string(),
            placeholder: "Ask a question about your links... (/)".to_string(),
            focused: self.input_mode == InputMode::EditingQuery,
            busy: self
                .search
                .search_in_progress()
                .then(|| format!("{} Searching...", spinner(self.spinner_frame))),
        }
    }

    fn compute_list(&self, rows: usize, cols: usize) -> ListPanel {
        let selection = self.visible();
        let mut title = format!("{} ({})", selection.title(), selection.len());
        if self.links.is_refreshing() && matches!(selection, ListSelection::SavedLinks(_)) {
            title.push_str(&format!(" {}", spinner(self.spinner_frame)));
        }

        let empty_state = if selection.shows_empty_state() {
            Some(EmptyState {
                message: "You haven't saved any links yet.".to_string(),
                subtitle: "Press 'a' and paste a URL to get started!".to_string(),
            })
        } else if selection.is_empty() && !self.search.search_in_progress() {
            Some(EmptyState {
                message: "No links match your question.".to_string(),
                subtitle: "Press Enter in the search bar to ask, or 'c' to clear.".to_string(),
            })
        } else {
            None
        };

        if selection.is_empty() {
            return ListPanel {
                title,
                cards: vec![],
                empty_state,
                hidden_above: 0,
                hidden_below: 0,
            };
        }

        let cards: Vec<DisplayItem> = (0..selection.len())
            .filter_map(|index| selection.get(index).map(|entry| (index, entry)))
            .map(|(index, (link, score))| self.compute_display_item(link, score, index, cols))
            .collect();

        let available = rows.saturating_sub(MAIN_CHROME_ROWS);
        let (start, end) = window(&cards, self.selected_index, available);
        let total = cards.len();

        ListPanel {
            title,
            cards: cards.into_iter().skip(start).take(end - start).collect(),
            empty_state: None,
            hidden_above: start,
            hidden_below: total - end,
        }
    }

    fn compute_display_item(&self, link: &Link, score: Option<f64>, index: usize, cols: usize) -> DisplayItem {
        const TITLE_PREFIX: usize = 4;

        let text_width = cols.saturating_sub(CARD_INDENT + 2);

        // Titles, summaries and URLs come from scraped pages.
        DisplayItem {
            title: truncate(&sanitize(link.display_title()), cols.saturating_sub(TITLE_PREFIX + 1)),
            url: hyperlink_target(&link.url),
            favicon_url: hyperlink_target(&link.favicon_url()),
            domain: link.domain().map(|domain| sanitize(&domain)),
            summary_lines: wrap(&sanitize(&link.summary), text_width, MAX_SUMMARY_LINES),
            relevance: score.map(|score| format!("Relevance Score: {score:.4}")),
            is_selected: index == self.selected_index,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.alert.is_some() {
            "Enter/Esc: dismiss"
        } else {
            match (self.gate.status(), self.input_mode) {
                (SessionStatus::Loading, _) => "q: hide",
                (SessionStatus::Unauthenticated, _) => "Enter: sign in  q: hide",
                (SessionStatus::Authenticated(_), InputMode::EditingUrl) => {
                    if self.links.ingestion_in_progress() {
                        "Type a URL  Esc: back  (adding in progress)"
                    } else {
                        "Type a URL  Enter: add link  Esc: back"
                    }
                }
                (SessionStatus::Authenticated(_), InputMode::EditingQuery) => "Type a question  Enter: search  Esc: back",
                (SessionStatus::Authenticated(_), InputMode::Normal) => {
                    "j/k: navigate  Enter/o: open  a: add  /: search  c: clear  r: refresh  x: cancel  L: sign out  q: hide"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Window `[start, end)` of cards that fits in `available` rows and contains `selected`.
///
/// Scrolls just enough to keep the selection visible, preferring to fill the
/// space below it. At least the selected card is always included.
fn window(cards: &[DisplayItem], selected: usize, available: usize) -> (usize, usize) {
    if cards.is_empty() {
        return (0, 0);
    }

    let selected = selected.min(cards.len() - 1);
    let height = |range: std::ops::Range<usize>| -> usize { cards[range].iter().map(DisplayItem::height).sum() };

    let mut start = 0;
    while start < selected && height(start..selected + 1) > available {
        start += 1;
    }

    let mut end = selected + 1;
    while end < cards.len() && height(start..end + 1) <= available {
        end += 1;
    }

    (start, end)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
