//! Composable UI component renderers.
//!
//! # Components
//!
//! - `header`: Title and greeting
//! - `footer`: Keybinding hints
//! - `input`: URL bar and search bar boxes
//! - `cards`: Link card list
//! - `empty`: Empty list, loading and sign-in surfaces
//! - `alert`: Modal alert box
//!
//! # Main Layout
//!
//! ```text
//! [blank line]
//! [Header title]
//! [Header greeting]
//! [Border]
//! [URL bar - 3 lines]
//! [Search bar - 3 lines]
//! [List title]
//! [Cards]
//! [Border]
//! [Footer]
//! ```

mod alert;
mod cards;
mod empty;
mod footer;
mod header;
mod input;

pub use alert::render_alert;
pub use cards::CARD_INDENT;
pub use empty::{render_loading, render_sign_in};
pub use footer::render_footer;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::MainView;

use cards::{render_cards, render_list_title};
use empty::render_empty_state;
use header::render_header;
use input::render_input_bar;

/// First row of the card area in the main layout.
pub const CARDS_FIRST_ROW: usize = 12;

/// Rows of the main layout not available to cards.
pub const MAIN_CHROME_ROWS: usize = CARDS_FIRST_ROW + 1;

/// Renders a horizontal border line at `row`. Returns the next row.
pub fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the signed-in surface above the footer.
pub fn render_main(view: &MainView, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &view.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_input_bar(current_row, &view.url_bar, theme, cols);
    current_row = render_input_bar(current_row, &view.search_bar, theme, cols);
    current_row = render_list_title(current_row, &view.list, theme, cols);

    if let Some(empty) = &view.list.empty_state {
        render_empty_state(current_row, empty, theme, cols);
        return;
    }

    let last_card_row = rows.saturating_sub(2);
    render_cards(current_row, &view.list.cards, theme, cols, last_card_row);
}
