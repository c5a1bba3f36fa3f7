//! Centered message surfaces: the empty list, loading, and sign-in.

use crate::ui::helpers::{print_centered as centered, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyState, SignInInfo};

/// Renders the empty state message at `row`, subtitle on the line below.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    centered(row + 1, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);
    centered(
        row + 2,
        &empty.subtitle,
        &format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim)),
        cols,
    );
}

/// Renders a spinner and message in the middle of the pane.
pub fn render_loading(spinner: char, message: &str, theme: &Theme, rows: usize, cols: usize) {
    let row = (rows / 2).max(1);
    let text = format!("{spinner} {message}");
    centered(row, &text, &Theme::fg(&theme.colors.spinner_fg), cols);
}

/// Renders the sign-in call to action.
///
/// ```text
///          KnowledgeLink
///   Your personal, AI-powered ...
///
///       [ Sign in with Google ]
/// ```
pub fn render_sign_in(info: &SignInInfo, theme: &Theme, rows: usize, cols: usize) {
    let row = (rows / 2).saturating_sub(2).max(2);

    centered(
        row,
        &info.title,
        &format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg)),
        cols,
    );
    let tagline = wrap(&info.tagline, cols.saturating_sub(4), 3);
    for (offset, line) in tagline.iter().enumerate() {
        centered(row + 1 + offset, line, &Theme::fg(&theme.colors.text_dim), cols);
    }
    centered(
        row + 2 + tagline.len(),
        &format!("  {}  ", info.button),
        &format!(
            "{}{}{}",
            Theme::bold(),
            Theme::fg(&theme.colors.button_fg),
            Theme::bg(&theme.colors.button_bg)
        ),
        cols,
    );
}
