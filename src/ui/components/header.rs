//! Header component renderer.
//!
//! Title and greeting, both centered, with optional header background.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the two-line header at `row`. Returns the next free row.
///
/// ```text
/// [padding] KnowledgeLink [padding]
/// [padding] Welcome, Ada  [padding]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let mut title_style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        title_style.push_str(&Theme::bg(bg));
    }

    print_centered(row, &header.title, &title_style, cols);
    print_centered(row + 1, &header.subtitle, &Theme::fg(&theme.colors.text_dim), cols);
    row + 2
}
