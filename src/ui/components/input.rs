//! Input box renderer for the URL bar and the search bar.

use crate::ui::helpers::{position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputBarInfo;

/// Horizontal margin for input boxes (spaces on left and right).
const INPUT_BOX_MARGIN: usize = 2;

/// Renders a 3-line bordered input box at `row`. Returns the next free row.
///
/// ```text
/// ┌─ Add a link ─────────────────────┐
/// │ https://example.com█   ⠋ Adding… │
/// └──────────────────────────────────┘
/// ```
///
/// The focused box uses `input_focus_border` and shows a block cursor. Long
/// text keeps its tail visible, the way a single-line editor scrolls.
pub fn render_input_bar(row: usize, bar: &InputBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if bar.focused {
        &theme.colors.input_focus_border
    } else {
        &theme.colors.input_border
    };

    let label = truncate(&format!(" {} ", bar.label), inner_width.saturating_sub(1));
    let label_len = width(&label);

    position_cursor(row, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌─");
    if bar.focused {
        print!("{}", Theme::bold());
    }
    print!("{label}");
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(border));
    print!("{}┐", "─".repeat(inner_width.saturating_sub(label_len + 1)));
    print!("{}", Theme::reset());

    let busy = bar.busy.as_deref().map(|busy| format!(" {busy} ")).unwrap_or_default();
    let busy_len = width(&busy);
    let cursor = if bar.focused { "█" } else { "" };
    let text_room = inner_width.saturating_sub(busy_len + 2 + width(cursor));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}│ ", Theme::fg(border));

    let shown_len = if bar.text.is_empty() && !bar.focused {
        let placeholder = truncate(&bar.placeholder, text_room);
        print!("{}{}{placeholder}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
        width(&placeholder)
    } else {
        let skip = width(&bar.text).saturating_sub(text_room);
        let visible: String = bar.text.chars().skip(skip).collect();
        print!("{}{visible}{cursor}", Theme::fg(&theme.colors.text_normal));
        width(&visible) + width(cursor)
    };
    print!("{}", Theme::reset());

    print!("{}", " ".repeat(inner_width.saturating_sub(shown_len + busy_len + 1)));
    print!("{}{busy}", Theme::fg(&theme.colors.spinner_fg));
    print!("{}│", Theme::fg(border));
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
