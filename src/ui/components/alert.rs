//! Modal alert renderer.

use crate::ui::helpers::{center_padding, position_cursor, width, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::AlertInfo;

const MAX_ALERT_WIDTH: usize = 60;

/// Draws a bordered alert box centered over whatever is already on screen.
pub fn render_alert(alert: &AlertInfo, theme: &Theme, rows: usize, cols: usize) {
    let box_width = cols.saturating_sub(4).min(MAX_ALERT_WIDTH);
    let inner_width = box_width.saturating_sub(4);
    if inner_width == 0 {
        return;
    }

    let mut body: Vec<(String, String)> = wrap(&alert.message, inner_width, 3)
        .into_iter()
        .map(|line| (line, format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.alert_fg))))
        .collect();
    if let Some(detail) = &alert.detail {
        body.push((String::new(), String::new()));
        body.extend(
            wrap(detail, inner_width, 4)
                .into_iter()
                .map(|line| (line, Theme::fg(&theme.colors.text_normal))),
        );
    }
    body.push((String::new(), String::new()));
    body.push((alert.hint.clone(), Theme::fg(&theme.colors.text_dim)));

    let height = body.len() + 2;
    let top = (rows.saturating_sub(height) / 2).max(1);
    let left = center_padding(cols, box_width) + 1;
    let border = Theme::fg(&theme.colors.alert_border);

    position_cursor(top, left);
    print!("{border}╭{}╮{}", "─".repeat(box_width.saturating_sub(2)), Theme::reset());

    for (offset, (line, style)) in body.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{border}│ {}", Theme::reset());
        print!("{style}{line}{}", Theme::reset());
        print!("{}", " ".repeat(inner_width.saturating_sub(width(line))));
        print!("{border} │{}", Theme::reset());
    }

    position_cursor(top + height - 1, left);
    print!("{border}╰{}╯{}", "─".repeat(box_width.saturating_sub(2)), Theme::reset());
}
