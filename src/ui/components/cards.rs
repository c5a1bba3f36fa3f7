//! Link card list renderer.
//!
//! Each card is a title line (favicon marker, hyperlinked title, domain), the
//! wrapped summary, the relevance score for search results, and a spacer line.

use crate::ui::helpers::{self, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, ListPanel};

/// Column where summary and score lines start.
pub const CARD_INDENT: usize = 4;

/// Renders the list title with its scroll indicators. Returns the next free row.
pub fn render_list_title(row: usize, list: &ListPanel, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("  {}", list.title);
    print!("{}", Theme::reset());

    let mut indicator = String::new();
    if list.hidden_above > 0 {
        indicator.push_str(&format!("↑ {} more  ", list.hidden_above));
    }
    if list.hidden_below > 0 {
        indicator.push_str(&format!("↓ {} more", list.hidden_below));
    }
    let indicator = indicator.trim_end();

    let used = 2 + width(&list.title);
    let gap = cols.saturating_sub(used + width(indicator) + 2);
    print!("{}", " ".repeat(gap));
    print!("{}{indicator}", Theme::fg(&theme.colors.text_dim));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders cards from `row`, never drawing past `last_row`. Returns the next free row.
pub fn render_cards(row: usize, cards: &[DisplayItem], theme: &Theme, cols: usize, last_row: usize) -> usize {
    let mut current_row = row;
    for card in cards {
        if current_row + card.height() - 1 > last_row {
            break;
        }
        current_row = render_card(current_row, card, theme, cols);
    }
    current_row
}

fn render_card(row: usize, card: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if card.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_bg));
        print!("▌ ");
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("  ");
        print!("{}", Theme::fg(&theme.colors.link_fg));
    }

    match &card.favicon_url {
        Some(favicon) => print!("{} ", helpers::hyperlink(favicon, "◆")),
        None => print!("◆ "),
    }
    print!("{}", Theme::bold());
    match &card.url {
        Some(url) => print!("{}", helpers::hyperlink(url, &card.title)),
        None => print!("{}", card.title),
    }
    print!("{}", Theme::reset());

    let mut used = 4 + width(&card.title);
    if let Some(domain) = &card.domain {
        let remaining = cols.saturating_sub(used + 2);
        if remaining > 3 {
            let domain = helpers::truncate(domain, remaining);
            print!("  {}{domain}", Theme::fg(&theme.colors.text_dim));
            used += 2 + width(&domain);
        }
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    for line in &card.summary_lines {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(CARD_INDENT));
        print!("{}{line}", Theme::fg(&theme.colors.text_dim));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    if let Some(relevance) = &card.relevance {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(CARD_INDENT));
        print!("{}{relevance}", Theme::fg(&theme.colors.score_fg));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row + 1
}
