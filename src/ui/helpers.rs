//! Shared rendering utilities.
//!
//! Cursor positioning, OSC 8 hyperlinks, and width-aware text shaping. Widths are
//! counted in characters; every function here is UTF-8 safe.

use crate::ui::theme::Theme;

/// Braille spinner frames, advanced once per timer tick.
pub const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Spinner glyph for a frame counter.
#[must_use]
pub const fn spinner(frame: usize) -> char {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Wraps `text` in an OSC 8 hyperlink so supporting terminals make it clickable.
///
/// ```rust
/// use knowledgelink::ui::helpers::hyperlink;
///
/// assert_eq!(
///     hyperlink("https://example.com", "example"),
///     "\u{1b}]8;;https://example.com\u{1b}\\example\u{1b}]8;;\u{1b}\\"
/// );
/// ```
#[must_use]
pub fn hyperlink(url: &str, text: &str) -> String {
    format!("\u{1b}]8;;{url}\u{1b}\\{text}\u{1b}]8;;\u{1b}\\")
}

/// Removes terminal control characters from untrusted text.
///
/// Control whitespace (newlines, tabs) becomes a space so wrapping still sees a
/// word break; every other control character, ESC included, is dropped.
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            c if c.is_control() && c.is_whitespace() => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Returns `url` when it can be embedded in an OSC 8 sequence as is.
#[must_use]
pub fn hyperlink_target(url: &str) -> Option<String> {
    (!url.is_empty() && !url.chars().any(char::is_control)).then(|| url.to_string())
}

/// Character count, used as display width.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Truncates to `max` characters, ending in "..." when something was cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }

    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

/// Greedy word wrap into at most `max_lines` lines of `line_width` characters.
///
/// Words longer than a line are split. When text remains after the last line,
/// that line is truncated with "...".
#[must_use]
pub fn wrap(text: &str, line_width: usize, max_lines: usize) -> Vec<String> {
    if line_width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: String = word.to_string();

        loop {
            let needed = if current.is_empty() { width(&word) } else { width(&current) + 1 + width(&word) };
            if needed <= line_width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&word);
                break;
            }

            if current.is_empty() {
                let head: String = word.chars().take(line_width).collect();
                word = word.chars().skip(line_width).collect();
                lines.push(head);
            } else {
                lines.push(std::mem::take(&mut current));
            }

            if lines.len() == max_lines {
                return ellipsize_last(lines, line_width);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn ellipsize_last(mut lines: Vec<String>, line_width: usize) -> Vec<String> {
    if let Some(last) = lines.last_mut() {
        let kept = line_width.saturating_sub(3).min(width(last));
        *last = last.chars().take(kept).collect::<String>() + "...";
    }
    lines
}

/// Left padding that centers `content_width` within `cols`.
#[must_use]
pub const fn center_padding(cols: usize, content_width: usize) -> usize {
    cols.saturating_sub(content_width) / 2
}

/// Prints `text` centered on `row`, padded to the full width in `style`.
///
/// Text wider than the pane is truncated.
pub fn print_centered(row: usize, text: &str, style: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = width(&text);
    let padding = center_padding(cols, len);

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}
