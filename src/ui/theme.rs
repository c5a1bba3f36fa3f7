//! Theme management and ANSI escape sequence generation.
//!
//! Themes are either built in (the default `knowledgelink` palette plus two
//! Catppuccin variants embedded from `themes/`) or loaded from a TOML file.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#c7d2fe"
//! selection_fg = "#0f172a"
//! selection_bg = "#818cf8"
//! text_normal = "#e2e8f0"
//! text_dim = "#64748b"
//! border = "#334155"
//! input_border = "#475569"
//! input_focus_border = "#818cf8"
//! link_fg = "#a5b4fc"
//! score_fg = "#facc15"
//! empty_state_fg = "#93c5fd"
//! spinner_fg = "#818cf8"
//! alert_border = "#f87171"
//! alert_fg = "#fecaca"
//! button_fg = "#0f172a"
//! button_bg = "#6366f1"
//! ```
//!
//! # Example
//!
//! ```rust
//! use knowledgelink::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! println!("{}", Theme::fg(&theme.colors.header_fg));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{KnowledgeLinkError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. "#cdd6f4").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card foreground color.
    pub selection_fg: String,
    /// Selected card background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, summaries, placeholders).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Unfocused input box border.
    pub input_border: String,
    /// Focused input box border.
    pub input_focus_border: String,

    /// Link titles and domains.
    pub link_fg: String,
    /// Relevance score of search results.
    pub score_fg: String,

    /// Empty state message color.
    pub empty_state_fg: String,
    /// Progress spinner color.
    pub spinner_fg: String,

    /// Alert box border.
    pub alert_border: String,
    /// Alert message text.
    pub alert_fg: String,

    /// Sign-in button text.
    pub button_fg: String,
    /// Sign-in button fill.
    pub button_bg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `knowledgelink`, `catppuccin-mocha`, `catppuccin-latte`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "knowledgelink" => return Some(Self::default()),
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(theme = %name, error = %e, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeLinkError::Io`] if the file cannot be read and
    /// [`KnowledgeLinkError::Theme`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents).map_err(|e| KnowledgeLinkError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB. Unparseable colors come out white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Clears all styling (colors, bold, dim, underline).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The `knowledgelink` palette: slate background tones with indigo accents.
    fn default() -> Self {
        Self {
            name: "knowledgelink".to_string(),
            colors: ThemeColors {
                header_fg: "#c7d2fe".to_string(),
                header_bg: None,
                selection_fg: "#0f172a".to_string(),
                selection_bg: "#818cf8".to_string(),
                text_normal: "#e2e8f0".to_string(),
                text_dim: "#64748b".to_string(),
                border: "#334155".to_string(),
                input_border: "#475569".to_string(),
                input_focus_border: "#818cf8".to_string(),
                link_fg: "#a5b4fc".to_string(),
                score_fg: "#facc15".to_string(),
                empty_state_fg: "#93c5fd".to_string(),
                spinner_fg: "#818cf8".to_string(),
                alert_border: "#f87171".to_string(),
                alert_fg: "#fecaca".to_string(),
                button_fg: "#0f172a".to_string(),
                button_bg: "#6366f1".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        for name in ["knowledgelink", "catppuccin-mocha", "catppuccin-latte"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn hex_colors_become_escape_sequences() {
        assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
        assert_eq!(Theme::bg("000000"), "\u{1b}[48;2;0;0;0m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn loads_theme_file() {
        let default = toml::to_string(&Theme::default()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(default.replace("knowledgelink", "custom").as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "custom");
    }

    #[test]
    fn rejects_incomplete_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"broken\"\n").unwrap();

        assert!(matches!(Theme::from_file(file.path()), Err(KnowledgeLinkError::Theme(_))));
    }
}
