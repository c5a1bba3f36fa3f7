//! KnowledgeLink: a Zellij plugin client for a personal link knowledge base.
//!
//! The plugin lets a signed-in user save URLs (the backend scrapes and summarizes
//! them), browse the saved collection, and ask natural-language questions that
//! come back as relevance-ranked links.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← host calls only
//! └─────────────────────────────────────────────────────┘
//!                        │ Events ↓   ↑ Actions
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Session gate → Link store, Search overlay        │
//! │  - Event routing, alerts, view model computation    │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────┐   ┌──────────────────────────┐
//! │ Backend (backend/)    │   │ UI Layer (ui/)           │
//! │ - Endpoints, requests │   │ - Components, theming    │
//! │ - Reply decoding      │   │ - OSC 8 hyperlinks       │
//! │ - Timeouts, ids       │   │                          │
//! └───────────────────────┘   └──────────────────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Infrastructure (paths)        │
//! └─────────────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing + OpenTelemetry, OTLP JSON file export   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/knowledgelink.wasm" {
//!         server_url "http://localhost:3000"
//!         api_base ""
//!         sign_in_provider "google"
//!         request_timeout_secs "30"
//!         session_poll_secs "15"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use knowledgelink::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! let request = actions[0].request().unwrap();
//! assert_eq!(request.url, "http://localhost:3000/api/auth/session");
//! # Ok::<(), knowledgelink::KnowledgeLinkError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod backend;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use backend::{ApiClient, Endpoints, Reply, RequestContext};
pub use domain::{KnowledgeLinkError, Link, Result, ScoredLink, Session, SessionStatus};
pub use ui::Theme;

use std::collections::BTreeMap;

const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
const DEFAULT_PROVIDER: &str = "google";
const DEFAULT_OPEN_COMMAND: &str = "xdg-open";
const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;
const DEFAULT_SESSION_POLL_SECS: u32 = 15;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Origin of the identity service (and, by default, of the link backend).
    ///
    /// Must be an absolute `http` or `https` URL. Default: `http://localhost:3000`
    pub server_url: String,

    /// Path prefix of the link backend on `server_url`. Default: empty
    pub api_base: String,

    /// Identity provider used for interactive sign-in. Default: `google`
    pub sign_in_provider: String,

    /// Value forwarded as the `Cookie` header on every request.
    pub session_cookie: Option<String>,

    /// Seconds before an in-flight request is abandoned. Default: 30
    pub request_timeout_secs: u32,

    /// Seconds between session re-checks. Default: 15
    pub session_poll_secs: u32,

    /// Host command used to open URLs in a browser. Default: `xdg-open`
    pub open_command: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` refers to the home directory.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_base: String::new(),
            sign_in_provider: DEFAULT_PROVIDER.to_string(),
            session_cookie: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_poll_secs: DEFAULT_SESSION_POLL_SECS,
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing, blank or invalid values fall back to their defaults; an invalid
    /// `server_url` is logged.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use knowledgelink::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("server_url".to_string(), "https://kl.example.com/".to_string());
    /// map.insert("request_timeout_secs".to_string(), "10".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.server_url, "https://kl.example.com");
    /// assert_eq!(config.request_timeout_secs, 10);
    /// assert_eq!(config.session_poll_secs, 15);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };
        let seconds = |key: &str, default: u32| {
            text(key)
                .and_then(|value| value.parse::<u32>().ok())
                .filter(|&secs| secs > 0)
                .unwrap_or(default)
        };

        let server_url = text("server_url").map_or_else(
            || DEFAULT_SERVER_URL.to_string(),
            |raw| {
                parse_server_url(&raw).unwrap_or_else(|e| {
                    tracing::warn!(server_url = %raw, error = %e, "invalid server_url, using default");
                    DEFAULT_SERVER_URL.to_string()
                })
            },
        );

        Self {
            server_url,
            api_base: text("api_base").unwrap_or_default(),
            sign_in_provider: text("sign_in_provider").unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
            session_cookie: text("session_cookie"),
            request_timeout_secs: seconds("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS),
            session_poll_secs: seconds("session_poll_secs", DEFAULT_SESSION_POLL_SECS),
            open_command: text("open_command").unwrap_or_else(|| DEFAULT_OPEN_COMMAND.to_string()),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// The service locations this configuration points at.
    #[must_use]
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.server_url, &self.api_base, self.session_cookie.clone())
    }
}

/// Validates an identity-server origin and strips trailing slashes.
///
/// # Errors
///
/// [`KnowledgeLinkError::InvalidUrl`] if it does not parse,
/// [`KnowledgeLinkError::Config`] if it is not `http`/`https`.
pub fn parse_server_url(raw: &str) -> Result<String> {
    let url = url::Url::parse(raw.trim())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(KnowledgeLinkError::Config(format!(
            "server_url must use http or https, got {}",
            url.scheme()
        )));
    }
    Ok(raw.trim().trim_end_matches('/').to_string())
}

/// Loads the configured theme: file first, then name, then the default.
#[must_use]
pub fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        match Theme::from_file(&path) {
            Ok(theme) => return theme,
            Err(e) => tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, using default"),
        }
    }

    config.theme_name.as_deref().map_or_else(Theme::default, |name| {
        Theme::from_name(name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %name, "unknown theme, using default");
            Theme::default()
        })
    })
}

/// Builds the initial application state from configuration.
///
/// The state starts on the loading surface; the first session check goes out
/// once the host grants permissions.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(server_url = %config.server_url, api_base = %config.api_base, "initializing knowledgelink plugin");

    let client = ApiClient::new(config.endpoints(), config.request_timeout_secs);
    AppState::new(
        client,
        config.session_poll_secs,
        config.sign_in_provider.clone(),
        load_theme(config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults_when_empty() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("server_url", "not a url"),
            ("request_timeout_secs", "0"),
            ("session_poll_secs", "soon"),
            ("sign_in_provider", "  "),
        ]));
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.session_poll_secs, DEFAULT_SESSION_POLL_SECS);
        assert_eq!(config.sign_in_provider, DEFAULT_PROVIDER);
    }

    #[test]
    fn server_url_must_be_http() {
        assert!(matches!(parse_server_url("ftp://example.com"), Err(KnowledgeLinkError::Config(_))));
        assert!(matches!(parse_server_url("example.com"), Err(KnowledgeLinkError::InvalidUrl(_))));
        assert_eq!(parse_server_url(" https://example.com// ").unwrap(), "https://example.com");
    }

    #[test]
    fn unknown_theme_uses_default() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&config), Theme::default());
    }

    #[test]
    fn missing_theme_file_falls_back_to_name() {
        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&config).name, "catppuccin-latte");
    }
}
