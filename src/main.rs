//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the KnowledgeLink library
//! and the Zellij plugin system. It implements `ZellijPlugin`, turns host events
//! into library events, and executes the library's actions through host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` and `RunCommands`; the first session
//!    check goes out once they are granted
//! 3. **Timer**: A one-second timer drives request timeouts, session polling and
//!    the spinner, re-armed on every tick
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation, input and command events (depends on surface and mode)
//! - `WebRequestResult` → `Event::Response(Reply)`, routed by its request context
//! - `Timer` → `Event::Tick`
//! - `PermissionRequestResult` → `Event::PermissionsResult { granted }`
//! - `RunCommandResult` → logged (browser launches)
//!
//! # Keybindings
//!
//! Main surface, normal mode:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `a`: Edit the URL bar
//! - `/`: Edit the search bar
//! - `Enter`/`o`: Open selected link in the browser
//! - `r`: Refresh saved links
//! - `c`: Clear search
//! - `x`: Cancel search and ingestion in flight
//! - `L`: Sign out
//! - `q`/`Esc`: Hide plugin
//!
//! Editing either bar:
//! - Characters: Type
//! - `Backspace`: Delete
//! - `Enter`: Submit
//! - `Esc`: Leave the bar (text is kept)
//!
//! Sign-in surface: `Enter` signs in, `q` hides. Alert: `Enter`/`Esc` dismiss.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use knowledgelink::backend::{HttpMethod, OutgoingRequest};
use knowledgelink::{handle_event, Action, Config, Event, Reply, RequestContext, SessionStatus};

register_plugin!(State);

/// Seconds between timer events.
const TICK_SECS: f64 = 1.0;

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the host-facing settings the library does
/// not need.
struct State {
    /// Core application state from library layer.
    app: knowledgelink::AppState,

    /// Host command that opens URLs in a browser.
    open_command: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: knowledgelink::initialize(&default_config),
            open_command: default_config.open_command,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Identity service and link backend requests
    /// - `RunCommands`: Launch the browser for sign-in and saved links
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        knowledgelink::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(server_url = %config.server_url, "parsed configuration");
        self.app = knowledgelink::initialize(&config);
        self.open_command.clone_from(&config.open_command);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
            EventType::RunCommandResult,
        ]);

        set_timeout(TICK_SECS);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);

        // A reply continues the trace of the request that caused it, so its
        // remote parent has to be attached before the update span opens.
        let reply = match event {
            zellij_tile::prelude::Event::WebRequestResult(status, _, ref body, ref context) => {
                match RequestContext::from_map(context) {
                    Some(context) => Some(Reply {
                        context,
                        status,
                        body: body.clone(),
                    }),
                    None => {
                        tracing::debug!(status, "ignoring web request result without our context");
                        return false;
                    }
                }
            }
            _ => None,
        };
        let _parent = reply
            .as_ref()
            .and_then(|reply| reply.context.trace.as_ref())
            .and_then(knowledgelink::backend::TraceContext::attach);

        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = if let Some(reply) = reply {
            Event::Response(reply)
        } else {
            match event {
                zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                    Some(event) => event,
                    None => return false,
                },
                zellij_tile::prelude::Event::Timer(_) => {
                    set_timeout(TICK_SECS);
                    Event::Tick
                }
                zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                    granted: matches!(status, PermissionStatus::Granted),
                },
                zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, _context) => {
                    Self::log_command_result(exit_code, &stderr);
                    return false;
                }
                _ => return false,
            }
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::trace!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    self.execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        knowledgelink::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    ///
    /// Which keys mean what depends on the surface: an alert takes every key,
    /// then the session status picks the surface, then the input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if self.app.alert.is_some() {
            return match key.bare_key {
                BareKey::Enter | BareKey::Esc => Some(Event::DismissAlert),
                _ => None,
            };
        }

        match self.app.gate.status() {
            SessionStatus::Loading => match key.bare_key {
                BareKey::Char('q') | BareKey::Esc => Some(Event::CloseFocus),
                _ => None,
            },
            SessionStatus::Unauthenticated => match key.bare_key {
                BareKey::Enter => Some(Event::SignIn),
                BareKey::Char('q') | BareKey::Esc => Some(Event::CloseFocus),
                _ => None,
            },
            SessionStatus::Authenticated(_) => self.map_main_key(key),
        }
    }

    fn map_main_key(&self, key: &KeyWithModifier) -> Option<Event> {
        if self.app.input_mode.is_editing() {
            return Some(match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::ExitInput,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter | BareKey::Char('o') => Event::OpenSelected,
            BareKey::Char('a') => Event::FocusUrlInput,
            BareKey::Char('/') => Event::FocusSearchInput,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('c') => Event::ClearSearch,
            BareKey::Char('x') => Event::CancelPending,
            BareKey::Char('L') => Event::SignOut,
            BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }

    fn log_command_result(exit_code: Option<i32>, stderr: &[u8]) {
        if exit_code == Some(0) {
            tracing::debug!("browser command finished");
        } else {
            let error = String::from_utf8_lossy(stderr);
            tracing::warn!(exit_code = ?exit_code, error = %error, "browser command failed");
        }
    }

    fn send_request(request: &OutgoingRequest) {
        let verb = match request.method {
            HttpMethod::Get => HttpVerb::Get,
            HttpMethod::Post => HttpVerb::Post,
        };
        web_request(
            &request.url,
            verb,
            request.headers.clone(),
            request.body.clone(),
            request.context.to_map(),
        );
    }

    /// Executes an action returned from event handling.
    ///
    /// - `CloseFocus`: Hide the plugin pane
    /// - `SendRequest`: Host web request, answered by a `WebRequestResult`
    /// - `OpenUrl`: Run the configured browser command
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::SendRequest(request) => {
                tracing::debug!(request_id = %request.context.id, url = %request.url, "sending web request");
                Self::send_request(request);
            }
            Action::OpenUrl { url } => {
                tracing::debug!(url = %url, command = %self.open_command, "opening url");
                run_command(&[self.open_command.as_str(), url.as_str()], BTreeMap::new());
            }
        }
    }
}
