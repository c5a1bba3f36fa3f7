//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only entry point the plugin shim calls. It routes each
//! event to the controller that owns it, enforces the surface rules (nothing but
//! dismissal while an alert shows, nothing but sign-in while signed out), and
//! returns whether to re-render plus the side effects to run.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenSelected`
//! - **Input**: `FocusUrlInput`, `FocusSearchInput`, `Char`, `Backspace`, `Submit`, `ExitInput`
//! - **Commands**: `Refresh`, `ClearSearch`, `CancelPending`, `SignIn`, `SignOut`, `DismissAlert`
//! - **System**: `PermissionsResult`, `Tick`, `Response`
//!
//! # Example
//!
//! ```rust
//! use knowledgelink::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), knowledgelink::KnowledgeLinkError>(())
//! ```

use super::links::IngestOutcome;
use super::modes::InputMode;
use super::session::GateTransition;
use crate::app::{Action, AppState};
use crate::backend::{Reply, RequestKind};
use crate::domain::error::Result;

/// Events triggered by user input, host timers, or request replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection down by one card (wraps to top).
    KeyDown,
    /// Moves selection up by one card (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Opens the provider sign-in page (signed-out surface only).
    SignIn,
    /// Asks the identity service to end the session.
    SignOut,
    /// Focuses the URL bar.
    FocusUrlInput,
    /// Focuses the search bar.
    FocusSearchInput,
    /// Leaves the focused input, keeping its text.
    ExitInput,
    /// Appends a character to the focused input.
    Char(char),
    /// Removes the last character from the focused input.
    Backspace,
    /// Submits the focused input: ingest a URL or run a search.
    Submit,
    /// Opens the selected link in the browser.
    OpenSelected,
    /// Re-fetches the saved links.
    Refresh,
    /// Clears the search query and results.
    ClearSearch,
    /// Abandons the search and ingestions in flight.
    CancelPending,
    /// Closes the alert.
    DismissAlert,

    /// Host permission request answered.
    PermissionsResult {
        /// Whether every requested permission was granted.
        granted: bool,
    },

    /// One-second host timer tick: timeouts, polling and the spinner.
    Tick,

    /// A web request completed.
    Response(Reply),
}

impl Event {
    /// Events that still get through while an alert is shown.
    const fn passes_alert(&self) -> bool {
        matches!(
            self,
            Self::DismissAlert | Self::CloseFocus | Self::PermissionsResult { .. } | Self::Tick | Self::Response(_)
        )
    }

    /// Events that need an authenticated session.
    const fn needs_session(&self) -> bool {
        !matches!(
            self,
            Self::CloseFocus
                | Self::SignIn
                | Self::DismissAlert
                | Self::PermissionsResult { .. }
                | Self::Tick
                | Self::Response(_)
        )
    }

    fn name(&self) -> &'static str {
        match self {
            Self::KeyDown => "key_down",
            Self::KeyUp => "key_up",
            Self::CloseFocus => "close_focus",
            Self::SignIn => "sign_in",
            Self::SignOut => "sign_out",
            Self::FocusUrlInput => "focus_url_input",
            Self::FocusSearchInput => "focus_search_input",
            Self::ExitInput => "exit_input",
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::Submit => "submit",
            Self::OpenSelected => "open_selected",
            Self::Refresh => "refresh",
            Self::ClearSearch => "clear_search",
            Self::CancelPending => "cancel_pending",
            Self::DismissAlert => "dismiss_alert",
            Self::PermissionsResult { .. } => "permissions_result",
            Self::Tick => "tick",
            Self::Response(_) => "response",
        }
    }
}

type Outcome = (bool, Vec<Action>);

const IGNORED: Outcome = (false, Vec::new());

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean asks the shim to re-render.
///
/// # Errors
///
/// Controllers absorb their own failures, so this currently always succeeds. The
/// `Result` keeps the shim's error path in place.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    if state.alert.is_some() && !event.passes_alert() {
        tracing::trace!("alert shown, ignoring input");
        return Ok(IGNORED);
    }

    if event.needs_session() && !state.gate.status().is_authenticated() {
        tracing::trace!(status = ?state.gate.status(), "no session, ignoring input");
        return Ok(IGNORED);
    }

    let outcome = match event {
        Event::KeyDown => {
            state.move_selection_down();
            (true, vec![])
        }
        Event::KeyUp => {
            state.move_selection_up();
            (true, vec![])
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        Event::SignIn => {
            let action = state.gate.sign_in(state.client.endpoints(), &state.sign_in_provider);
            (false, action.into_iter().collect())
        }
        Event::SignOut => {
            tracing::info!("signing out");
            (false, state.gate.sign_out(&mut state.client).into_iter().collect())
        }
        Event::FocusUrlInput => {
            state.input_mode = InputMode::EditingUrl;
            (true, vec![])
        }
        Event::FocusSearchInput => {
            state.input_mode = InputMode::EditingQuery;
            (true, vec![])
        }
        Event::ExitInput => {
            let was_editing = state.input_mode.is_editing();
            state.input_mode = InputMode::Normal;
            (was_editing, vec![])
        }
        Event::Char(c) => match state.input_mode {
            InputMode::EditingUrl => {
                state.url_input.push(*c);
                (true, vec![])
            }
            InputMode::EditingQuery => {
                state.search.push_char(*c);
                state.clamp_selection();
                (true, vec![])
            }
            InputMode::Normal => IGNORED,
        },
        Event::Backspace => match state.input_mode {
            InputMode::EditingUrl => {
                state.url_input.pop();
                (true, vec![])
            }
            InputMode::EditingQuery => {
                state.search.pop_char();
                state.clamp_selection();
                (true, vec![])
            }
            InputMode::Normal => IGNORED,
        },
        Event::Submit => submit(state),
        Event::OpenSelected => state.selected_url().map_or(IGNORED, |url| {
            tracing::debug!(url = %url, "opening link");
            (false, vec![Action::OpenUrl { url: url.to_string() }])
        }),
        Event::Refresh => match state.gate.context() {
            Some(session) => (true, vec![state.links.refresh(&mut state.client, &session)]),
            None => IGNORED,
        },
        Event::ClearSearch => {
            let changed = state.search.clear();
            if state.input_mode == InputMode::EditingQuery {
                state.input_mode = InputMode::Normal;
            }
            state.clamp_selection();
            (changed, vec![])
        }
        Event::CancelPending => {
            let search = state.search.cancel();
            let ingestions = state.links.cancel_ingestions();
            (search || ingestions > 0, vec![])
        }
        Event::DismissAlert => (state.alert.take().is_some(), vec![]),
        Event::PermissionsResult { granted: true } => {
            tracing::info!("permissions granted, checking session");
            let action = state.gate.check(&mut state.client);
            (true, action.into_iter().collect())
        }
        Event::PermissionsResult { granted: false } => {
            tracing::warn!("permissions denied, web requests unavailable");
            let transition = state.gate.fail();
            apply_transition(state, transition)
        }
        Event::Tick => tick(state),
        Event::Response(reply) => on_reply(state, reply),
    };

    Ok(outcome)
}

fn submit(state: &mut AppState) -> Outcome {
    let Some(session) = state.gate.context() else {
        return IGNORED;
    };

    match state.input_mode {
        InputMode::EditingUrl => {
            if state.links.ingestion_in_progress() {
                tracing::debug!("ingestion in progress, submit disabled");
                return IGNORED;
            }
            state
                .links
                .ingest(&state.url_input, &mut state.client, &session)
                .map_or(IGNORED, |action| (true, vec![action]))
        }
        InputMode::EditingQuery => {
            let action = state.search.search(&mut state.client, &session);
            state.selected_index = 0;
            state.clamp_selection();
            (true, action.into_iter().collect())
        }
        InputMode::Normal => IGNORED,
    }
}

fn tick(state: &mut AppState) -> Outcome {
    let mut render = false;
    let mut actions = vec![];

    if state.is_busy() {
        state.spinner_frame = state.spinner_frame.wrapping_add(1);
        render = true;
    }

    if state.gate.context().is_some() {
        let timeouts = state.links.tick();
        render |= timeouts.refresh_expired;
        if let Some(alert) = timeouts.alert {
            state.alert = Some(alert);
            render = true;
        }
        render |= state.search.tick();
    }

    let (transition, action) = state.gate.tick(&mut state.client);
    actions.extend(action);

    let (transition_render, transition_actions) = apply_transition(state, transition);
    actions.extend(transition_actions);

    (render || transition_render, actions)
}

fn on_reply(state: &mut AppState, reply: &Reply) -> Outcome {
    let context = &reply.context;
    let _span = tracing::debug_span!(
        "reply",
        request_id = %context.id,
        kind = context.kind.as_str(),
        status = reply.status
    )
    .entered();

    match context.kind {
        RequestKind::Session => state
            .gate
            .on_check_reply(context.id, reply.session())
            .map_or(IGNORED, |transition| apply_transition(state, transition)),
        RequestKind::SignOut => {
            let action = state.gate.on_sign_out_reply(context.id, &mut state.client);
            (false, action.into_iter().collect())
        }
        RequestKind::ListLinks | RequestKind::CreateLink | RequestKind::SearchLinks => {
            let Some(session) = state.gate.context() else {
                tracing::debug!("no session, dropping reply");
                return IGNORED;
            };
            if context.epoch != session.epoch {
                tracing::debug!(reply_epoch = context.epoch, epoch = session.epoch, "dropping reply from previous session");
                return IGNORED;
            }

            match context.kind {
                RequestKind::ListLinks => {
                    let changed = state.links.on_refresh_reply(context.id, reply.saved_links());
                    state.clamp_selection();
                    (changed, vec![])
                }
                RequestKind::SearchLinks => {
                    let changed = state.search.on_reply(context.id, reply.search_hits());
                    state.clamp_selection();
                    (changed, vec![])
                }
                _ => match state
                    .links
                    .on_ingest_reply(context.id, reply.acknowledgement(), &mut state.client, &session)
                {
                    IngestOutcome::Accepted(refresh) => {
                        state.url_input.clear();
                        (true, vec![refresh])
                    }
                    IngestOutcome::Failed(alert) => {
                        state.alert = Some(alert);
                        (true, vec![])
                    }
                    IngestOutcome::Ignored => IGNORED,
                },
            }
        }
    }
}

fn apply_transition(state: &mut AppState, transition: GateTransition) -> Outcome {
    match transition {
        GateTransition::Unchanged => IGNORED,
        GateTransition::Updated => (true, vec![]),
        GateTransition::SignedIn(session) => {
            state.reset_session_view();
            (true, vec![state.links.refresh(&mut state.client, &session)])
        }
        GateTransition::SignedOut => {
            state.reset_session_view();
            (true, vec![])
        }
    }
}
