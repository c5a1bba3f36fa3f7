//! Session gate: decides which surface is shown and when the session changes.
//!
//! The gate asks the identity service for the session status, polls it so that
//! sign-in and sign-out performed in the browser show up as transitions, and hands
//! an explicit [`SessionContext`] to the other controllers. Any failure to verify the
//! session is reported only as [`SessionStatus::Unauthenticated`].

use crate::app::Action;
use crate::backend::pending::tick_slot;
use crate::backend::{ApiClient, ApiRequest, Endpoints, PendingRequest, RequestId};
use crate::domain::error::Result;
use crate::domain::{Session, SessionContext, SessionStatus};

/// Result of observing a session status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateTransition {
    /// Nothing visible changed.
    Unchanged,
    /// Status changed without entering or leaving a session (e.g. loading → signed out).
    Updated,
    /// Entered a session. The saved links must be refreshed for it.
    SignedIn(SessionContext),
    /// Left a session. Everything shown for it must go.
    SignedOut,
}

/// Observes the identity service and owns the session epoch.
#[derive(Debug, Clone)]
pub struct SessionGate {
    status: SessionStatus,
    epoch: u64,
    check: Option<PendingRequest>,
    sign_out: Option<PendingRequest>,
    started: bool,
    poll_ticks: u32,
    ticks_since_check: u32,
}

impl SessionGate {
    /// Creates a gate in the loading state. `poll_ticks` is the re-check interval.
    #[must_use]
    pub fn new(poll_ticks: u32) -> Self {
        Self {
            status: SessionStatus::Loading,
            epoch: 0,
            check: None,
            sign_out: None,
            started: false,
            poll_ticks: poll_ticks.max(1),
            ticks_since_check: 0,
        }
    }

    #[must_use]
    pub const fn status(&self) -> &SessionStatus {
        &self.status
    }

    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub const fn is_checking(&self) -> bool {
        self.check.is_some()
    }

    /// Context for the current session, if authenticated.
    #[must_use]
    pub fn context(&self) -> Option<SessionContext> {
        self.status.session().map(|session| SessionContext {
            epoch: self.epoch,
            user_name: session.display_name().to_string(),
        })
    }

    /// Asks the identity service for the session status.
    ///
    /// At most one check is in flight; returns `None` while one is pending.
    pub fn check(&mut self, client: &mut ApiClient) -> Option<Action> {
        if self.check.is_some() {
            tracing::trace!("session check already in flight");
            return None;
        }

        self.started = true;
        self.ticks_since_check = 0;

        let (pending, request) = client.issue(&ApiRequest::Session, self.epoch);
        self.check = Some(pending);
        Some(Action::SendRequest(request))
    }

    /// Opens the provider's sign-in page. Only offered while signed out.
    #[must_use]
    pub fn sign_in(&self, endpoints: &Endpoints, provider: &str) -> Option<Action> {
        if self.status != SessionStatus::Unauthenticated {
            tracing::debug!(status = ?self.status, "sign-in ignored outside the signed-out state");
            return None;
        }

        tracing::debug!(provider = %provider, "opening sign-in page");
        Some(Action::OpenUrl {
            url: endpoints.sign_in_page(provider),
        })
    }

    /// Asks the identity service to end the session.
    ///
    /// Fire-and-forget: the session is only considered gone once a later check
    /// reports it.
    pub fn sign_out(&mut self, client: &mut ApiClient) -> Option<Action> {
        if !self.status.is_authenticated() || self.sign_out.is_some() {
            return None;
        }

        let (pending, request) = client.issue(&ApiRequest::SignOut, self.epoch);
        self.sign_out = Some(pending);
        Some(Action::SendRequest(request))
    }

    /// Handles a session-check reply. Returns `None` for replies nobody waits for.
    pub fn on_check_reply(&mut self, id: RequestId, result: Result<Option<Session>>) -> Option<GateTransition> {
        if !self.check.is_some_and(|pending| pending.is(id)) {
            tracing::debug!(request_id = %id, "ignoring stale session reply");
            return None;
        }
        self.check = None;

        let observed = result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "session check failed, treating as signed out");
            None
        });

        Some(self.observe(observed))
    }

    /// Handles the sign-out acknowledgement, whatever its status, with a fresh check.
    pub fn on_sign_out_reply(&mut self, id: RequestId, client: &mut ApiClient) -> Option<Action> {
        if !self.sign_out.is_some_and(|pending| pending.is(id)) {
            return None;
        }
        self.sign_out = None;
        self.recheck(client)
    }

    /// Replaces any check in flight. One issued before the sign-out may report the old session.
    fn recheck(&mut self, client: &mut ApiClient) -> Option<Action> {
        if let Some(stale) = self.check.take() {
            tracing::debug!(request_id = %stale.id, "superseding session check issued before sign-out");
        }
        self.check(client)
    }

    /// Session check failed before any reply could be decoded (e.g. permissions denied).
    pub fn fail(&mut self) -> GateTransition {
        self.check = None;
        self.observe(None)
    }

    /// Advances timeouts and the polling interval.
    pub fn tick(&mut self, client: &mut ApiClient) -> (GateTransition, Option<Action>) {
        if let Some(id) = tick_slot(&mut self.check) {
            tracing::warn!(request_id = %id, "session check timed out, treating as signed out");
            return (self.observe(None), None);
        }

        if let Some(id) = tick_slot(&mut self.sign_out) {
            tracing::warn!(request_id = %id, "sign-out timed out, re-checking session");
            return (GateTransition::Unchanged, self.recheck(client));
        }

        if !self.started || self.check.is_some() {
            return (GateTransition::Unchanged, None);
        }

        self.ticks_since_check = self.ticks_since_check.saturating_add(1);
        if self.ticks_since_check >= self.poll_ticks {
            tracing::trace!("polling session status");
            return (GateTransition::Unchanged, self.check(client));
        }

        (GateTransition::Unchanged, None)
    }

    fn observe(&mut self, observed: Option<Session>) -> GateTransition {
        let next = observed.map_or(SessionStatus::Unauthenticated, SessionStatus::Authenticated);

        let transition = match (&self.status, &next) {
            (SessionStatus::Authenticated(current), SessionStatus::Authenticated(fresh)) if same_user(current, fresh) => {
                if current == fresh {
                    GateTransition::Unchanged
                } else {
                    GateTransition::Updated
                }
            }
            (_, SessionStatus::Authenticated(fresh)) => {
                self.epoch += 1;
                tracing::info!(user = %fresh.display_name(), epoch = self.epoch, "session established");
                GateTransition::SignedIn(SessionContext {
                    epoch: self.epoch,
                    user_name: fresh.display_name().to_string(),
                })
            }
            (SessionStatus::Authenticated(_), _) => {
                self.epoch += 1;
                self.sign_out = None;
                tracing::info!(epoch = self.epoch, "session ended");
                GateTransition::SignedOut
            }
            (SessionStatus::Loading, _) => GateTransition::Updated,
            (SessionStatus::Unauthenticated, _) => GateTransition::Unchanged,
        };

        self.status = next;
        transition
    }
}

fn same_user(a: &Session, b: &Session) -> bool {
    a.user.email == b.user.email && a.user.name == b.user.name
}
