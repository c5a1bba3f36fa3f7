//! Saved links: the list shown when no search is active, plus ingestion.

use crate::app::{Action, Alert};
use crate::backend::pending::tick_slot;
use crate::backend::{ApiClient, ApiRequest, PendingRequest, RequestId};
use crate::domain::error::Result;
use crate::domain::{KnowledgeLinkError, Link, SessionContext};

/// What became of an ingestion reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Backend accepted the link. The action refreshes the saved list.
    Accepted(Action),
    /// Backend rejected the link or the reply was unusable.
    Failed(Alert),
    /// Nobody was waiting for this reply.
    Ignored,
}

/// Timeouts observed during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTimeouts {
    pub refresh_expired: bool,
    pub alert: Option<Alert>,
}

/// Owns the saved-link list and every link request in flight.
#[derive(Debug, Clone, Default)]
pub struct LinkStore {
    links: Vec<Link>,
    refreshing: Option<PendingRequest>,
    ingestions: Vec<PendingRequest>,
}

impl LinkStore {
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    #[must_use]
    pub const fn is_refreshing(&self) -> bool {
        self.refreshing.is_some()
    }

    #[must_use]
    pub fn ingestion_in_progress(&self) -> bool {
        !self.ingestions.is_empty()
    }

    /// Requests the saved list. A newer refresh supersedes an older one.
    #[tracing::instrument(level = "debug", skip(self, client), fields(epoch = session.epoch))]
    pub fn refresh(&mut self, client: &mut ApiClient, session: &SessionContext) -> Action {
        if let Some(previous) = self.refreshing.take() {
            tracing::debug!(request_id = %previous.id, "superseding in-flight refresh");
        }

        let (pending, request) = client.issue(&ApiRequest::ListLinks, session.epoch);
        self.refreshing = Some(pending);
        Action::SendRequest(request)
    }

    /// Submits a URL for ingestion. Whitespace-only input does nothing.
    #[tracing::instrument(level = "debug", skip(self, client), fields(epoch = session.epoch))]
    pub fn ingest(&mut self, url: &str, client: &mut ApiClient, session: &SessionContext) -> Option<Action> {
        let url = url.trim();
        if url.is_empty() {
            tracing::trace!("empty url, nothing to ingest");
            return None;
        }

        let (pending, request) = client.issue(&ApiRequest::CreateLink { url: url.to_string() }, session.epoch);
        self.ingestions.push(pending);
        tracing::info!(url = %url, in_flight = self.ingestions.len(), "ingesting link");
        Some(Action::SendRequest(request))
    }

    /// Applies a refresh reply. Returns `true` when the list or busy state changed.
    ///
    /// A failed refresh keeps the previous list.
    pub fn on_refresh_reply(&mut self, id: RequestId, result: Result<Vec<Link>>) -> bool {
        if !self.refreshing.is_some_and(|pending| pending.is(id)) {
            tracing::debug!(request_id = %id, "ignoring superseded refresh reply");
            return false;
        }
        self.refreshing = None;

        match result {
            Ok(links) => {
                tracing::debug!(count = links.len(), "saved links refreshed");
                self.links = links;
            }
            Err(e) => tracing::warn!(error = %e, "failed to refresh saved links"),
        }
        true
    }

    /// Applies an ingestion reply. Success triggers a refresh of the saved list.
    pub fn on_ingest_reply(
        &mut self,
        id: RequestId,
        result: Result<()>,
        client: &mut ApiClient,
        session: &SessionContext,
    ) -> IngestOutcome {
        let Some(position) = self.ingestions.iter().position(|pending| pending.is(id)) else {
            tracing::debug!(request_id = %id, "ignoring reply for abandoned ingestion");
            return IngestOutcome::Ignored;
        };
        self.ingestions.remove(position);

        match result {
            Ok(()) => {
                tracing::info!(request_id = %id, "link ingested");
                IngestOutcome::Accepted(self.refresh(client, session))
            }
            Err(e) => {
                tracing::warn!(request_id = %id, error = %e, "ingestion failed");
                IngestOutcome::Failed(Alert::ingestion_failed(&e))
            }
        }
    }

    /// Advances every timeout. Expired ingestions raise one alert.
    pub fn tick(&mut self) -> LinkTimeouts {
        let mut timeouts = LinkTimeouts::default();

        if let Some(id) = tick_slot(&mut self.refreshing) {
            tracing::warn!(request_id = %id, "refresh timed out");
            timeouts.refresh_expired = true;
        }

        let before = self.ingestions.len();
        self.ingestions.retain_mut(|pending| !pending.tick());
        let expired = before - self.ingestions.len();
        if expired > 0 {
            tracing::warn!(expired, "ingestion timed out");
            timeouts.alert = Some(Alert::ingestion_failed(&KnowledgeLinkError::TimedOut {
                operation: "Adding the link",
            }));
        }

        timeouts
    }

    /// Abandons every ingestion in flight. Returns how many were dropped.
    pub fn cancel_ingestions(&mut self) -> usize {
        let dropped = self.ingestions.len();
        if dropped > 0 {
            let reason = KnowledgeLinkError::Cancelled {
                operation: "Adding the link",
            };
            tracing::info!(dropped, reason = %reason, "ingestion cancelled");
        }
        self.ingestions.clear();
        dropped
    }

    /// Forgets everything belonging to the previous session.
    pub fn reset(&mut self) {
        self.links.clear();
        self.refreshing = None;
        self.ingestions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Endpoints;

    fn client() -> ApiClient {
        ApiClient::new(Endpoints::new("http://localhost:3000", "", None), 2)
    }

    fn session() -> SessionContext {
        SessionContext {
            epoch: 1,
            user_name: "Ada".to_string(),
        }
    }

    fn id_of(action: &Action) -> RequestId {
        action.request().map(|request| request.context.id).unwrap()
    }

    #[test]
    fn blank_url_is_ignored() {
        let mut store = LinkStore::default();
        assert!(store.ingest("   ", &mut client(), &session()).is_none());
        assert!(!store.ingestion_in_progress());
    }

    #[test]
    fn newer_refresh_wins() {
        let mut client = client();
        let mut store = LinkStore::default();
        let first = id_of(&store.refresh(&mut client, &session()));
        let second = id_of(&store.refresh(&mut client, &session()));

        assert!(!store.on_refresh_reply(first, Ok(vec![Link::new("https://old.example", "", "")])));
        assert!(store.links().is_empty());

        assert!(store.on_refresh_reply(second, Ok(vec![Link::new("https://new.example", "", "")])));
        assert_eq!(store.links()[0].url, "https://new.example");
    }

    #[test]
    fn failed_refresh_keeps_list() {
        let mut client = client();
        let mut store = LinkStore::default();
        let id = id_of(&store.refresh(&mut client, &session()));
        store.on_refresh_reply(id, Ok(vec![Link::new("https://kept.example", "", "")]));

        let id = id_of(&store.refresh(&mut client, &session()));
        assert!(store.on_refresh_reply(id, Err(KnowledgeLinkError::Http { status: 500, detail: None })));
        assert_eq!(store.links().len(), 1);
        assert!(!store.is_refreshing());
    }

    #[test]
    fn accepted_ingestion_refreshes() {
        let mut client = client();
        let mut store = LinkStore::default();
        let action = store.ingest(" https://example.com ", &mut client, &session()).unwrap();
        assert_eq!(action.request().unwrap().body, br#"{"url":"https://example.com"}"#.to_vec());

        let outcome = store.on_ingest_reply(id_of(&action), Ok(()), &mut client, &session());
        assert!(matches!(outcome, IngestOutcome::Accepted(_)));
        assert!(!store.ingestion_in_progress());
        assert!(store.is_refreshing());
    }

    #[test]
    fn overlapping_ingestions_tracked_separately() {
        let mut client = client();
        let mut store = LinkStore::default();
        let first = store.ingest("https://a.example", &mut client, &session()).unwrap();
        let second = store.ingest("https://b.example", &mut client, &session()).unwrap();

        store.on_ingest_reply(id_of(&first), Ok(()), &mut client, &session());
        assert!(store.ingestion_in_progress());

        let outcome = store.on_ingest_reply(
            id_of(&second),
            Err(KnowledgeLinkError::Http { status: 400, detail: Some("nope".to_string()) }),
            &mut client,
            &session(),
        );
        assert!(matches!(outcome, IngestOutcome::Failed(ref alert) if alert.detail.as_deref() == Some("nope")));
        assert!(!store.ingestion_in_progress());
    }

    #[test]
    fn cancelled_ingestion_reply_is_ignored() {
        let mut client = client();
        let mut store = LinkStore::default();
        let action = store.ingest("https://a.example", &mut client, &session()).unwrap();
        assert_eq!(store.cancel_ingestions(), 1);

        let outcome = store.on_ingest_reply(id_of(&action), Ok(()), &mut client, &session());
        assert_eq!(outcome, IngestOutcome::Ignored);
        assert!(!store.is_refreshing());
    }

    #[test]
    fn ingestion_timeout_raises_alert() {
        let mut client = client();
        let mut store = LinkStore::default();
        store.ingest("https://a.example", &mut client, &session());

        assert_eq!(store.tick(), LinkTimeouts::default());
        let timeouts = store.tick();
        assert!(timeouts.alert.is_some());
        assert!(!store.ingestion_in_progress());
    }
}
