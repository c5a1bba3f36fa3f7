//! Search overlay: the query, its ranked results, and which list is shown.

use crate::app::Action;
use crate::backend::pending::tick_slot;
use crate::backend::{ApiClient, ApiRequest, PendingRequest, RequestId};
use crate::domain::error::Result;
use crate::domain::{Link, ScoredLink, SessionContext};

/// The list the main surface shows, chosen from the query and the two collections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListSelection<'a> {
    SavedLinks(&'a [Link]),
    SearchResults(&'a [ScoredLink]),
}

impl<'a> ListSelection<'a> {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::SavedLinks(_) => "My Saved Links",
            Self::SearchResults(_) => "Search Results",
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::SavedLinks(links) => links.len(),
            Self::SearchResults(hits) => hits.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The link at `index` and its score when it came from a search.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(&'a Link, Option<f64>)> {
        match *self {
            Self::SavedLinks(links) => links.get(index).map(|link| (link, None)),
            Self::SearchResults(hits) => hits.get(index).map(|hit| (&hit.link, Some(hit.score))),
        }
    }

    /// Whether the "nothing saved yet" empty state applies.
    ///
    /// An empty search result list gets its own message from the view.
    #[must_use]
    pub const fn shows_empty_state(&self) -> bool {
        matches!(self, Self::SavedLinks(links) if links.is_empty())
    }
}

/// Owns the search query, its results and the search in flight.
#[derive(Debug, Clone, Default)]
pub struct SearchOverlay {
    query: String,
    results: Vec<ScoredLink>,
    pending: Option<PendingRequest>,
}

impl SearchOverlay {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[ScoredLink] {
        &self.results
    }

    /// A whitespace-only query counts as no query.
    #[must_use]
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    #[must_use]
    pub const fn search_in_progress(&self) -> bool {
        self.pending.is_some()
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
    }

    /// Searches for the current query, superseding any search in flight.
    ///
    /// An empty query clears results, cancels the search in flight, and sends nothing.
    #[tracing::instrument(level = "debug", skip(self, client), fields(query = %self.query, epoch = session.epoch))]
    pub fn search(&mut self, client: &mut ApiClient, session: &SessionContext) -> Option<Action> {
        if let Some(previous) = self.pending.take() {
            tracing::debug!(request_id = %previous.id, "superseding in-flight search");
        }

        if !self.has_query() {
            self.results.clear();
            return None;
        }

        let query = self.query.trim().to_string();
        let (pending, request) = client.issue(&ApiRequest::SearchLinks { query }, session.epoch);
        self.pending = Some(pending);
        Some(Action::SendRequest(request))
    }

    /// Clears query and results. Returns `true` if anything changed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.query.is_empty() || !self.results.is_empty() || self.pending.is_some();
        self.query.clear();
        self.results.clear();
        self.pending = None;
        changed
    }

    /// Abandons the search in flight, keeping the current results.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.pending.take();
        if let Some(pending) = cancelled {
            tracing::info!(request_id = %pending.id, "search cancelled");
        }
        cancelled.is_some()
    }

    /// Applies a search reply. Returns `true` when the overlay changed.
    ///
    /// A failed search keeps the previous results.
    pub fn on_reply(&mut self, id: RequestId, result: Result<Vec<ScoredLink>>) -> bool {
        if !self.pending.is_some_and(|pending| pending.is(id)) {
            tracing::debug!(request_id = %id, "ignoring superseded search reply");
            return false;
        }
        self.pending = None;

        match result {
            Ok(results) => {
                tracing::debug!(count = results.len(), "search results received");
                self.results = results;
            }
            Err(e) => tracing::warn!(error = %e, "search failed"),
        }
        true
    }

    /// Advances the search timeout. Returns `true` if the search expired.
    pub fn tick(&mut self) -> bool {
        tick_slot(&mut self.pending).is_some_and(|id| {
            tracing::warn!(request_id = %id, "search timed out");
            true
        })
    }

    pub fn reset(&mut self) {
        self.clear();
    }

    /// Chooses the visible list.
    ///
    /// Results win whenever there are any. With no results, a present query still
    /// shows the (empty) search list rather than falling back to saved links.
    #[must_use]
    pub fn select<'a>(&'a self, links: &'a [Link]) -> ListSelection<'a> {
        if !self.results.is_empty() || self.has_query() {
            ListSelection::SearchResults(&self.results)
        } else {
            ListSelection::SavedLinks(links)
        }
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

    fn typed(query: &str) -> SearchOverlay {
        let mut overlay = SearchOverlay::default();
        query.chars().for_each(|c| overlay.push_char(c));
        overlay
    }

    fn hit(url: &str, score: f64) -> ScoredLink {
        ScoredLink {
            link: Link::new(url, "", ""),
            score,
        }
    }

    fn id_of(action: Option<Action>) -> RequestId {
        action.as_ref().and_then(Action::request).map(|request| request.context.id).unwrap()
    }

    #[test]
    fn selection_follows_query() {
        let links = vec![Link::new("https://saved.example", "", "")];
        let overlay = SearchOverlay::default();
        assert_eq!(overlay.select(&links).title(), "My Saved Links");

        let overlay = typed("rust");
        let selection = overlay.select(&links);
        assert_eq!(selection.title(), "Search Results");
        assert!(selection.is_empty());
        assert!(!selection.shows_empty_state());
    }

    #[test]
    fn results_outlive_an_edited_query() {
        let mut client = client();
        let mut overlay = typed("q");
        let id = id_of(overlay.search(&mut client, &session()));
        overlay.on_reply(id, Ok(vec![hit("https://hit.example", 0.4)]));
        overlay.pop_char();

        let links = vec![Link::new("https://saved.example", "", "")];
        let selection = overlay.select(&links);
        assert_eq!(selection.title(), "Search Results");
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn empty_query_cancels_and_clears() {
        let mut client = client();
        let mut overlay = typed("rust");
        let id = id_of(overlay.search(&mut client, &session()));

        overlay.pop_char();
        overlay.pop_char();
        overlay.pop_char();
        overlay.pop_char();
        assert!(overlay.search(&mut client, &session()).is_none());
        assert!(!overlay.search_in_progress());

        assert!(!overlay.on_reply(id, Ok(vec![hit("https://late.example", 0.5)])));
        assert!(overlay.results().is_empty());
    }

    #[test]
    fn latest_search_wins() {
        let mut client = client();
        let mut overlay = typed("a");
        let first = id_of(overlay.search(&mut client, &session()));
        overlay.push_char('b');
        let second = id_of(overlay.search(&mut client, &session()));

        assert!(overlay.on_reply(second, Ok(vec![hit("https://ab.example", 0.9)])));
        assert!(!overlay.on_reply(first, Ok(vec![hit("https://a.example", 0.1)])));
        assert_eq!(overlay.results()[0].link.url, "https://ab.example");
    }

    #[test]
    fn results_keep_response_order() {
        let mut client = client();
        let mut overlay = typed("q");
        let id = id_of(overlay.search(&mut client, &session()));
        overlay.on_reply(id, Ok(vec![hit("https://low.example", 0.1), hit("https://high.example", 0.9)]));

        let selection = overlay.select(&[]);
        assert_eq!(selection.get(0).map(|(link, _)| link.url.as_str()), Some("https://low.example"));
        assert_eq!(selection.get(1).and_then(|(_, score)| score), Some(0.9));
    }

    #[test]
    fn timeout_keeps_results() {
        let mut client = client();
        let mut overlay = typed("q");
        let id = id_of(overlay.search(&mut client, &session()));
        overlay.on_reply(id, Ok(vec![hit("https://kept.example", 0.3)]));

        overlay.search(&mut client, &session());
        assert!(!overlay.tick());
        assert!(overlay.tick());
        assert_eq!(overlay.results().len(), 1);
    }
}
