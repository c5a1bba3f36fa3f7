//! Shared helpers for driving the plugin through `handle_event`.
//!
//! Each helper plays the host: it hands events in, picks requests out of the
//! returned actions, and answers them with canned backend replies.

#![allow(dead_code)]

use knowledgelink::backend::{OutgoingRequest, RequestKind};
use knowledgelink::{handle_event, initialize, Action, AppState, Config, Event, Link, Reply, ScoredLink};

pub const TIMEOUT_SECS: u32 = 3;

pub fn config() -> Config {
    Config {
        request_timeout_secs: TIMEOUT_SECS,
        // Far enough out that polling never interferes unless a test asks for it.
        session_poll_secs: 1_000,
        ..Config::default()
    }
}

pub fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
    handle_event(state, &event).unwrap()
}

pub fn requests(actions: &[Action]) -> Vec<OutgoingRequest> {
    actions.iter().filter_map(Action::request).cloned().collect()
}

/// The single request among `actions`, asserting its kind.
pub fn only_request(actions: &[Action], kind: RequestKind) -> OutgoingRequest {
    let requests = requests(actions);
    assert_eq!(requests.len(), 1, "expected exactly one request, got {requests:?}");
    assert_eq!(requests[0].context.kind, kind);
    requests[0].clone()
}

pub fn reply(request: &OutgoingRequest, status: u16, body: &str) -> Event {
    Event::Response(Reply {
        context: request.context.clone(),
        status,
        body: body.as_bytes().to_vec(),
    })
}

pub fn session_body(name: &str) -> String {
    serde_json::json!({
        "user": { "name": name, "email": format!("{}@example.com", name.to_lowercase()) },
        "expires": "2026-12-01T00:00:00.000Z"
    })
    .to_string()
}

pub fn link(url: &str, title: &str) -> Link {
    Link::new(url, title, format!("Summary of {title}."))
}

pub fn links_body(links: &[Link]) -> String {
    serde_json::to_string(links).unwrap()
}

pub fn hits_body(hits: &[(Link, f64)]) -> String {
    let hits: Vec<ScoredLink> = hits
        .iter()
        .map(|(link, score)| ScoredLink {
            link: link.clone(),
            score: *score,
        })
        .collect();
    serde_json::to_string(&hits).unwrap()
}

/// Grants permissions and returns the first session check.
pub fn started() -> (AppState, OutgoingRequest) {
    let mut state = initialize(&config());
    let (_, actions) = send(&mut state, Event::PermissionsResult { granted: true });
    let check = only_request(&actions, RequestKind::Session);
    (state, check)
}

pub fn signed_out() -> AppState {
    let (mut state, check) = started();
    send(&mut state, reply(&check, 200, "{}"));
    assert!(!state.gate.status().is_authenticated());
    state
}

/// Signs in as `name` and answers the resulting refresh with `links`.
pub fn signed_in(name: &str, links: &[Link]) -> AppState {
    let (mut state, check) = started();
    let (_, actions) = send(&mut state, reply(&check, 200, &session_body(name)));
    let refresh = only_request(&actions, RequestKind::ListLinks);
    send(&mut state, reply(&refresh, 200, &links_body(links)));
    state
}

pub fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        send(state, Event::Char(c));
    }
}

/// Focuses the URL bar, types `url` and submits it. Returns the actions of the submit.
pub fn submit_url(state: &mut AppState, url: &str) -> Vec<Action> {
    send(state, Event::FocusUrlInput);
    type_text(state, url);
    send(state, Event::Submit).1
}

/// Focuses the search bar, types `query` and submits it. Returns the actions of the submit.
pub fn submit_query(state: &mut AppState, query: &str) -> Vec<Action> {
    send(state, Event::FocusSearchInput);
    type_text(state, query);
    send(state, Event::Submit).1
}

pub fn tick(state: &mut AppState, times: u32) -> Vec<Action> {
    (0..times).flat_map(|_| send(state, Event::Tick).1).collect()
}
