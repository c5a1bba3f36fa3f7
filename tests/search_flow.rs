mod common;

use common::*;
use knowledgelink::backend::RequestKind;
use knowledgelink::ui::viewmodel::{ListPanel, Screen};
use knowledgelink::{AppState, Event};

fn list(state: &AppState) -> ListPanel {
    match state.compute_viewmodel(60, 100).screen {
        Screen::Main(view) => view.list,
        other => panic!("expected main screen, got {other:?}"),
    }
}

#[test]
fn ranked_results_show_their_relevance() {
    let mut state = signed_in("Ada", &[link("https://x.dev", "X")]);

    let search = only_request(&submit_query(&mut state, "rust ownership"), RequestKind::SearchLinks);
    assert_eq!(search.url, "http://localhost:3000/api/search?q=rust%20ownership");

    let body = r#"[{"url":"a","title":"A","summary":"...","score":0.91}]"#;
    send(&mut state, reply(&search, 200, body));

    let list = list(&state);
    assert_eq!(list.title, "Search Results (1)");
    assert_eq!(list.cards.len(), 1);
    assert_eq!(list.cards[0].title, "A");
    assert_eq!(list.cards[0].relevance.as_deref(), Some("Relevance Score: 0.9100"));
}

#[test]
fn results_keep_backend_order() {
    let mut state = signed_in("Ada", &[]);
    let search = only_request(&submit_query(&mut state, "tokio"), RequestKind::SearchLinks);
    let hits = hits_body(&[(link("https://low.dev", "Low"), 0.2), (link("https://high.dev", "High"), 0.9)]);
    send(&mut state, reply(&search, 200, &hits));

    let titles: Vec<String> = list(&state).cards.into_iter().map(|card| card.title).collect();
    assert_eq!(titles, ["Low", "High"]);
}

#[test]
fn empty_query_clears_results_without_a_request() {
    let mut state = signed_in("Ada", &[link("https://x.dev", "X")]);
    let search = only_request(&submit_query(&mut state, "rust"), RequestKind::SearchLinks);
    send(&mut state, reply(&search, 200, &hits_body(&[(link("https://a.dev", "A"), 0.5)])));
    assert_eq!(state.search.results().len(), 1);

    for _ in 0.."rust".len() {
        send(&mut state, Event::Backspace);
    }
    let (_, actions) = send(&mut state, Event::Submit);

    assert!(requests(&actions).is_empty());
    assert!(state.search.results().is_empty());
    assert!(!state.search.search_in_progress());
    assert_eq!(list(&state).title, "My Saved Links (1)");
}

#[test]
fn nothing_saved_shows_the_empty_state() {
    let state = signed_in("Ada", &[]);
    let list = list(&state);
    assert!(list.cards.is_empty());
    assert_eq!(
        list.empty_state.map(|empty| empty.message).as_deref(),
        Some("You haven't saved any links yet.")
    );
}

#[test]
fn a_query_without_results_hides_saved_links() {
    let mut state = signed_in("Ada", &[link("https://x.dev", "X")]);
    send(&mut state, Event::FocusSearchInput);
    type_text(&mut state, "foo");

    let list = list(&state);
    assert_eq!(list.title, "Search Results (0)");
    assert!(list.cards.is_empty());
    assert_eq!(
        list.empty_state.map(|empty| empty.message).as_deref(),
        Some("No links match your question.")
    );
}

#[test]
fn zero_matches_show_a_search_message() {
    let mut state = signed_in("Ada", &[]);
    let search = only_request(&submit_query(&mut state, "quantum gardening"), RequestKind::SearchLinks);
    assert!(list(&state).empty_state.is_none());

    send(&mut state, reply(&search, 200, "[]"));

    let list = list(&state);
    assert_eq!(list.title, "Search Results (0)");
    let empty = list.empty_state.unwrap();
    assert_eq!(empty.message, "No links match your question.");
    assert_ne!(empty.message, "You haven't saved any links yet.");
}

#[test]
fn null_titles_do_not_fail_the_search() {
    let mut state = signed_in("Ada", &[]);
    let search = only_request(&submit_query(&mut state, "rust"), RequestKind::SearchLinks);
    let body = r#"[{"url":"https://a.dev","title":null,"summary":"s","score":0.9},{"url":"https://b.dev","title":"B","summary":"t","score":0.5}]"#;
    send(&mut state, reply(&search, 200, body));

    assert_eq!(state.search.results().len(), 2);
    let titles: Vec<String> = list(&state).cards.into_iter().map(|card| card.title).collect();
    assert_eq!(titles, ["https://a.dev", "B"]);
}

#[test]
fn refresh_and_search_do_not_cross_contaminate() {
    let mut state = signed_in("Ada", &[link("https://x.dev", "X")]);

    let (_, actions) = send(&mut state, Event::Refresh);
    let refresh = only_request(&actions, RequestKind::ListLinks);
    let search = only_request(&submit_query(&mut state, "rust"), RequestKind::SearchLinks);

    // Search answers first, then the refresh.
    send(&mut state, reply(&search, 200, &hits_body(&[(link("https://hit.dev", "Hit"), 0.7)])));
    send(&mut state, reply(&refresh, 200, &links_body(&[link("https://y.dev", "Y")])));

    assert_eq!(state.links.links().len(), 1);
    assert_eq!(state.links.links()[0].url, "https://y.dev");
    assert_eq!(state.search.results().len(), 1);
    assert_eq!(state.search.results()[0].link.url, "https://hit.dev");
    assert_eq!(list(&state).title, "Search Results (1)");

    send(&mut state, Event::ClearSearch);
    assert_eq!(list(&state).title, "My Saved Links (1)");
}

#[test]
fn newer_search_supersedes_older_one() {
    let mut state = signed_in("Ada", &[]);
    let first = only_request(&submit_query(&mut state, "a"), RequestKind::SearchLinks);
    type_text(&mut state, "b");
    let second = only_request(&send(&mut state, Event::Submit).1, RequestKind::SearchLinks);

    send(&mut state, reply(&second, 200, &hits_body(&[(link("https://new.dev", "New"), 0.8)])));
    let (render, _) = send(&mut state, reply(&first, 200, &hits_body(&[(link("https://old.dev", "Old"), 0.9)])));

    assert!(!render);
    assert_eq!(state.search.results()[0].link.url, "https://new.dev");
}

#[test]
fn failed_search_keeps_previous_results() {
    let mut state = signed_in("Ada", &[]);
    let first = only_request(&submit_query(&mut state, "rust"), RequestKind::SearchLinks);
    send(&mut state, reply(&first, 200, &hits_body(&[(link("https://a.dev", "A"), 0.5)])));

    let second = only_request(&send(&mut state, Event::Submit).1, RequestKind::SearchLinks);
    send(&mut state, reply(&second, 500, r#"{"detail":"embedding service down"}"#));

    assert_eq!(state.search.results().len(), 1);
    assert!(!state.search.search_in_progress());
    assert!(state.alert.is_none());
}

#[test]
fn search_times_out_and_ignores_late_reply() {
    let mut state = signed_in("Ada", &[]);
    let search = only_request(&submit_query(&mut state, "slow"), RequestKind::SearchLinks);

    tick(&mut state, TIMEOUT_SECS);
    assert!(!state.search.search_in_progress());
    assert!(state.alert.is_none());

    send(&mut state, reply(&search, 200, &hits_body(&[(link("https://late.dev", "Late"), 0.4)])));
    assert!(state.search.results().is_empty());
}

#[test]
fn cancel_drops_the_search_in_flight() {
    let mut state = signed_in("Ada", &[]);
    let search = only_request(&submit_query(&mut state, "rust"), RequestKind::SearchLinks);
    send(&mut state, Event::ExitInput);
    send(&mut state, Event::CancelPending);

    assert!(!state.search.search_in_progress());
    send(&mut state, reply(&search, 200, &hits_body(&[(link("https://a.dev", "A"), 0.5)])));
    assert!(state.search.results().is_empty());
    assert_eq!(state.search.query(), "rust");
}
