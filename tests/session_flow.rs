mod common;

use common::*;
use knowledgelink::backend::RequestKind;
use knowledgelink::ui::viewmodel::Screen;
use knowledgelink::{initialize, Action, Event, SessionStatus};

#[test]
fn nothing_is_requested_before_permissions() {
    let mut state = initialize(&config());
    assert!(tick(&mut state, 5).is_empty());
    assert_eq!(state.gate.status(), &SessionStatus::Loading);
    assert!(matches!(state.compute_viewmodel(40, 80).screen, Screen::Loading { .. }));
}

#[test]
fn sign_in_triggers_exactly_one_refresh() {
    let (mut state, check) = started();
    let (render, actions) = send(&mut state, reply(&check, 200, &session_body("Ada")));

    assert!(render);
    let refresh = only_request(&actions, RequestKind::ListLinks);
    assert_eq!(refresh.url, "http://localhost:3000/api/links");

    // A poll that sees the same session does not refresh again.
    let poll = state.gate.check(&mut state.client).unwrap();
    let poll = poll.request().unwrap().clone();
    let (_, actions) = send(&mut state, reply(&poll, 200, &session_body("Ada")));
    assert!(requests(&actions).is_empty());
}

#[test]
fn polling_re_checks_the_session() {
    let mut state = initialize(&knowledgelink::Config {
        session_poll_secs: 2,
        ..config()
    });
    let (_, actions) = send(&mut state, Event::PermissionsResult { granted: true });
    let check = only_request(&actions, RequestKind::Session);
    send(&mut state, reply(&check, 200, "null"));

    assert!(tick(&mut state, 1).is_empty());
    let actions = tick(&mut state, 1);
    only_request(&actions, RequestKind::Session);
}

#[test]
fn signed_out_surface_only_offers_sign_in() {
    let mut state = signed_out();

    for event in [Event::FocusUrlInput, Event::Refresh, Event::KeyDown, Event::SignOut] {
        assert_eq!(send(&mut state, event), (false, vec![]));
    }

    let (_, actions) = send(&mut state, Event::SignIn);
    assert_eq!(
        actions,
        vec![Action::OpenUrl {
            url: "http://localhost:3000/api/auth/signin/google".to_string()
        }]
    );

    match state.compute_viewmodel(40, 80).screen {
        Screen::SignIn(info) => assert_eq!(info.button, "Sign in with Google"),
        other => panic!("expected sign-in screen, got {other:?}"),
    }
}

#[test]
fn loading_surface_ignores_input_while_checking() {
    let (mut state, check) = started();

    for event in [
        Event::FocusUrlInput,
        Event::Submit,
        Event::Refresh,
        Event::FocusSearchInput,
        Event::SignOut,
        Event::SignIn,
    ] {
        assert_eq!(send(&mut state, event), (false, vec![]));
    }

    assert_eq!(state.gate.status(), &SessionStatus::Loading);
    assert!(state.gate.is_checking());
    assert!(matches!(state.compute_viewmodel(40, 80).screen, Screen::Loading { .. }));

    // The original check still resolves the gate.
    send(&mut state, reply(&check, 200, &session_body("Ada")));
    assert!(state.gate.status().is_authenticated());
}

#[test]
fn poll_answered_before_sign_out_does_not_restore_the_session() {
    let mut state = signed_in("Ada", &[link("https://a.dev", "A")]);
    let poll = state.gate.check(&mut state.client).unwrap();
    let poll = poll.request().unwrap().clone();

    let (_, actions) = send(&mut state, Event::SignOut);
    let sign_out = only_request(&actions, RequestKind::SignOut);
    let (_, actions) = send(&mut state, reply(&sign_out, 200, "{}"));
    let check = only_request(&actions, RequestKind::Session);
    assert_ne!(check.context.id, poll.context.id);

    let (render, actions) = send(&mut state, reply(&poll, 200, &session_body("Ada")));
    assert!(!render);
    assert!(actions.is_empty());

    send(&mut state, reply(&check, 200, "null"));
    assert_eq!(state.gate.status(), &SessionStatus::Unauthenticated);
    assert!(state.links.links().is_empty());
}

#[test]
fn failed_session_check_means_signed_out() {
    let (mut state, check) = started();
    send(&mut state, reply(&check, 500, "oops"));
    assert_eq!(state.gate.status(), &SessionStatus::Unauthenticated);
}

#[test]
fn denied_permissions_mean_signed_out() {
    let mut state = initialize(&config());
    send(&mut state, Event::PermissionsResult { granted: false });
    assert_eq!(state.gate.status(), &SessionStatus::Unauthenticated);
}

#[test]
fn session_check_times_out() {
    let (mut state, check) = started();
    tick(&mut state, TIMEOUT_SECS);
    assert_eq!(state.gate.status(), &SessionStatus::Unauthenticated);

    // The late reply no longer counts.
    send(&mut state, reply(&check, 200, &session_body("Ada")));
    assert_eq!(state.gate.status(), &SessionStatus::Unauthenticated);
}

#[test]
fn sign_out_clears_the_view_and_drops_old_replies() {
    let mut state = signed_in("Ada", &[link("https://a.dev", "A")]);
    let refresh = state.links.refresh(&mut state.client, &state.gate.context().unwrap());
    let refresh = refresh.request().unwrap().clone();

    let (_, actions) = send(&mut state, Event::SignOut);
    let sign_out = only_request(&actions, RequestKind::SignOut);
    let (_, actions) = send(&mut state, reply(&sign_out, 200, "{}"));
    let check = only_request(&actions, RequestKind::Session);
    send(&mut state, reply(&check, 200, "{}"));

    assert_eq!(state.gate.status(), &SessionStatus::Unauthenticated);
    assert!(state.links.links().is_empty());

    // Sign back in, then the refresh from the previous session answers.
    let (_, actions) = send(&mut state, Event::PermissionsResult { granted: true });
    let check = only_request(&actions, RequestKind::Session);
    let (_, actions) = send(&mut state, reply(&check, 200, &session_body("Ada")));
    let fresh = only_request(&actions, RequestKind::ListLinks);

    let (render, _) = send(&mut state, reply(&refresh, 200, &links_body(&[link("https://old.dev", "Old")])));
    assert!(!render);
    assert!(state.links.links().is_empty());

    send(&mut state, reply(&fresh, 200, &links_body(&[link("https://new.dev", "New")])));
    assert_eq!(state.links.links()[0].url, "https://new.dev");
}

#[test]
fn a_different_user_starts_a_new_session() {
    let mut state = signed_in("Ada", &[link("https://a.dev", "A")]);
    let epoch = state.gate.epoch();

    let poll = state.gate.check(&mut state.client).unwrap();
    let poll = poll.request().unwrap().clone();
    let (_, actions) = send(&mut state, reply(&poll, 200, &session_body("Grace")));

    only_request(&actions, RequestKind::ListLinks);
    assert!(state.gate.epoch() > epoch);
    assert!(state.links.links().is_empty());
}
