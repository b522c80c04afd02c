use std::sync::Once;

use shortener_core::{
    update, Effect, FormState, Msg, Outcome, Phase, RequestId, GENERIC_FAILURE_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn submit_url(state: FormState, input: &str) -> (FormState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SubmitClicked)
}

fn complete(state: FormState, request_id: RequestId, outcome: Outcome) -> FormState {
    let (state, effects) = update(
        state,
        Msg::ShortenCompleted {
            request_id,
            outcome,
        },
    );
    assert!(effects.is_empty());
    state
}

fn shortened(url: &str) -> Outcome {
    Outcome::Shortened {
        short_url: url.to_string(),
    }
}

fn failed(message: &str) -> Outcome {
    Outcome::Failed {
        message: message.to_string(),
    }
}

#[test]
fn input_change_does_not_touch_phase() {
    init_logging();
    let (mut state, effects) = update(FormState::new(), Msg::InputChanged("not a url".into()));

    assert_eq!(state.phase(), &Phase::Idle);
    assert_eq!(state.input_url(), "not a url");
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
}

#[test]
fn submit_enters_submitting_before_completion() {
    init_logging();
    let (state, effects) = submit_url(FormState::new(), "https://example.com/very/long/path");

    assert_eq!(state.phase(), &Phase::Submitting { request_id: 1 });
    assert_eq!(
        effects,
        vec![Effect::ShortenUrl {
            request_id: 1,
            long_url: "https://example.com/very/long/path".to_string(),
        }]
    );
}

#[test]
fn submit_trims_surrounding_whitespace() {
    init_logging();
    let (_state, effects) = submit_url(FormState::new(), "  https://example.com/x \n");

    assert_eq!(
        effects,
        vec![Effect::ShortenUrl {
            request_id: 1,
            long_url: "https://example.com/x".to_string(),
        }]
    );
}

#[test]
fn malformed_input_suppresses_submission_entirely() {
    init_logging();
    let (mut state, _) = update(FormState::new(), Msg::InputChanged("example.com".into()));
    assert!(state.consume_dirty());
    let before = state.clone();

    let (mut next, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(next, before);
    assert!(!next.consume_dirty());
}

#[test]
fn empty_input_is_suppressed_even_after_a_result() {
    init_logging();
    let (state, _) = submit_url(FormState::new(), "https://example.com/a");
    let state = complete(state, 1, shortened("https://short.ly/a"));

    let (next, effects) = submit_url(state, "");

    assert!(effects.is_empty());
    assert_eq!(
        next.phase(),
        &Phase::Succeeded {
            short_url: "https://short.ly/a".to_string()
        }
    );
}

#[test]
fn success_stores_short_url() {
    init_logging();
    let (state, _) = submit_url(FormState::new(), "https://example.com/very/long/path");
    let state = complete(state, 1, shortened("https://short.ly/abc123"));

    assert_eq!(
        state.phase(),
        &Phase::Succeeded {
            short_url: "https://short.ly/abc123".to_string()
        }
    );
    assert_eq!(state.in_flight(), None);
}

#[test]
fn failure_stores_message() {
    init_logging();
    let (state, _) = submit_url(FormState::new(), "https://example.com/");
    let state = complete(state, 1, failed(GENERIC_FAILURE_MESSAGE));

    assert_eq!(
        state.phase(),
        &Phase::Failed {
            message: GENERIC_FAILURE_MESSAGE.to_string()
        }
    );
}

#[test]
fn blank_failure_message_falls_back_to_generic_text() {
    init_logging();
    let (state, _) = submit_url(FormState::new(), "https://example.com/");
    let state = complete(state, 1, failed("  "));

    assert_eq!(
        state.phase(),
        &Phase::Failed {
            message: GENERIC_FAILURE_MESSAGE.to_string()
        }
    );
}

#[test]
fn second_submit_while_in_flight_is_rejected() {
    init_logging();
    let (state, _) = submit_url(FormState::new(), "https://example.com/one");
    let (state, effects) = submit_url(state, "https://example.com/two");

    assert!(effects.is_empty());
    assert_eq!(state.phase(), &Phase::Submitting { request_id: 1 });
    // Typing stays live while the request is pending.
    assert_eq!(state.input_url(), "https://example.com/two");
}

#[test]
fn new_submission_clears_previous_error() {
    init_logging();
    let (state, _) = submit_url(FormState::new(), "https://example.com/one");
    let state = complete(state, 1, failed("connection refused"));

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(state.phase(), &Phase::Submitting { request_id: 2 });
    assert_eq!(state.view().error, None);
    assert_eq!(effects.len(), 1);
}

#[test]
fn new_submission_clears_previous_result() {
    init_logging();
    let (state, _) = submit_url(FormState::new(), "https://example.com/one");
    let state = complete(state, 1, shortened("https://short.ly/1"));

    let (state, _) = submit_url(state, "https://example.com/two");

    assert_eq!(state.phase(), &Phase::Submitting { request_id: 2 });
    assert_eq!(state.view().success, None);
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, _) = submit_url(FormState::new(), "https://example.com/one");
    let state = complete(state, 1, shortened("https://short.ly/1"));
    let (state, _) = submit_url(state, "https://example.com/two");

    let state = complete(state, 1, failed("late"));
    assert_eq!(state.phase(), &Phase::Submitting { request_id: 2 });

    let state = complete(state, 2, shortened("https://short.ly/2"));
    assert_eq!(
        state.phase(),
        &Phase::Succeeded {
            short_url: "https://short.ly/2".to_string()
        }
    );
}

#[test]
fn teardown_cancels_in_flight_request_and_discards_completion() {
    init_logging();
    let (state, _) = submit_url(FormState::new(), "https://example.com/one");

    let (state, effects) = update(state, Msg::Teardown);
    assert_eq!(effects, vec![Effect::CancelRequest { request_id: 1 }]);
    assert_eq!(state.phase(), &Phase::Idle);

    let state = complete(state, 1, shortened("https://short.ly/1"));
    assert_eq!(state.phase(), &Phase::Idle);
}

#[test]
fn teardown_without_request_is_quiet() {
    init_logging();
    let (state, effects) = update(FormState::new(), Msg::Teardown);

    assert!(effects.is_empty());
    assert_eq!(state, FormState::new());
}
