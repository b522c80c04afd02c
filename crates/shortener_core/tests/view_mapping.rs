use pretty_assertions::assert_eq;
use shortener_core::{
    update, FormState, FormViewModel, LinkTarget, Msg, Outcome, SubmitControl, SuccessBlock,
    GENERIC_FAILURE_MESSAGE, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE,
};

const LONG_URL: &str = "https://example.com/very/long/path";

fn submitted() -> FormState {
    let (state, _) = update(FormState::new(), Msg::InputChanged(LONG_URL.to_string()));
    let (state, _) = update(state, Msg::SubmitClicked);
    state
}

fn completed(outcome: Outcome) -> FormState {
    let (mut state, _) = update(
        submitted(),
        Msg::ShortenCompleted {
            request_id: 1,
            outcome,
        },
    );
    state.consume_dirty();
    state
}

#[test]
fn idle_view_enables_submit_and_hides_blocks() {
    let view = FormState::new().view();

    assert_eq!(view, FormViewModel::default());
    assert!(view.submit.enabled);
    assert_eq!(view.submit.label, SUBMIT_LABEL_IDLE);
}

#[test]
fn submitting_view_disables_submit() {
    let view = submitted().view();

    assert_eq!(
        view.submit,
        SubmitControl {
            enabled: false,
            label: SUBMIT_LABEL_BUSY,
        }
    );
    assert_eq!(view.success, None);
    assert_eq!(view.error, None);
}

#[test]
fn succeeded_view_shows_link_with_new_context_target() {
    let view = completed(Outcome::Shortened {
        short_url: "https://short.ly/abc123".to_string(),
    })
    .view();

    assert_eq!(
        view,
        FormViewModel {
            input_url: LONG_URL.to_string(),
            submit: SubmitControl::default(),
            success: Some(SuccessBlock {
                text: "https://short.ly/abc123".to_string(),
                href: "https://short.ly/abc123".to_string(),
                target: LinkTarget::NewContext,
            }),
            error: None,
            dirty: false,
        }
    );
}

#[test]
fn failed_view_shows_error_only() {
    let view = completed(Outcome::Failed {
        message: GENERIC_FAILURE_MESSAGE.to_string(),
    })
    .view();

    assert!(view.submit.enabled);
    assert_eq!(view.submit.label, SUBMIT_LABEL_IDLE);
    assert_eq!(view.success, None);
    assert_eq!(view.error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
}
