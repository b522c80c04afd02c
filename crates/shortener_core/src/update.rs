use crate::{is_well_formed_url, Effect, FormState, Msg, Outcome, Phase, GENERIC_FAILURE_MESSAGE};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FormState, msg: Msg) -> (FormState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Invariant: one request in flight at most, even if the disabled
            // control is bypassed.
            if state.phase().is_submitting() {
                return (state, Vec::new());
            }
            if !is_well_formed_url(state.input_url()) {
                return (state, Vec::new());
            }
            let long_url = state.input_url().trim().to_owned();
            let request_id = state.begin_submission();
            vec![Effect::ShortenUrl {
                request_id,
                long_url,
            }]
        }
        Msg::ShortenCompleted {
            request_id,
            outcome,
        } => {
            if state.in_flight() != Some(request_id) {
                return (state, Vec::new());
            }
            let phase = match outcome {
                Outcome::Shortened { short_url } => Phase::Succeeded { short_url },
                Outcome::Failed { message } if message.trim().is_empty() => Phase::Failed {
                    message: GENERIC_FAILURE_MESSAGE.to_owned(),
                },
                Outcome::Failed { message } => Phase::Failed { message },
            };
            state.finish(phase);
            Vec::new()
        }
        Msg::Teardown => match state.in_flight() {
            Some(request_id) => {
                state.finish(Phase::Idle);
                vec![Effect::CancelRequest { request_id }]
            }
            None => Vec::new(),
        },
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
