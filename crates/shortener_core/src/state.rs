use crate::view_model::{FormViewModel, LinkTarget, SubmitControl, SuccessBlock};

pub type RequestId = u64;

/// Lifecycle of the current submission attempt.
///
/// The result URL and error message live inside their variants, so a form can never
/// show a success and an error at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting {
        request_id: RequestId,
    },
    Succeeded {
        short_url: String,
    },
    Failed {
        message: String,
    },
}

impl Phase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Phase::Submitting { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    input_url: String,
    phase: Phase,
    next_request_id: RequestId,
    dirty: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_url(&self) -> &str {
        &self.input_url
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        match self.phase {
            Phase::Submitting { request_id } => Some(request_id),
            _ => None,
        }
    }

    pub fn view(&self) -> FormViewModel {
        let submit = SubmitControl::for_phase(&self.phase);
        let success = match &self.phase {
            Phase::Succeeded { short_url } => Some(SuccessBlock {
                text: short_url.clone(),
                href: short_url.clone(),
                target: LinkTarget::NewContext,
            }),
            _ => None,
        };
        let error = match &self.phase {
            Phase::Failed { message } => Some(message.clone()),
            _ => None,
        };

        FormViewModel {
            input_url: self.input_url.clone(),
            submit,
            success,
            error,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input_url != text {
            self.input_url = text;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_submission(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.phase = Phase::Submitting { request_id };
        self.dirty = true;
        request_id
    }

    pub(crate) fn finish(&mut self, phase: Phase) {
        self.phase = phase;
        self.dirty = true;
    }
}
