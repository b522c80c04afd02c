use crate::Phase;

pub const SUBMIT_LABEL_IDLE: &str = "Shorten URL";
pub const SUBMIT_LABEL_BUSY: &str = "Shortening...";
/// Shown when the service answers with anything but a usable success.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to shorten URL";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormViewModel {
    pub input_url: String,
    pub submit: SubmitControl,
    pub success: Option<SuccessBlock>,
    pub error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

impl SubmitControl {
    pub(crate) fn for_phase(phase: &Phase) -> Self {
        if phase.is_submitting() {
            Self {
                enabled: false,
                label: SUBMIT_LABEL_BUSY,
            }
        } else {
            Self::default()
        }
    }
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            enabled: true,
            label: SUBMIT_LABEL_IDLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessBlock {
    pub text: String,
    pub href: String,
    pub target: LinkTarget,
}

/// Where activating the result link should navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// Open in a fresh window/tab, leaving the form in place.
    NewContext,
}
