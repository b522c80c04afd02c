//! Shortener core: pure submission state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, Outcome};
pub use state::{FormState, Phase, RequestId};
pub use update::update;
pub use validate::is_well_formed_url;
pub use view_model::{
    FormViewModel, LinkTarget, SubmitControl, SuccessBlock, GENERIC_FAILURE_MESSAGE,
    SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE,
};
