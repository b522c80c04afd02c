#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User confirmed the form (Enter / submit button).
    SubmitClicked,
    /// Engine completion for a shortening request.
    ShortenCompleted {
        request_id: crate::RequestId,
        outcome: Outcome,
    },
    /// The form is going away; drop whatever is in flight.
    Teardown,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Result of one shortening request, already reduced to what the form shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Shortened { short_url: String },
    Failed { message: String },
}
