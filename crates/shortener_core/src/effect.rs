#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one shortening request for `long_url`.
    ShortenUrl {
        request_id: crate::RequestId,
        long_url: String,
    },
    /// Abandon an in-flight request; its completion must not reach the state.
    CancelRequest { request_id: crate::RequestId },
}
