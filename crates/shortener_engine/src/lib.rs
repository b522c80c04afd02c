//! Shortener engine: HTTP client for the shortening service and effect execution.
mod client;
mod engine;
mod types;

pub use client::{ClientSettings, ReqwestShortener, Shortener, DEFAULT_SERVICE_URL};
pub use engine::{EngineError, EngineHandle};
pub use types::{
    EngineEvent, FailureKind, HealthReport, RequestId, ShortenError, ShortenRequest,
    ShortenResponse, ERROR_MESSAGE_FAILED, HEALTH_PATH, SHORTEN_PATH,
};
