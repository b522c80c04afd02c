use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RequestId = u64;

pub const SHORTEN_PATH: &str = "/api/v1/shorten";
pub const HEALTH_PATH: &str = "/api/v1/health";

/// User-facing message for every failure the service itself reports.
pub const ERROR_MESSAGE_FAILED: &str = "Failed to shorten URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    pub long_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
}

/// Body the service sends alongside a non-2xx status.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ServiceErrorBody {
    pub error: String,
}

/// Component name to "is up" flag, as returned by the health endpoint.
pub type HealthReport = BTreeMap<String, bool>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ShortenCompleted {
        request_id: RequestId,
        result: Result<ShortenResponse, ShortenError>,
    },
    HealthChecked(Result<HealthReport, ShortenError>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({kind}){}", detail_suffix(.detail))]
pub struct ShortenError {
    pub kind: FailureKind,
    /// What the form shows.
    pub message: String,
    /// Extra context for logs only (service error body, parse error).
    pub detail: Option<String>,
}

impl ShortenError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub(crate) fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {detail}"),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidServiceUrl,
    HttpStatus(u16),
    MalformedResponse,
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidServiceUrl => write!(f, "invalid service url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
