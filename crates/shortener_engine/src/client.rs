use std::error::Error as StdError;
use std::time::Duration;

use engine_logging::{clip_url, engine_debug, engine_warn};
use reqwest::StatusCode;
use url::Url;

use crate::types::ServiceErrorBody;
use crate::{
    FailureKind, HealthReport, ShortenError, ShortenRequest, ShortenResponse,
    ERROR_MESSAGE_FAILED, HEALTH_PATH, SHORTEN_PATH,
};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Scheme, host and optional path prefix of the shortening service.
    pub service_url: String,
    /// `None` leaves connection setup to the OS defaults.
    pub connect_timeout: Option<Duration>,
    /// `None` waits for the network layer to report success or failure.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Shortener: Send + Sync {
    async fn shorten(&self, long_url: &str) -> Result<ShortenResponse, ShortenError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestShortener {
    settings: ClientSettings,
}

impl ReqwestShortener {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Queries the service health endpoint.
    pub async fn health(&self) -> Result<HealthReport, ShortenError> {
        let endpoint = self.endpoint(HEALTH_PATH)?;
        let client = self.build_client()?;
        let response = client
            .get(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        serde_json::from_slice(&body).map_err(|err| {
            ShortenError::new(FailureKind::MalformedResponse, "Malformed health report")
                .with_detail(err.to_string())
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ShortenError> {
        let base = self.settings.service_url.trim().trim_end_matches('/');
        let joined = format!("{base}{path}");
        let url = Url::parse(&joined).map_err(|err| {
            ShortenError::new(FailureKind::InvalidServiceUrl, ERROR_MESSAGE_FAILED)
                .with_detail(format!("{joined}: {err}"))
        })?;
        if !url.has_host() {
            return Err(
                ShortenError::new(FailureKind::InvalidServiceUrl, ERROR_MESSAGE_FAILED)
                    .with_detail(format!("{joined}: missing host")),
            );
        }
        Ok(url)
    }

    fn build_client(&self) -> Result<reqwest::Client, ShortenError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| ShortenError::new(FailureKind::Network, describe_error(&err)))
    }
}

#[async_trait::async_trait]
impl Shortener for ReqwestShortener {
    async fn shorten(&self, long_url: &str) -> Result<ShortenResponse, ShortenError> {
        let endpoint = self.endpoint(SHORTEN_PATH)?;
        let client = self.build_client()?;
        let payload = ShortenRequest {
            long_url: long_url.to_string(),
        };

        engine_debug!("POST {} long_url={}", endpoint, clip_url(long_url));
        let response = client
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            let err = status_error(status, &body);
            engine_warn!("Shortening service rejected request: {}", err);
            return Err(err);
        }

        parse_shorten_response(&body)
    }
}

fn parse_shorten_response(body: &[u8]) -> Result<ShortenResponse, ShortenError> {
    let parsed: ShortenResponse = serde_json::from_slice(body).map_err(|err| {
        ShortenError::new(FailureKind::MalformedResponse, ERROR_MESSAGE_FAILED)
            .with_detail(err.to_string())
    })?;
    if parsed.short_url.trim().is_empty() {
        return Err(
            ShortenError::new(FailureKind::MalformedResponse, ERROR_MESSAGE_FAILED)
                .with_detail("empty shortUrl"),
        );
    }
    Ok(parsed)
}

/// Non-2xx answers are opaque; the `{"error": ..}` body only feeds the log detail.
fn status_error(status: StatusCode, body: &[u8]) -> ShortenError {
    let err = ShortenError::new(FailureKind::HttpStatus(status.as_u16()), ERROR_MESSAGE_FAILED);
    match serde_json::from_slice::<ServiceErrorBody>(body) {
        Ok(service) => err.with_detail(service.error),
        Err(_) => err.with_detail(status.to_string()),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ShortenError {
    if err.is_timeout() {
        return ShortenError::new(FailureKind::Timeout, describe_error(&err));
    }
    if err.is_decode() {
        return ShortenError::new(FailureKind::MalformedResponse, ERROR_MESSAGE_FAILED)
            .with_detail(describe_error(&err));
    }
    ShortenError::new(FailureKind::Network, describe_error(&err))
}

/// Flattens an error and its sources into one line, e.g.
/// `error sending request: client error (Connect): Connection refused`.
fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
