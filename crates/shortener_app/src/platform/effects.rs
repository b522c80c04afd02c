use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use shortener_core::{Effect, Msg, Outcome};
use shortener_engine::{
    EngineError, EngineEvent, EngineHandle, HealthReport, ShortenError, ShortenResponse,
};

use super::settings::Settings;

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: &Settings) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings.client_settings())?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ShortenUrl {
                    request_id,
                    long_url,
                } => {
                    engine_info!(
                        "ShortenUrl request_id={} url_len={}",
                        request_id,
                        long_url.len()
                    );
                    self.engine.shorten(request_id, long_url);
                }
                Effect::CancelRequest { request_id } => {
                    self.engine.cancel(request_id);
                }
            }
        }
    }

    /// Waits up to `timeout` for the next engine event that maps to a message.
    pub fn next_msg(&self, timeout: Duration) -> Result<Option<Msg>, EngineError> {
        let msg = match self.engine.recv_timeout(timeout)? {
            Some(EngineEvent::ShortenCompleted { request_id, result }) => {
                Some(Msg::ShortenCompleted {
                    request_id,
                    outcome: to_outcome(result),
                })
            }
            Some(EngineEvent::HealthChecked(_)) => {
                engine_warn!("Unexpected health report while the form is open");
                None
            }
            None => None,
        };
        Ok(msg)
    }

    /// Runs one health check and blocks until it answers or `timeout` passes.
    pub fn check_health(
        &self,
        timeout: Duration,
    ) -> Result<Option<Result<HealthReport, ShortenError>>, EngineError> {
        self.engine.check_health();
        match self.engine.recv_timeout(timeout)? {
            Some(EngineEvent::HealthChecked(result)) => Ok(Some(result)),
            Some(EngineEvent::ShortenCompleted { .. }) | None => Ok(None),
        }
    }

    #[cfg(test)]
    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

fn to_outcome(result: Result<ShortenResponse, ShortenError>) -> Outcome {
    match result {
        Ok(response) => Outcome::Shortened {
            short_url: response.short_url,
        },
        Err(err) => Outcome::Failed {
            message: err.message,
        },
    }
}
