use std::collections::HashMap;
use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{clip_url, engine_debug, engine_info, engine_warn};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::client::{ClientSettings, ReqwestShortener, Shortener};
use crate::{EngineEvent, RequestId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("engine stopped")]
    Disconnected,
}

enum EngineCommand {
    Shorten { request_id: RequestId, long_url: String },
    Cancel { request_id: RequestId },
    CheckHealth,
    Shutdown,
}

type InFlight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs shortening requests on a background tokio runtime and reports completions.
///
/// Commands and events cross plain `std::sync::mpsc` channels so the UI loop never
/// has to be async.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let client = Arc::new(ReqwestShortener::new(settings));
        Self::spawn(client.clone(), Some(client))
    }

    /// Runs against any `Shortener`; health checks are unavailable on this handle.
    pub fn with_shortener(shortener: Arc<dyn Shortener>) -> Result<Self, EngineError> {
        Self::spawn(shortener, None)
    }

    fn spawn(
        shortener: Arc<dyn Shortener>,
        health_client: Option<Arc<ReqwestShortener>>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            let in_flight: InFlight = Arc::default();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Shorten {
                        request_id,
                        long_url,
                    } => {
                        let token = CancellationToken::new();
                        if let Ok(mut map) = in_flight.lock() {
                            map.insert(request_id, token.clone());
                        }
                        runtime.spawn(run_request(
                            shortener.clone(),
                            request_id,
                            long_url,
                            token,
                            in_flight.clone(),
                            event_tx.clone(),
                        ));
                    }
                    EngineCommand::Cancel { request_id } => {
                        let token = in_flight
                            .lock()
                            .ok()
                            .and_then(|mut map| map.remove(&request_id));
                        match token {
                            Some(token) => {
                                engine_info!("Cancelling request_id={}", request_id);
                                token.cancel();
                            }
                            None => engine_debug!(
                                "Cancel for request_id={} ignored; not in flight",
                                request_id
                            ),
                        }
                    }
                    EngineCommand::CheckHealth => match &health_client {
                        Some(health_client) => {
                            let health_client = health_client.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                let result = health_client.health().await;
                                let _ = event_tx.send(EngineEvent::HealthChecked(result));
                            });
                        }
                        None => {
                            engine_warn!("Health check requested without a service client");
                        }
                    },
                    EngineCommand::Shutdown => {
                        engine_info!("Engine shutting down");
                        break;
                    }
                }
            }
            runtime.shutdown_timeout(Duration::from_millis(200));
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn shorten(&self, request_id: RequestId, long_url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Shorten {
            request_id,
            long_url: long_url.into(),
        });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Stops the engine thread; in-flight requests are dropped without completion.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }

    /// Waits up to `timeout` for the next event. `Ok(None)` means nothing arrived in time;
    /// `Err(EngineError::Disconnected)` means no event will ever arrive again.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineError::Disconnected),
        }
    }
}

async fn run_request(
    shortener: Arc<dyn Shortener>,
    request_id: RequestId,
    long_url: String,
    token: CancellationToken,
    in_flight: InFlight,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    engine_info!(
        "Shorten request_id={} url_len={} url={}",
        request_id,
        long_url.len(),
        clip_url(&long_url)
    );

    let result = tokio::select! {
        _ = token.cancelled() => None,
        result = shortener.shorten(&long_url) => Some(result),
    };

    if let Ok(mut map) = in_flight.lock() {
        map.remove(&request_id);
    }

    match result {
        Some(result) => {
            if let Err(err) = &result {
                engine_warn!("Request {} failed: {}", request_id, err);
            }
            let _ = event_tx.send(EngineEvent::ShortenCompleted { request_id, result });
        }
        None => engine_debug!("Request {} dropped after cancellation", request_id),
    }
}
