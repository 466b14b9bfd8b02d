use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use flexi_logging::{flexi_debug, flexi_info, flexi_warn};
use tokio_util::sync::CancellationToken;

use crate::client::{ClientSettings, InferenceClient, ReqwestInferenceClient};
use crate::{EngineEvent, Endpoints, InferenceError, InferenceRequest, RequestId};

#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub endpoints: Endpoints,
    pub client: ClientSettings,
}

enum EngineCommand {
    Submit {
        request_id: RequestId,
        request: InferenceRequest,
    },
    Cancel {
        request_id: RequestId,
    },
}

type InFlight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Owns a background tokio runtime that executes inference requests.
///
/// Every submitted request is registered with its own cancellation token
/// until it resolves. Dropping the handle stops the runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Result<Self, InferenceError> {
        let client = ReqwestInferenceClient::new(settings.endpoints, settings.client)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn InferenceClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let in_flight: InFlight = Arc::new(Mutex::new(HashMap::new()));
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &client, &in_flight, command, &event_tx);
            }
            flexi_debug!("engine command channel closed; shutting down runtime");
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, request_id: RequestId, request: InferenceRequest) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Submit { request_id, request });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    client: &Arc<dyn InferenceClient>,
    in_flight: &InFlight,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            request_id,
            request,
        } => {
            let token = CancellationToken::new();
            lock(in_flight).insert(request_id, token.clone());
            flexi_info!(
                "request {} dispatched to {} endpoint",
                request_id,
                request.capability
            );

            let client = client.clone();
            let in_flight = in_flight.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let event = tokio::select! {
                    _ = token.cancelled() => EngineEvent::Cancelled { request_id },
                    result = client.infer(&request) => EngineEvent::Completed { request_id, result },
                };
                lock(&in_flight).remove(&request_id);
                match &event {
                    EngineEvent::Completed { result: Ok(_), .. } => {
                        flexi_info!("request {} succeeded", request_id);
                    }
                    EngineEvent::Completed { result: Err(err), .. } => {
                        flexi_warn!("request {} failed: {}", request_id, err);
                    }
                    EngineEvent::Cancelled { .. } => {
                        flexi_info!("request {} cancelled", request_id);
                    }
                }
                let _ = event_tx.send(event);
            });
        }
        EngineCommand::Cancel { request_id } => match lock(in_flight).remove(&request_id) {
            Some(token) => token.cancel(),
            None => flexi_debug!("cancel for unknown or finished request {}", request_id),
        },
    }
}

fn lock(
    in_flight: &InFlight,
) -> std::sync::MutexGuard<'_, HashMap<RequestId, CancellationToken>> {
    in_flight
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
