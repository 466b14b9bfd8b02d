use std::time::Duration;

use flexi_core::{Effect, Failure, Msg, View};
use flexi_engine::{
    Capability, EngineEvent, EngineHandle, EngineSettings, FailureKind, InferenceError,
    InferenceRequest,
};
use flexi_logging::{flexi_debug, flexi_info};

/// Executes core effects on the engine and turns engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: EngineSettings) -> Result<Self, InferenceError> {
        Ok(Self::with_engine(EngineHandle::new(settings)?))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendRequest {
                    request_id,
                    view,
                    input,
                } => {
                    flexi_info!(
                        "SendRequest request_id={} view={} input_len={}",
                        request_id,
                        view,
                        input.len()
                    );
                    self.engine
                        .submit(request_id, InferenceRequest::new(map_view(view), input));
                }
                Effect::CancelRequest { request_id } => {
                    flexi_info!("CancelRequest request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
            }
        }
    }

    /// Next message from the engine, if one is ready.
    pub fn try_next_msg(&self) -> Option<Msg> {
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = map_event(event) {
                return Some(msg);
            }
        }
        None
    }

    /// Like [`Self::try_next_msg`] but waits up to `timeout` for an event.
    pub fn next_msg_timeout(&self, timeout: Duration) -> Option<Msg> {
        let event = self.engine.recv_timeout(timeout)?;
        map_event(event).or_else(|| self.try_next_msg())
    }
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::Completed { request_id, result } => Some(Msg::ResponseReceived {
            request_id,
            result: result.map_err(|err| map_failure(&err.kind)),
        }),
        EngineEvent::Cancelled { request_id } => {
            flexi_debug!("request {} cancelled; nothing to apply", request_id);
            None
        }
    }
}

fn map_view(view: View) -> Capability {
    match view {
        View::Spam => Capability::Spam,
        View::Toxicity => Capability::Toxicity,
        View::ImageDetection => Capability::ImageDetection,
    }
}

fn map_failure(kind: &FailureKind) -> Failure {
    match kind {
        FailureKind::HttpStatus(code) => Failure::HttpStatus(*code),
        FailureKind::Network => Failure::Network,
        FailureKind::Timeout => Failure::Timeout,
        FailureKind::InvalidJson | FailureKind::TooLarge { .. } => Failure::Other,
    }
}
