use std::sync::{Arc, Mutex, Once};
use std::time::{Duration, Instant};

use flexi_engine::{
    Capability, EngineEvent, EngineHandle, FailureKind, InferenceClient, InferenceError,
    InferenceRequest,
};
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(flexi_logging::initialize_for_tests);
}

/// Echoes the input back after a per-input delay.
#[derive(Default)]
struct ScriptedClient {
    seen: Mutex<Vec<InferenceRequest>>,
}

#[async_trait::async_trait]
impl InferenceClient for ScriptedClient {
    async fn infer(
        &self,
        request: &InferenceRequest,
    ) -> Result<serde_json::Value, InferenceError> {
        self.seen.lock().unwrap().push(request.clone());
        match request.input.as_str() {
            "slow" => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(json!({"input": "slow"}))
            }
            "fail" => Err(InferenceError {
                kind: FailureKind::HttpStatus(503),
                message: "service unavailable".to_string(),
            }),
            other => Ok(json!({"input": other})),
        }
    }
}

fn wait_for_event(engine: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if let Some(event) = engine.recv_timeout(Duration::from_millis(50)) {
            return event;
        }
    }
    panic!("no engine event before deadline");
}

#[test]
fn completed_request_reports_payload() {
    init_logging();
    let client = Arc::new(ScriptedClient::default());
    let engine = EngineHandle::with_client(client.clone());

    engine.submit(1, InferenceRequest::new(Capability::Spam, "hello"));

    assert_eq!(
        wait_for_event(&engine),
        EngineEvent::Completed {
            request_id: 1,
            result: Ok(json!({"input": "hello"})),
        }
    );
    assert_eq!(client.seen.lock().unwrap().len(), 1);
}

#[test]
fn failed_request_reports_error() {
    init_logging();
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient::default()));

    engine.submit(3, InferenceRequest::new(Capability::Toxicity, "fail"));

    match wait_for_event(&engine) {
        EngineEvent::Completed {
            request_id,
            result: Err(err),
        } => {
            assert_eq!(request_id, 3);
            assert_eq!(err.kind, FailureKind::HttpStatus(503));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn cancel_aborts_pending_request() {
    init_logging();
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient::default()));

    engine.submit(7, InferenceRequest::new(Capability::Spam, "slow"));
    engine.cancel(7);

    assert_eq!(
        wait_for_event(&engine),
        EngineEvent::Cancelled { request_id: 7 }
    );
}

#[test]
fn cancel_leaves_other_requests_alone() {
    init_logging();
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient::default()));

    engine.submit(1, InferenceRequest::new(Capability::Spam, "slow"));
    engine.cancel(1);
    engine.submit(2, InferenceRequest::new(Capability::Spam, "fresh"));

    let mut events = vec![wait_for_event(&engine), wait_for_event(&engine)];
    events.sort_by_key(|event| match event {
        EngineEvent::Completed { request_id, .. } | EngineEvent::Cancelled { request_id } => {
            *request_id
        }
    });

    assert_eq!(
        events,
        vec![
            EngineEvent::Cancelled { request_id: 1 },
            EngineEvent::Completed {
                request_id: 2,
                result: Ok(json!({"input": "fresh"})),
            },
        ]
    );
}

#[test]
fn cancel_of_unknown_request_is_harmless() {
    init_logging();
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient::default()));

    engine.cancel(99);
    engine.submit(1, InferenceRequest::new(Capability::ImageDetection, "aGk="));

    assert_eq!(
        wait_for_event(&engine),
        EngineEvent::Completed {
            request_id: 1,
            result: Ok(json!({"input": "aGk="})),
        }
    );
}
