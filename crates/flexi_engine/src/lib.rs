//! FlexiConnect engine: HTTP clients for the inference APIs and the
//! background runtime that executes requests.
mod client;
mod endpoints;
mod engine;
mod types;

pub use client::{ClientSettings, InferenceClient, ReqwestInferenceClient};
pub use endpoints::{EndpointError, Endpoints};
pub use engine::{EngineHandle, EngineSettings};
pub use types::{
    Capability, EngineEvent, FailureKind, InferenceError, InferenceRequest, RequestId,
};
