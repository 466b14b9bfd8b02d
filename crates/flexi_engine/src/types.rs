use std::fmt;

pub type RequestId = u64;

/// An inference API reachable through the playground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Spam,
    Toxicity,
    ImageDetection,
}

impl Capability {
    /// Name of the single JSON field the endpoint expects.
    pub fn body_field(self) -> &'static str {
        match self {
            Capability::Spam => "text",
            Capability::Toxicity => "comment",
            Capability::ImageDetection => "imageData",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Spam => write!(f, "spam"),
            Capability::Toxicity => write!(f, "toxicity"),
            Capability::ImageDetection => write!(f, "image-detection"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub capability: Capability,
    pub input: String,
}

impl InferenceRequest {
    pub fn new(capability: Capability, input: impl Into<String>) -> Self {
        Self {
            capability,
            input: input.into(),
        }
    }

    /// JSON body: `{ "<field>": input }`.
    pub fn body(&self) -> serde_json::Value {
        let mut body = serde_json::Map::with_capacity(1);
        body.insert(
            self.capability.body_field().to_string(),
            serde_json::Value::String(self.input.clone()),
        );
        serde_json::Value::Object(body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Completed {
        request_id: RequestId,
        result: Result<serde_json::Value, InferenceError>,
    },
    /// The request was aborted before it resolved.
    Cancelled { request_id: RequestId },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct InferenceError {
    pub kind: FailureKind,
    pub message: String,
}

impl InferenceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    HttpStatus(u16),
    Network,
    Timeout,
    InvalidJson,
    TooLarge { max_bytes: u64, actual: Option<u64> },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::InvalidJson => write!(f, "invalid json body"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
        }
    }
}
