use std::time::Duration;

use flexi_logging::{flexi_debug, flexi_trace};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::{Endpoints, FailureKind, InferenceError, InferenceRequest};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// `None` waits as long as the server takes.
    pub connect_timeout: Option<Duration>,
    /// `None` waits as long as the server takes.
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            request_timeout: None,
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends one request and returns the response body as untyped JSON.
    async fn infer(&self, request: &InferenceRequest)
        -> Result<serde_json::Value, InferenceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestInferenceClient {
    client: reqwest::Client,
    endpoints: Endpoints,
    settings: ClientSettings,
}

impl ReqwestInferenceClient {
    pub fn new(endpoints: Endpoints, settings: ClientSettings) -> Result<Self, InferenceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| InferenceError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            endpoints,
            settings,
        })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, InferenceError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl InferenceClient for ReqwestInferenceClient {
    async fn infer(
        &self,
        request: &InferenceRequest,
    ) -> Result<serde_json::Value, InferenceError> {
        let url = self.endpoints.url(request.capability).clone();
        let body = serde_json::to_vec(&request.body())
            .map_err(|err| InferenceError::new(FailureKind::InvalidJson, err.to_string()))?;

        flexi_debug!(
            "POST {} capability={} body_len={}",
            url,
            request.capability,
            body.len()
        );
        flexi_trace!("request input: {}", request.input);

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = self.read_body(response).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| InferenceError::new(FailureKind::InvalidJson, err.to_string()))
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> InferenceError {
    InferenceError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> InferenceError {
    if err.is_timeout() {
        return InferenceError::new(FailureKind::Timeout, err.to_string());
    }
    InferenceError::new(FailureKind::Network, err.to_string())
}
