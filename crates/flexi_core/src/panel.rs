use std::fmt;

use crate::RequestId;

/// Sample text preloaded into the spam and toxicity panels.
pub const DEFAULT_TEXT_INPUT: &str = "pay me or else I will file a lawsuit against you";

const NETWORK_MESSAGE: &str = "Network error or CORS issue. Please check the API server.";
const TIMEOUT_MESSAGE: &str = "Request timed out.";
const GENERIC_MESSAGE: &str = "An error occurred while making the request.";

/// The closed set of panels reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Spam,
    Toxicity,
    ImageDetection,
}

impl View {
    /// Sidebar order.
    pub const ALL: [View; 3] = [View::Spam, View::Toxicity, View::ImageDetection];

    pub fn sidebar_label(self) -> &'static str {
        match self {
            View::Spam => "Spam API",
            View::Toxicity => "Toxicity API",
            View::ImageDetection => "Image Detection API",
        }
    }

    pub fn default_input(self) -> &'static str {
        match self {
            View::Spam | View::Toxicity => DEFAULT_TEXT_INPUT,
            View::ImageDetection => "",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sidebar_label())
    }
}

/// Why a request failed, as far as the panel cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    HttpStatus(u16),
    /// Transport-level failure: refused connection, DNS, TLS, reset.
    Network,
    Timeout,
    Other,
}

impl Failure {
    /// Text shown in the panel's error slot.
    pub fn user_message(self) -> String {
        match self {
            Failure::HttpStatus(code) => format!("API returned status {code}"),
            Failure::Network => NETWORK_MESSAGE.to_string(),
            Failure::Timeout => TIMEOUT_MESSAGE.to_string(),
            Failure::Other => GENERIC_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelError {
    pub failure: Failure,
    pub message: String,
}

impl From<Failure> for PanelError {
    fn from(failure: Failure) -> Self {
        Self {
            failure,
            message: failure.user_message(),
        }
    }
}

/// Result of the most recent submission. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Outcome {
    #[default]
    Idle,
    Loading {
        request_id: RequestId,
    },
    Succeeded(serde_json::Value),
    Failed(PanelError),
}

impl Outcome {
    pub fn pending_request(&self) -> Option<RequestId> {
        match self {
            Outcome::Loading { request_id } => Some(*request_id),
            _ => None,
        }
    }
}

/// State owned by the mounted panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    view: View,
    input: String,
    outcome: Outcome,
}

impl PanelState {
    /// A freshly mounted panel with its default input.
    pub fn mount(view: View) -> Self {
        Self {
            view,
            input: view.default_input().to_string(),
            outcome: Outcome::Idle,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub(crate) fn set_input(&mut self, input: String) {
        self.input = input;
    }

    pub(crate) fn begin_request(&mut self, request_id: RequestId) {
        self.outcome = Outcome::Loading { request_id };
    }

    /// Applies a resolution if it belongs to the request currently in flight.
    /// Returns `false` for stale or unexpected resolutions.
    pub(crate) fn resolve(
        &mut self,
        request_id: RequestId,
        result: Result<serde_json::Value, Failure>,
    ) -> bool {
        if self.outcome.pending_request() != Some(request_id) {
            return false;
        }
        self.outcome = match result {
            Ok(payload) => Outcome::Succeeded(payload),
            Err(failure) => Outcome::Failed(failure.into()),
        };
        true
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::mount(View::default())
    }
}
