use crate::{Failure, RequestId, View};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User clicked a sidebar entry.
    ViewSelected(View),
    /// User edited the input of the mounted panel.
    InputChanged(String),
    /// User submitted the mounted panel.
    Submitted,
    /// Engine resolved a request.
    ResponseReceived {
        request_id: RequestId,
        result: Result<serde_json::Value, Failure>,
    },
    /// UI/render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
