use crate::{RequestId, View};

/// Side effects requested by [`crate::update`]; executed by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST `input` to the endpoint backing `view`.
    SendRequest {
        request_id: RequestId,
        view: View,
        input: String,
    },
    /// Abort a request whose panel was superseded or unmounted.
    CancelRequest { request_id: RequestId },
}
