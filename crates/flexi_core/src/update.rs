use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ViewSelected(view) => {
            if view == state.active_view() {
                return (state, Vec::new());
            }
            let superseded = state.remount(view);
            state.mark_dirty();
            superseded
                .map(|request_id| Effect::CancelRequest { request_id })
                .into_iter()
                .collect()
        }
        Msg::InputChanged(input) => {
            state.panel_mut().set_input(input);
            state.mark_dirty();
            Vec::new()
        }
        Msg::Submitted => {
            // A resubmission supersedes whatever is still in flight.
            let superseded = state.panel().outcome().pending_request();
            let request_id = state.allocate_request_id();
            let panel = state.panel_mut();
            panel.begin_request(request_id);
            let send = Effect::SendRequest {
                request_id,
                view: panel.view(),
                input: panel.input().to_string(),
            };
            state.mark_dirty();

            let mut effects = Vec::with_capacity(2);
            if let Some(request_id) = superseded {
                effects.push(Effect::CancelRequest { request_id });
            }
            effects.push(send);
            effects
        }
        Msg::ResponseReceived { request_id, result } => {
            if state.panel_mut().resolve(request_id, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
