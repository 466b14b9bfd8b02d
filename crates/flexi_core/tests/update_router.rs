use flexi_core::{update, AppState, Effect, Failure, Msg, Outcome, PanelDisplay, View};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn sidebar_marks_only_active_view() {
    let state = AppState::new();
    let (state, effects) = update(state, Msg::ViewSelected(View::ImageDetection));
    assert!(effects.is_empty());

    let sidebar = state.view().sidebar;
    let labels: Vec<_> = sidebar.iter().map(|entry| entry.label).collect();
    assert_eq!(
        labels,
        vec!["Spam API", "Toxicity API", "Image Detection API"]
    );
    let active: Vec<_> = sidebar
        .iter()
        .filter(|entry| entry.active)
        .map(|entry| entry.view)
        .collect();
    assert_eq!(active, vec![View::ImageDetection]);
}

#[test]
fn selecting_active_view_keeps_panel_state() {
    let (state, _) = update(AppState::new(), Msg::InputChanged("edited".to_string()));
    let (mut state, _) = update(state, Msg::Submitted);
    assert!(state.consume_dirty());

    let (mut next, effects) = update(state.clone(), Msg::ViewSelected(View::Spam));

    assert_eq!(next, state);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn switching_view_remounts_panel_with_defaults() {
    let (state, _) = update(AppState::new(), Msg::InputChanged("edited".to_string()));
    let (state, _) = update(state, Msg::Submitted);
    let (state, _) = update(
        state,
        Msg::ResponseReceived {
            request_id: 1,
            result: Ok(json!({"label": "ham"})),
        },
    );

    let (mut state, effects) = update(state, Msg::ViewSelected(View::Toxicity));

    assert!(effects.is_empty());
    assert_eq!(state.active_view(), View::Toxicity);
    assert_eq!(state.panel().outcome(), &Outcome::Idle);
    assert_eq!(state.view().panel.display, PanelDisplay::Placeholder);
    assert!(state.consume_dirty());

    let (state, _) = update(state, Msg::ViewSelected(View::Spam));
    assert_ne!(state.panel().input(), "edited");
}

#[test]
fn switching_view_while_pending_cancels_request() {
    let (state, _) = update(AppState::new(), Msg::Submitted);

    let (state, effects) = update(state, Msg::ViewSelected(View::ImageDetection));

    assert_eq!(effects, vec![Effect::CancelRequest { request_id: 1 }]);
    assert_eq!(state.active_view(), View::ImageDetection);
    assert_eq!(state.view().panel.display, PanelDisplay::Placeholder);
}

#[test]
fn stale_response_after_switch_is_ignored() {
    let (state, _) = update(AppState::new(), Msg::Submitted);
    let (mut state, _) = update(state, Msg::ViewSelected(View::Toxicity));
    assert!(state.consume_dirty());
    let before = state.clone();

    let (mut state, effects) = update(
        state,
        Msg::ResponseReceived {
            request_id: 1,
            result: Ok(json!({"label": "spam"})),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state, before);
    assert!(!state.consume_dirty());
}

#[test]
fn stale_response_does_not_leak_into_remounted_panel() {
    // Spam request 1 is pending when the user hops away and back.
    let (state, _) = update(AppState::new(), Msg::Submitted);
    let (state, _) = update(state, Msg::ViewSelected(View::Toxicity));
    let (state, _) = update(state, Msg::ViewSelected(View::Spam));
    let (state, _) = update(state, Msg::Submitted);
    assert_eq!(state.panel().outcome(), &Outcome::Loading { request_id: 2 });

    let (state, _) = update(
        state,
        Msg::ResponseReceived {
            request_id: 1,
            result: Err(Failure::Network),
        },
    );
    assert_eq!(state.view().panel.display, PanelDisplay::Loading);

    let (state, _) = update(
        state,
        Msg::ResponseReceived {
            request_id: 2,
            result: Ok(json!({"label": "ham"})),
        },
    );
    assert!(matches!(
        state.view().panel.display,
        PanelDisplay::Response(_)
    ));
}

#[test]
fn resubmitting_while_pending_supersedes_previous_request() {
    let (state, _) = update(AppState::new(), Msg::Submitted);

    let (state, effects) = update(state, Msg::Submitted);

    assert_eq!(
        effects,
        vec![
            Effect::CancelRequest { request_id: 1 },
            Effect::SendRequest {
                request_id: 2,
                view: View::Spam,
                input: flexi_core::DEFAULT_TEXT_INPUT.to_string(),
            },
        ]
    );

    let (state, _) = update(
        state,
        Msg::ResponseReceived {
            request_id: 1,
            result: Ok(json!({"late": true})),
        },
    );
    assert_eq!(state.view().panel.display, PanelDisplay::Loading);
}

#[test]
fn response_without_pending_request_is_ignored() {
    let state = AppState::new();

    let (state, effects) = update(
        state,
        Msg::ResponseReceived {
            request_id: 42,
            result: Ok(json!({})),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.panel().outcome(), &Outcome::Idle);
}
