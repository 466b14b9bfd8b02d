//! FlexiConnect core: pure panel state machine and view-model helpers.
mod effect;
mod msg;
mod panel;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use panel::{Failure, Outcome, PanelError, PanelState, View, DEFAULT_TEXT_INPUT};
pub use state::{AppState, RequestId};
pub use update::update;
pub use view_model::{AppViewModel, PanelDisplay, PanelView, SidebarEntry, NO_RESPONSE_YET};
