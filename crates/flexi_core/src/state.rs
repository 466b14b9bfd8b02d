use crate::view_model::AppViewModel;
use crate::{PanelState, View};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    panel: PanelState,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            panel: PanelState::default(),
            next_request_id: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> View {
        self.panel.view()
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(&self.panel, self.dirty)
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn panel_mut(&mut self) -> &mut PanelState {
        &mut self.panel
    }

    /// Unmounts the current panel and mounts a fresh one for `view`.
    /// Returns the request that was in flight on the old panel, if any.
    pub(crate) fn remount(&mut self, view: View) -> Option<RequestId> {
        let pending = self.panel.outcome().pending_request();
        self.panel = PanelState::mount(view);
        pending
    }

    pub(crate) fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
