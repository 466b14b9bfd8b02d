use crate::{Outcome, PanelState, View};

/// Placeholder shown before the first submission.
pub const NO_RESPONSE_YET: &str = "No response yet. Submit the form above to test the API.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub sidebar: Vec<SidebarEntry>,
    pub panel: PanelView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub view: View,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub view: View,
    pub title: &'static str,
    pub description: &'static str,
    pub input_label: &'static str,
    pub placeholder: &'static str,
    pub input: String,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub display: PanelDisplay,
}

/// What the response area shows. The four cases never overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelDisplay {
    Placeholder,
    Loading,
    Error(String),
    /// Response body pretty-printed with two-space indentation.
    Response(String),
}

struct PanelCopy {
    title: &'static str,
    description: &'static str,
    input_label: &'static str,
    placeholder: &'static str,
    submit_idle: &'static str,
    submit_busy: &'static str,
}

fn copy_for(view: View) -> PanelCopy {
    match view {
        View::Spam => PanelCopy {
            title: "Spam Prediction",
            description: "Welcome to the Spam Detection page. Please enter text to check if it's spam.",
            input_label: "Enter Text for Spam Detection:",
            placeholder: "Enter text to check for spam",
            submit_idle: "Check for Spam",
            submit_busy: "Checking...",
        },
        View::Toxicity => PanelCopy {
            title: "Toxicity API",
            description: "Pass in the parameter to detect if text is toxic or not",
            input_label: "API Body Input:",
            placeholder: "pay me or else i will file a lawsuit against you",
            submit_idle: "Send Request",
            submit_busy: "Sending...",
        },
        View::ImageDetection => PanelCopy {
            title: "Image Detection API",
            description: "Upload an image in base64 format to detect features using the API.",
            input_label: "Base64 Image Input:",
            placeholder: "Paste your base64 image data here",
            submit_idle: "Submit",
            submit_busy: "Submitting...",
        },
    }
}

impl AppViewModel {
    pub(crate) fn build(panel: &PanelState, dirty: bool) -> Self {
        let active = panel.view();
        let sidebar = View::ALL
            .iter()
            .map(|&view| SidebarEntry {
                view,
                label: view.sidebar_label(),
                active: view == active,
            })
            .collect();

        Self {
            sidebar,
            panel: PanelView::build(panel),
            dirty,
        }
    }
}

impl PanelView {
    fn build(panel: &PanelState) -> Self {
        let copy = copy_for(panel.view());
        let display = display_for(panel.outcome());
        let loading = display == PanelDisplay::Loading;

        Self {
            view: panel.view(),
            title: copy.title,
            description: copy.description,
            input_label: copy.input_label,
            placeholder: copy.placeholder,
            input: panel.input().to_string(),
            submit_label: if loading {
                copy.submit_busy
            } else {
                copy.submit_idle
            },
            submit_enabled: !loading,
            display,
        }
    }
}

fn display_for(outcome: &Outcome) -> PanelDisplay {
    match outcome {
        Outcome::Idle => PanelDisplay::Placeholder,
        Outcome::Loading { .. } => PanelDisplay::Loading,
        Outcome::Failed(error) => PanelDisplay::Error(error.message.clone()),
        Outcome::Succeeded(payload) => PanelDisplay::Response(pretty_json(payload)),
    }
}

fn pretty_json(payload: &serde_json::Value) -> String {
    // Serializing a `Value` cannot fail; fall back to the compact form anyway.
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}
