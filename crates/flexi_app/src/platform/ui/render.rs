use flexi_core::{AppViewModel, PanelDisplay, PanelView, NO_RESPONSE_YET};

/// Inputs longer than this are elided; base64 images run to megabytes.
const INPUT_PREVIEW_CHARS: usize = 120;

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    out.push_str("== FLEXICONNECT ==\n");
    let sidebar: Vec<String> = view
        .sidebar
        .iter()
        .map(|entry| {
            let marker = if entry.active { '*' } else { ' ' };
            format!("[{marker}] {}", entry.label)
        })
        .collect();
    out.push_str(&sidebar.join("   "));
    out.push('\n');

    render_panel(&mut out, &view.panel);
    out
}

fn render_panel(out: &mut String, panel: &PanelView) {
    out.push_str(&format!("\n-- {} --\n", panel.title));
    out.push_str(panel.description);
    out.push('\n');

    out.push_str(&format!("\n{}\n", panel.input_label));
    if panel.input.is_empty() {
        out.push_str(&format!("> ({})\n", panel.placeholder));
    } else {
        out.push_str(&format!("> {}\n", preview_input(&panel.input)));
    }

    if panel.submit_enabled {
        out.push_str(&format!("[{}]\n", panel.submit_label));
    } else {
        out.push_str(&format!("[{}] (busy)\n", panel.submit_label));
    }

    out.push_str("\nResponse:\n");
    match &panel.display {
        PanelDisplay::Placeholder => out.push_str(NO_RESPONSE_YET),
        PanelDisplay::Loading => out.push_str("Loading..."),
        PanelDisplay::Error(message) => out.push_str(&format!("Error: {message}")),
        PanelDisplay::Response(pretty) => out.push_str(pretty),
    }
    out.push('\n');
}

fn preview_input(input: &str) -> String {
    let total = input.chars().count();
    if total <= INPUT_PREVIEW_CHARS {
        return input.to_string();
    }
    let head: String = input.chars().take(INPUT_PREVIEW_CHARS).collect();
    format!("{head}... ({total} chars)")
}
