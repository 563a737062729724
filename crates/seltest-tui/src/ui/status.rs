// ABOUTME: Bottom status bar rendering
// ABOUTME: Shows backend, chosen model, and the keybinds for the active step

use crate::app::App;
use crate::types::Step;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Keybinds for the active step
pub fn key_hints(app: &App) -> &'static str {
    match app.step {
        Step::SelectModel if app.selector.error.is_some() => "r: retry │ Ctrl+Q: quit",
        Step::SelectModel => "↑↓: move │ Space: choose │ Enter/n: next │ Ctrl+Q: quit",
        Step::AppContext => "Tab: next field │ Enter: submit │ Esc: back │ Ctrl+Q: quit",
        Step::TestPlan => "Tab: switch field │ Ctrl+S: generate │ Esc: back │ Ctrl+Q: quit",
        Step::Review => "↑↓: scroll │ d: download │ e: export │ b: back │ Ctrl+Q: quit",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = vec![Span::styled(
        format!(" {} ", app.api_url),
        Style::default().bold(),
    )];

    match &app.model {
        Some(model) => spans.push(Span::styled(
            format!("│ {} ", model),
            Style::default().green(),
        )),
        None => spans.push(Span::styled("│ No model ", Style::default().dim())),
    }

    if app.show_ctrl_c_hint() {
        spans.push(Span::styled(
            "│ Press Ctrl+C again to quit ",
            Style::default().yellow(),
        ));
    } else {
        spans.push(Span::styled(
            format!("│ {} ", key_hints(app)),
            Style::default().dim(),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).style(Style::default().on_dark_gray());
    f.render_widget(para, area);
}
