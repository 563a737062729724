// ABOUTME: Test plan form rendering
// ABOUTME: Multi-line requirements box above the codebase path field

use crate::app::App;
use crate::steps::PlanField;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::app_context::render_field;
use super::{error_line, pending_line};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.plan_form;
    let chunks = Layout::vertical([
        Constraint::Min(4),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(area);

    render_field(
        f,
        chunks[0],
        PlanField::Requirements.label(),
        false,
        form.focus == PlanField::Requirements,
        &form.requirements,
    );
    render_field(
        f,
        chunks[1],
        PlanField::Codebase.label(),
        true,
        form.focus == PlanField::Codebase,
        &form.codebase,
    );

    let message = if form.loading {
        pending_line(app, "Generating test plan… this can take a few minutes")
    } else if let Some(err) = &form.error {
        error_line(err)
    } else {
        Line::from(Span::styled(
            "Ctrl+S generates the test plan.",
            Style::default().dim(),
        ))
    };
    f.render_widget(Paragraph::new(message), chunks[2]);
}
