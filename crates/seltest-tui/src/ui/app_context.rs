// ABOUTME: App context form rendering
// ABOUTME: Four bordered text fields with the focused one highlighted

use crate::app::App;
use crate::steps::ContextField;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tui_textarea::TextArea;

use super::{error_line, pending_line};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.context_form;
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ])
    .split(area);

    for (i, field) in ContextField::ALL.into_iter().enumerate() {
        render_field(
            f,
            chunks[i],
            field.label(),
            field.required(),
            form.focus == field,
            form.field(field),
        );
    }

    let message = if form.submitting {
        pending_line(app, "Saving app context…")
    } else if let Some(err) = &form.error {
        error_line(err)
    } else {
        Line::from(Span::styled(
            "* required. Enter submits.",
            Style::default().dim(),
        ))
    };
    f.render_widget(Paragraph::new(message), chunks[4]);
}

pub(crate) fn render_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    required: bool,
    focused: bool,
    field: &TextArea<'static>,
) {
    let title = if required {
        format!(" {} * ", label)
    } else {
        format!(" {} ", label)
    };
    let border = if focused {
        Style::default().cyan()
    } else {
        Style::default().dark_gray()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.area() > 0 {
        f.render_widget(field, inner);
    }
}
