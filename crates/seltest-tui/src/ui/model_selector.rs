// ABOUTME: Model selector rendering
// ABOUTME: One option line per model, with chosen marker and highlight

use crate::app::App;
use crate::steps::ModelSelector;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::{error_line, pending_line};

/// One line per model
pub fn option_lines(selector: &ModelSelector) -> Vec<Line<'static>> {
    selector
        .models
        .iter()
        .enumerate()
        .map(|(i, model)| {
            let marker = if selector.is_chosen(i) { "(•)" } else { "( )" };
            let style = if i == selector.highlighted {
                Style::default().reversed()
            } else if selector.is_chosen(i) {
                Style::default().green()
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!(" {} {} ({}) ", marker, model.name, model.id),
                style,
            ))
        })
        .collect()
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let selector = &app.selector;
    let header = Line::from("Choose the AI model used for generation:");

    let mut notice: Vec<Line> = vec![];
    if selector.loading {
        notice.push(pending_line(app, "Loading models…"));
    } else if let Some(err) = &selector.error {
        notice.push(error_line(err));
        notice.push(Line::from(Span::styled(
            "Press r to retry.",
            Style::default().dim(),
        )));
    } else if selector.models.is_empty() {
        notice.push(Line::from(Span::styled(
            "The backend offers no models.",
            Style::default().yellow(),
        )));
    }

    if !notice.is_empty() {
        let mut lines = vec![header, Line::from("")];
        lines.extend(notice);
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(2), // Header
        Constraint::Min(1),    // Options
        Constraint::Length(3), // Next + status
    ])
    .split(area);

    f.render_widget(Paragraph::new(header), chunks[0]);

    // Stateful render keeps the highlighted option in view
    let items: Vec<ListItem> = option_lines(selector).into_iter().map(ListItem::new).collect();
    let mut state = ListState::default().with_selected(Some(selector.highlighted));
    f.render_stateful_widget(List::new(items), chunks[1], &mut state);

    let next_style = if selector.can_advance() {
        Style::default().cyan().bold()
    } else {
        Style::default().dark_gray()
    };
    let mut footer = vec![Line::from(""), Line::from(Span::styled("[ Next ]", next_style))];
    if selector.submitting {
        footer.push(pending_line(app, "Selecting model…"));
    } else if let Some(err) = &selector.submit_error {
        footer.push(error_line(err));
    }
    f.render_widget(Paragraph::new(footer), chunks[2]);
}
