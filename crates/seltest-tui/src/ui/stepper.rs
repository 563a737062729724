// ABOUTME: Stepper bar rendering
// ABOUTME: Done, active, and upcoming steps in one line

use crate::types::Step;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// "Step 2 of 4 · Set App Context"
pub fn step_caption(step: Step) -> String {
    format!(
        "Step {} of {} · {}",
        step.index() + 1,
        Step::ALL.len(),
        step.label()
    )
}

pub fn render(f: &mut Frame, area: Rect, active: Step) {
    let mut spans: Vec<Span> = vec![];
    for (i, step) in Step::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ─ ", Style::default().dark_gray()));
        }
        let span = match step.index().cmp(&active.index()) {
            std::cmp::Ordering::Less => {
                Span::styled(format!("✓ {}", step.label()), Style::default().green())
            }
            std::cmp::Ordering::Equal => Span::styled(
                format!("● {}", step.label()),
                Style::default().cyan().bold(),
            ),
            std::cmp::Ordering::Greater => {
                Span::styled(format!("○ {}", step.label()), Style::default().dim())
            }
        };
        spans.push(span);
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
