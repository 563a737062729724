// ABOUTME: UI rendering module for the wizard
// ABOUTME: Title, stepper, active step body, and status bar

mod app_context;
mod model_selector;
mod review;
mod status;
mod stepper;
mod test_plan_form;

pub use review::review_lines;
pub use stepper::step_caption;

use crate::app::App;
use crate::types::Step;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub const TITLE: &str = "AI-Powered Selenium Test Generator";

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Length(1), // Stepper
        Constraint::Min(3),    // Step body
        Constraint::Length(1), // Status bar
    ])
    .split(f.area());

    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default().bold().cyan(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    stepper::render(f, chunks[1], app.step);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", step_caption(app.step)));
    let body = block.inner(chunks[2]);
    f.render_widget(block, chunks[2]);

    match app.step {
        Step::SelectModel => model_selector::render(f, body, app),
        Step::AppContext => app_context::render(f, body, app),
        Step::TestPlan => test_plan_form::render(f, body, app),
        Step::Review => review::render(f, body, app),
    }

    status::render(f, chunks[3], app);
}

/// One-line inline message: red for errors, throbber while pending
pub(crate) fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(message.to_string(), Style::default().red()))
}

pub(crate) fn pending_line(app: &App, message: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{} ", app.throbber_char()), Style::default().cyan()),
        Span::styled(message.to_string(), Style::default().dim()),
    ])
}
