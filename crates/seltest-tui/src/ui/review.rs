// ABOUTME: Test plan review rendering
// ABOUTME: Scrollable epic/story tree with download and export feedback

use crate::app::App;
use crate::steps::Notice;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use seltest_client::TestPlan;

use super::pending_line;

pub const EPIC_PREFIX: &str = "Epic: ";
pub const STORY_PREFIX: &str = "  ▸ ";

/// The plan as display lines: one header line per epic and per story.
pub fn review_lines(plan: &TestPlan) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{} epics · {} stories",
            plan.epic_count(),
            plan.story_count()
        ),
        Style::default().dim(),
    ))];
    if let Some(meta) = &plan.metadata {
        lines.push(Line::from(Span::styled(
            format!("Version {} · updated {}", meta.version, meta.last_updated),
            Style::default().dim(),
        )));
    }
    lines.push(Line::from(""));

    for epic in &plan.backlog {
        lines.push(Line::from(Span::styled(
            format!("{}{}", EPIC_PREFIX, epic.epic),
            Style::default().bold().magenta(),
        )));
        if !epic.description.is_empty() {
            lines.push(Line::from(epic.description.clone()));
        }

        for story in &epic.stories {
            lines.push(Line::from(Span::styled(
                format!("{}{}", STORY_PREFIX, story.title),
                Style::default().bold(),
            )));
            if !story.description.is_empty() {
                lines.push(Line::from(format!("    {}", story.description)));
            }
            lines.push(Line::from(Span::styled(
                format!("    Page: {} | URL: {}", story.page, story.url),
                Style::default().dim(),
            )));
            for criterion in &story.acceptance_criteria {
                lines.push(Line::from(format!("      • {}", criterion)));
            }
        }
        lines.push(Line::from(""));
    }
    lines
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

    let lines = app.test_plan.as_ref().map(review_lines).unwrap_or_default();
    let tree = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.review.scroll, 0));
    f.render_widget(tree, chunks[0]);

    let review = &app.review;
    let footer = if review.downloading {
        pending_line(app, "Generating scripts… this can take a few minutes")
    } else if review.exporting {
        pending_line(app, "Exporting test plan…")
    } else {
        match &review.notice {
            Some(Notice::Saved(msg)) => Line::from(Span::styled(msg.clone(), Style::default().green())),
            Some(Notice::Failed(msg)) => Line::from(Span::styled(msg.clone(), Style::default().red())),
            None => Line::from(Span::styled(
                "d downloads scripts for every story.",
                Style::default().dim(),
            )),
        }
    };
    f.render_widget(Paragraph::new(footer), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::review::tests::plan;

    fn texts(plan: &TestPlan) -> Vec<String> {
        review_lines(plan)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_epic_and_story_blocks() {
        for (epics, stories) in [(0, 0), (1, 3), (3, 2)] {
            let plan = plan(epics, stories);
            let lines = texts(&plan);
            let epic_blocks = lines.iter().filter(|l| l.starts_with(EPIC_PREFIX)).count();
            let story_blocks = lines.iter().filter(|l| l.starts_with(STORY_PREFIX)).count();
            assert_eq!(epic_blocks, epics);
            assert_eq!(story_blocks, epics * stories);
        }
    }

    #[test]
    fn test_story_details() {
        let mut plan = plan(1, 1);
        let story = &mut plan.backlog[0].stories[0];
        story.page = "login".to_string();
        story.url = "http://app.test/login".to_string();
        story.acceptance_criteria = vec!["Dashboard is shown".to_string()];

        let lines = texts(&plan);
        assert!(lines.contains(&"    Page: login | URL: http://app.test/login".to_string()));
        assert!(lines.contains(&"      • Dashboard is shown".to_string()));
    }

    #[test]
    fn test_summary_line() {
        let lines = texts(&plan(2, 3));
        insta::assert_snapshot!(lines[0], @"2 epics · 6 stories");
    }
}
