// ABOUTME: Test plan review step state
// ABOUTME: Scroll position, download/export pending flags, and the last outcome notice

use crossterm::event::{KeyCode, KeyEvent};
use seltest_client::TestPlan;
use std::path::PathBuf;

use crate::types::Action;
use crate::ui::review_lines;

const PAGE: u16 = 10;

/// Outcome of the last download or export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved(String),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct TestPlanReview {
    pub scroll: u16,
    pub downloading: bool,
    pub exporting: bool,
    pub notice: Option<Notice>,
}

impl TestPlanReview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.downloading || self.exporting
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        plan: &TestPlan,
        model_id: Option<&str>,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1, plan),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.scroll_down(PAGE, plan),
            KeyCode::Home => self.scroll = 0,
            KeyCode::Char('d') => return self.download(plan, model_id),
            KeyCode::Char('e') => return self.export(plan),
            _ => {}
        }
        None
    }

    /// Scrolling stops with the last plan line at the top of the pane.
    fn scroll_down(&mut self, by: u16, plan: &TestPlan) {
        let last = review_lines(plan).len().saturating_sub(1);
        let last = u16::try_from(last).unwrap_or(u16::MAX);
        self.scroll = self.scroll.saturating_add(by).min(last);
    }

    /// Posts every story in the plan; disabled while a download is pending.
    pub fn download(&mut self, plan: &TestPlan, model_id: Option<&str>) -> Option<Action> {
        if self.downloading {
            return None;
        }
        self.downloading = true;
        self.notice = None;
        Some(Action::DownloadScripts {
            stories: plan.stories(),
            model_id: model_id.map(str::to_string),
        })
    }

    pub fn export(&mut self, plan: &TestPlan) -> Option<Action> {
        if self.exporting {
            return None;
        }
        self.exporting = true;
        self.notice = None;
        Some(Action::ExportPlan(plan.clone()))
    }

    pub fn on_downloaded(&mut self, result: Result<PathBuf, String>) {
        self.downloading = false;
        self.notice = Some(match result {
            Ok(path) => Notice::Saved(format!("Scripts saved to {}", path.display())),
            Err(e) => Notice::Failed(format!("Download failed: {}", e)),
        });
    }

    pub fn on_exported(&mut self, result: Result<PathBuf, String>) {
        self.exporting = false;
        self.notice = Some(match result {
            Ok(path) => Notice::Saved(format!("Test plan exported to {}", path.display())),
            Err(e) => Notice::Failed(format!("Export failed: {}", e)),
        });
    }
}
