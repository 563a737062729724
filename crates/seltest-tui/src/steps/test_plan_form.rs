// ABOUTME: Test plan form state
// ABOUTME: Requirements text plus a codebase archive path; submit produces the generate action

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use seltest_client::TestPlan;
use std::path::PathBuf;
use tui_textarea::TextArea;

use super::{field_value, show_cursor, single_line_input, single_line_paste, text_field};
use crate::types::Action;

pub const MISSING_CODEBASE: &str = "Select a codebase archive (.zip) to upload.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanField {
    Requirements,
    Codebase,
}

impl PlanField {
    pub fn label(&self) -> &'static str {
        match self {
            PlanField::Requirements => "Requirements",
            PlanField::Codebase => "Codebase archive (.zip)",
        }
    }

    fn toggle(&self) -> Self {
        match self {
            PlanField::Requirements => PlanField::Codebase,
            PlanField::Codebase => PlanField::Requirements,
        }
    }
}

pub struct TestPlanForm {
    pub requirements: TextArea<'static>,
    pub codebase: TextArea<'static>,
    pub focus: PlanField,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for TestPlanForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPlanForm {
    pub fn new() -> Self {
        let mut form = Self {
            requirements: TextArea::default(),
            codebase: text_field(""),
            focus: PlanField::Requirements,
            loading: false,
            error: None,
        };
        form.focus_on(PlanField::Requirements);
        form
    }

    pub fn focus_on(&mut self, field: PlanField) {
        self.focus = field;
        show_cursor(&mut self.requirements, field == PlanField::Requirements);
        show_cursor(&mut self.codebase, field == PlanField::Codebase);
    }

    pub fn requirements_text(&self) -> String {
        field_value(&self.requirements)
    }

    pub fn codebase_path(&self) -> String {
        field_value(&self.codebase).trim().to_string()
    }

    pub fn handle_key(&mut self, key: KeyEvent, model_id: Option<&str>) -> Option<Action> {
        if self.loading {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => return self.submit(model_id),
            KeyCode::Tab | KeyCode::BackTab => self.focus_on(self.focus.toggle()),
            KeyCode::Enter if self.focus == PlanField::Codebase => return self.submit(model_id),
            _ => match self.focus {
                PlanField::Requirements => {
                    self.requirements.input(key);
                }
                PlanField::Codebase => single_line_input(&mut self.codebase, key),
            },
        }
        None
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.loading {
            return;
        }
        match self.focus {
            PlanField::Requirements => {
                self.requirements.insert_str(text);
            }
            PlanField::Codebase => single_line_paste(&mut self.codebase, text),
        }
    }

    /// Without a codebase path nothing is sent.
    pub fn submit(&mut self, model_id: Option<&str>) -> Option<Action> {
        let path = self.codebase_path();
        if path.is_empty() {
            self.focus_on(PlanField::Codebase);
            self.error = Some(MISSING_CODEBASE.to_string());
            return None;
        }

        self.loading = true;
        self.error = None;
        Some(Action::GenerateTestPlan {
            requirements: self.requirements_text(),
            codebase: PathBuf::from(path),
            model_id: model_id.map(str::to_string),
        })
    }

    /// Returns the plan on success; failures stay inline.
    pub fn on_generated(&mut self, result: Result<TestPlan, String>) -> Option<TestPlan> {
        self.loading = false;
        match result {
            Ok(plan) => Some(plan),
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}
