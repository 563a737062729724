// ABOUTME: Wizard shell state and event handling
// ABOUTME: Owns the active step and what each step produced; mutations happen in handle_* methods

use crate::steps::{AppContextForm, ModelSelector, TestPlanForm, TestPlanReview};
use crate::types::{Action, Response, Step};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use seltest_client::{AppContext, TestPlan};
use std::time::{Duration, Instant};

const THROBBER: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];

/// Central wizard state
pub struct App {
    pub step: Step,

    // Produced by completed steps
    pub model: Option<String>,
    pub app_context: Option<AppContext>,
    pub test_plan: Option<TestPlan>,

    // Per-step forms
    pub selector: ModelSelector,
    pub context_form: AppContextForm,
    pub plan_form: TestPlanForm,
    pub review: TestPlanReview,

    /// Backend URL for display in the status bar
    pub api_url: String,

    // Quit handling
    pub last_ctrl_c: Option<Instant>,

    // Throbber animation frame
    pub throbber_frame: usize,
}

impl App {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            step: Step::SelectModel,
            model: None,
            app_context: None,
            test_plan: None,
            selector: ModelSelector::new(None),
            context_form: AppContextForm::new(None),
            plan_form: TestPlanForm::new(),
            review: TestPlanReview::new(),
            api_url: api_url.into(),
            last_ctrl_c: None,
            throbber_frame: 0,
        }
    }

    /// The model list fetch that the first step issues on mount.
    pub fn start(&mut self) -> Option<Action> {
        self.enter(Step::SelectModel)
    }

    /// Mount `step`, re-opening its form from shell state.
    fn enter(&mut self, step: Step) -> Option<Action> {
        tracing::debug!(step = step.label(), "Entering step");
        self.step = step;
        match step {
            Step::SelectModel => {
                self.selector = ModelSelector::new(self.model.clone());
                Some(Action::LoadModels)
            }
            Step::AppContext => {
                self.context_form = AppContextForm::new(self.app_context.as_ref());
                None
            }
            Step::TestPlan => {
                self.plan_form.error = None;
                None
            }
            Step::Review => {
                self.review = TestPlanReview::new();
                None
            }
        }
    }

    fn advance(&mut self) -> Option<Action> {
        self.step.next().and_then(|step| self.enter(step))
    }

    fn back(&mut self) -> Option<Action> {
        if self.is_busy() {
            return None;
        }
        self.step.previous().and_then(|step| self.enter(step))
    }

    /// Whether the active step has a request in flight
    pub fn is_busy(&self) -> bool {
        match self.step {
            Step::SelectModel => self.selector.is_busy(),
            Step::AppContext => self.context_form.submitting,
            Step::TestPlan => self.plan_form.loading,
            Step::Review => self.review.is_busy(),
        }
    }

    /// Advance throbber animation
    pub fn tick(&mut self) {
        self.throbber_frame = (self.throbber_frame + 1) % THROBBER.len();
    }

    pub fn throbber_char(&self) -> char {
        THROBBER[self.throbber_frame]
    }

    /// Check if Ctrl+C hint should be shown
    pub fn show_ctrl_c_hint(&self) -> bool {
        self.last_ctrl_c
            .map(|t| t.elapsed() < Duration::from_millis(500))
            .unwrap_or(false)
    }

    /// Handle a key event, returning an action if needed
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Global keys
        match key.code {
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Action::Quit);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.show_ctrl_c_hint() {
                    return Some(Action::Quit);
                }
                self.last_ctrl_c = Some(Instant::now());
                return None;
            }
            KeyCode::Esc => return self.back(),
            _ => {}
        }

        match self.step {
            Step::SelectModel => self.selector.handle_key(key),
            Step::AppContext => self.context_form.handle_key(key),
            Step::TestPlan => self.plan_form.handle_key(key, self.model.as_deref()),
            Step::Review => self.handle_review_key(key),
        }
    }

    fn handle_review_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Char('b') {
            return self.back();
        }
        let plan = self.test_plan.as_ref()?;
        self.review.handle_key(key, plan, self.model.as_deref())
    }

    pub fn handle_paste(&mut self, text: &str) {
        match self.step {
            Step::AppContext => self.context_form.handle_paste(text),
            Step::TestPlan => self.plan_form.handle_paste(text),
            Step::SelectModel | Step::Review => {}
        }
    }

    /// Apply a finished request. Results for a step that is no longer
    /// waiting on them are dropped.
    pub fn handle_response(&mut self, response: Response) -> Option<Action> {
        match response {
            Response::ModelsLoaded(result) => {
                if self.step == Step::SelectModel && self.selector.loading {
                    self.selector.on_models(result);
                } else {
                    tracing::debug!("Dropping stale model list");
                }
            }
            Response::ModelSelected(result) => {
                if self.step == Step::SelectModel && self.selector.submitting {
                    if let Some(id) = self.selector.on_selected(result) {
                        self.model = Some(id);
                        return self.advance();
                    }
                }
            }
            Response::AppContextSaved(result) => {
                if self.step == Step::AppContext && self.context_form.submitting {
                    if let Some(ctx) = self.context_form.on_saved(result) {
                        self.app_context = Some(ctx);
                        return self.advance();
                    }
                }
            }
            Response::TestPlanGenerated(result) => {
                if self.step == Step::TestPlan && self.plan_form.loading {
                    if let Some(plan) = self.plan_form.on_generated(result) {
                        self.test_plan = Some(plan);
                        return self.advance();
                    }
                }
            }
            Response::ScriptsDownloaded(result) => {
                if self.step == Step::Review && self.review.downloading {
                    self.review.on_downloaded(result);
                }
            }
            Response::PlanExported(result) => {
                if self.step == Step::Review && self.review.exporting {
                    self.review.on_exported(result);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::model_selector::tests::models;
    use crate::steps::review::tests::plan;
    use crate::steps::tests::{ctrl, key};
    use std::path::PathBuf;

    fn context() -> AppContext {
        AppContext {
            url: "http://app.test".to_string(),
            pages: "login, dashboard".to_string(),
            username: "alice".to_string(),
            password: "pw".to_string(),
        }
    }

    /// Drive the shell through the first three steps.
    fn at_review() -> App {
        let mut app = App::new("http://localhost:8000");
        app.start();
        app.handle_response(Response::ModelsLoaded(Ok(models(2))));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            app.handle_key(key(KeyCode::Enter)),
            Some(Action::SelectModel("model-0".to_string()))
        );
        app.handle_response(Response::ModelSelected(Ok("model-0".to_string())));
        assert_eq!(app.step, Step::AppContext);

        app.context_form = AppContextForm::new(Some(&context()));
        assert!(matches!(
            app.handle_key(key(KeyCode::Enter)),
            Some(Action::SubmitAppContext(_))
        ));
        app.handle_response(Response::AppContextSaved(Ok(context())));
        assert_eq!(app.step, Step::TestPlan);

        app.plan_form.codebase.insert_str("app.zip");
        assert!(matches!(
            app.handle_key(ctrl('s')),
            Some(Action::GenerateTestPlan { .. })
        ));
        app.handle_response(Response::TestPlanGenerated(Ok(plan(2, 3))));
        assert_eq!(app.step, Step::Review);
        app
    }

    #[test]
    fn test_start_loads_models() {
        let mut app = App::new("http://localhost:8000");
        assert_eq!(app.start(), Some(Action::LoadModels));
        assert!(app.selector.loading);
    }

    #[test]
    fn test_full_walkthrough() {
        let app = at_review();
        assert_eq!(app.model.as_deref(), Some("model-0"));
        assert_eq!(app.app_context, Some(context()));
        assert_eq!(app.test_plan.as_ref().map(TestPlan::story_count), Some(6));
    }

    #[test]
    fn test_back_from_review_keeps_state() {
        let mut app = at_review();
        assert_eq!(app.handle_key(key(KeyCode::Char('b'))), None);
        assert_eq!(app.step, Step::TestPlan);
        assert_eq!(app.model.as_deref(), Some("model-0"));
        assert_eq!(app.app_context, Some(context()));
        assert_eq!(app.plan_form.codebase_path(), "app.zip");
    }

    #[test]
    fn test_esc_back_to_context_prefills_form() {
        let mut app = at_review();
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.step, Step::AppContext);
        assert_eq!(app.context_form.context(), context());
    }

    #[test]
    fn test_back_to_model_step_reloads_and_preselects() {
        let mut app = at_review();
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Some(Action::LoadModels));
        assert_eq!(app.step, Step::SelectModel);
        app.handle_response(Response::ModelsLoaded(Ok(models(2))));
        assert!(app.selector.is_chosen(0));
        assert!(app.selector.can_advance());
    }

    #[test]
    fn test_first_step_has_no_back() {
        let mut app = App::new("http://localhost:8000");
        app.start();
        app.handle_response(Response::ModelsLoaded(Ok(models(1))));
        assert_eq!(app.handle_key(key(KeyCode::Esc)), None);
        assert_eq!(app.step, Step::SelectModel);
    }

    #[test]
    fn test_back_blocked_while_busy() {
        let mut app = at_review();
        app.handle_key(key(KeyCode::Char('d')));
        assert!(app.is_busy());
        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.step, Step::Review);
    }

    #[test]
    fn test_model_select_failure_stays() {
        let mut app = App::new("http://localhost:8000");
        app.start();
        app.handle_response(Response::ModelsLoaded(Ok(models(1))));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        app.handle_response(Response::ModelSelected(Err("nope".to_string())));
        assert_eq!(app.step, Step::SelectModel);
        assert!(app.model.is_none());
    }

    #[test]
    fn test_stale_response_dropped() {
        let mut app = at_review();
        app.handle_response(Response::TestPlanGenerated(Ok(plan(1, 1))));
        assert_eq!(app.test_plan.as_ref().map(TestPlan::epic_count), Some(2));
        app.handle_response(Response::ScriptsDownloaded(Ok(PathBuf::from("x.zip"))));
        assert!(app.review.notice.is_none());
    }

    #[test]
    fn test_download_uses_chosen_model() {
        let mut app = at_review();
        match app.handle_key(key(KeyCode::Char('d'))) {
            Some(Action::DownloadScripts { stories, model_id }) => {
                assert_eq!(stories.len(), 6);
                assert_eq!(model_id.as_deref(), Some("model-0"));
            }
            other => panic!("expected download action, got {:?}", other),
        }
    }

    #[test]
    fn test_paste_routes_to_active_form() {
        let mut app = at_review();
        app.handle_key(key(KeyCode::Esc));
        app.plan_form.focus_on(crate::steps::PlanField::Requirements);
        app.handle_paste("Checkout flow");
        assert_eq!(app.plan_form.requirements_text(), "Checkout flow");
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = App::new("http://localhost:8000");
        assert_eq!(app.handle_key(ctrl('q')), Some(Action::Quit));
    }

    #[test]
    fn test_double_ctrl_c_quits() {
        let mut app = App::new("http://localhost:8000");
        assert_eq!(app.handle_key(ctrl('c')), None);
        assert!(app.show_ctrl_c_hint());
        assert_eq!(app.handle_key(ctrl('c')), Some(Action::Quit));
    }

    #[test]
    fn test_throbber_cycles() {
        let mut app = App::new("http://localhost:8000");
        let first = app.throbber_char();
        for _ in 0..8 {
            app.tick();
        }
        assert_eq!(app.throbber_char(), first);
    }
}
