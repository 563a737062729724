// ABOUTME: Model selector step state
// ABOUTME: Loads the model list on mount, tracks highlight vs. choice, confirms to the backend

use crossterm::event::{KeyCode, KeyEvent};
use seltest_client::ModelInfo;

use crate::types::Action;

pub struct ModelSelector {
    pub models: Vec<ModelInfo>,
    pub loading: bool,
    /// Model list failed to load
    pub error: Option<String>,
    /// Selection confirm in flight
    pub submitting: bool,
    /// Selection confirm failed
    pub submit_error: Option<String>,
    pub highlighted: usize,
    pub chosen: Option<String>,
}

impl ModelSelector {
    /// A freshly mounted selector is loading; `chosen` carries over a previous pick.
    pub fn new(chosen: Option<String>) -> Self {
        Self {
            models: vec![],
            loading: true,
            error: None,
            submitting: false,
            submit_error: None,
            highlighted: 0,
            chosen,
        }
    }

    pub fn on_models(&mut self, result: Result<Vec<ModelInfo>, String>) {
        self.loading = false;
        match result {
            Ok(models) => {
                self.error = None;
                self.models = models;
                // Drop a carried-over pick the backend no longer offers
                let chosen_idx = self
                    .chosen
                    .as_ref()
                    .and_then(|id| self.models.iter().position(|m| &m.id == id));
                if chosen_idx.is_none() {
                    self.chosen = None;
                }
                self.highlighted = chosen_idx.unwrap_or(0);
            }
            Err(e) => {
                self.error = Some(format!("Failed to load models: {}", e));
            }
        }
    }

    /// Returns the confirmed model id on success.
    pub fn on_selected(&mut self, result: Result<String, String>) -> Option<String> {
        self.submitting = false;
        match result {
            Ok(id) => Some(id),
            Err(e) => {
                self.submit_error = Some(e);
                None
            }
        }
    }

    pub fn option_count(&self) -> usize {
        self.models.len()
    }

    pub fn is_chosen(&self, idx: usize) -> bool {
        match (self.models.get(idx), &self.chosen) {
            (Some(model), Some(id)) => &model.id == id,
            _ => false,
        }
    }

    /// "Next" is enabled only once a model is chosen
    pub fn can_advance(&self) -> bool {
        self.chosen.is_some() && !self.loading && !self.submitting && self.error.is_none()
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.submitting
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.loading || self.submitting {
            return None;
        }

        if self.error.is_some() {
            if key.code == KeyCode::Char('r') {
                self.error = None;
                self.loading = true;
                return Some(Action::LoadModels);
            }
            return None;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.highlighted = self.highlighted.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.models.len().saturating_sub(1);
                self.highlighted = (self.highlighted + 1).min(max);
            }
            KeyCode::Char(' ') => self.choose_highlighted(),
            KeyCode::Enter => {
                if self.is_chosen(self.highlighted) {
                    return self.next();
                }
                self.choose_highlighted();
            }
            KeyCode::Char('n') => return self.next(),
            _ => {}
        }
        None
    }

    fn choose_highlighted(&mut self) {
        if let Some(model) = self.models.get(self.highlighted) {
            self.chosen = Some(model.id.clone());
            self.submit_error = None;
        }
    }

    fn next(&mut self) -> Option<Action> {
        if !self.can_advance() {
            return None;
        }
        let id = self.chosen.clone()?;
        self.submitting = true;
        self.submit_error = None;
        Some(Action::SelectModel(id))
    }
}
