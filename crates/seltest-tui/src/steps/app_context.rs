// ABOUTME: App context form state
// ABOUTME: URL and pages are required; credentials optional; submit waits for the backend ack

use crossterm::event::{KeyCode, KeyEvent};
use seltest_client::AppContext;
use tui_textarea::TextArea;

use super::{field_value, show_cursor, single_line_input, single_line_paste, text_field};
use crate::types::Action;

const MASK: char = '\u{2022}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextField {
    Url,
    Pages,
    Username,
    Password,
}

impl ContextField {
    pub const ALL: [ContextField; 4] = [
        ContextField::Url,
        ContextField::Pages,
        ContextField::Username,
        ContextField::Password,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContextField::Url => "App URL",
            ContextField::Pages => "Pages (comma-separated)",
            ContextField::Username => "Username",
            ContextField::Password => "Password",
        }
    }

    pub fn required(&self) -> bool {
        matches!(self, ContextField::Url | ContextField::Pages)
    }

    fn index(&self) -> usize {
        match self {
            ContextField::Url => 0,
            ContextField::Pages => 1,
            ContextField::Username => 2,
            ContextField::Password => 3,
        }
    }

    fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub struct AppContextForm {
    fields: [TextArea<'static>; 4],
    pub focus: ContextField,
    pub submitting: bool,
    pub error: Option<String>,
}

impl AppContextForm {
    /// Fields are pre-filled from a previously submitted context.
    pub fn new(initial: Option<&AppContext>) -> Self {
        let ctx = initial.cloned().unwrap_or_default();
        let mut password = text_field(&ctx.password);
        password.set_mask_char(MASK);
        let mut form = Self {
            fields: [
                text_field(&ctx.url),
                text_field(&ctx.pages),
                text_field(&ctx.username),
                password,
            ],
            focus: ContextField::Url,
            submitting: false,
            error: None,
        };
        form.focus_on(ContextField::Url);
        form
    }

    pub fn focus_on(&mut self, field: ContextField) {
        self.focus = field;
        for f in ContextField::ALL {
            show_cursor(self.field_mut(f), f == field);
        }
    }

    pub fn field(&self, field: ContextField) -> &TextArea<'static> {
        &self.fields[field.index()]
    }

    fn field_mut(&mut self, field: ContextField) -> &mut TextArea<'static> {
        &mut self.fields[field.index()]
    }

    pub fn value(&self, field: ContextField) -> String {
        field_value(self.field(field))
    }

    /// Current input; required fields are trimmed.
    pub fn context(&self) -> AppContext {
        AppContext {
            url: self.value(ContextField::Url).trim().to_string(),
            pages: self.value(ContextField::Pages).trim().to_string(),
            username: self.value(ContextField::Username),
            password: self.value(ContextField::Password),
        }
    }

    /// First required field that is blank, if any
    pub fn missing_field(&self) -> Option<ContextField> {
        ContextField::ALL
            .into_iter()
            .filter(ContextField::required)
            .find(|f| self.value(*f).trim().is_empty())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.submitting {
            return None;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_on(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.focus_on(self.focus.previous()),
            KeyCode::Enter => return self.submit(),
            _ => {
                let focus = self.focus;
                single_line_input(self.field_mut(focus), key);
            }
        }
        None
    }

    pub fn handle_paste(&mut self, text: &str) {
        if !self.submitting {
            let focus = self.focus;
            single_line_paste(self.field_mut(focus), text);
        }
    }

    /// Blank required fields block the submit and take focus.
    pub fn submit(&mut self) -> Option<Action> {
        if let Some(field) = self.missing_field() {
            self.focus_on(field);
            self.error = Some(format!("{} is required.", field.label()));
            return None;
        }

        self.submitting = true;
        self.error = None;
        Some(Action::SubmitAppContext(self.context()))
    }

    /// Returns the acknowledged context on success.
    pub fn on_saved(&mut self, result: Result<AppContext, String>) -> Option<AppContext> {
        self.submitting = false;
        match result {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::tests::{key, type_str};

    fn filled(url: &str, pages: &str) -> AppContextForm {
        let mut form = AppContextForm::new(None);
        type_str(form.field_mut(ContextField::Url), url);
        type_str(form.field_mut(ContextField::Pages), pages);
        form
    }

    #[test]
    fn test_empty_url_does_not_proceed() {
        let mut form = filled("", "login");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), None);
        assert!(!form.submitting);
        assert_eq!(form.focus, ContextField::Url);
        assert_eq!(form.error.as_deref(), Some("App URL is required."));
    }

    #[test]
    fn test_empty_pages_does_not_proceed() {
        let mut form = filled("http://app.test", "   ");
        form.focus_on(ContextField::Password);
        assert_eq!(form.submit(), None);
        assert_eq!(form.focus, ContextField::Pages);
        assert_eq!(
            form.error.as_deref(),
            Some("Pages (comma-separated) is required.")
        );
    }

    #[test]
    fn test_valid_submit_without_credentials() {
        let mut form = filled(" http://app.test ", "login, dashboard");
        let action = form.handle_key(key(KeyCode::Enter));
        assert_eq!(
            action,
            Some(Action::SubmitAppContext(AppContext {
                url: "http://app.test".to_string(),
                pages: "login, dashboard".to_string(),
                username: String::new(),
                password: String::new(),
            }))
        );
        assert!(form.submitting);
        assert!(form.error.is_none());
    }

    #[test]
    fn test_tab_cycles_fields() {
        let mut form = AppContextForm::new(None);
        let mut seen = vec![form.focus];
        for _ in 0..4 {
            form.handle_key(key(KeyCode::Tab));
            seen.push(form.focus);
        }
        assert_eq!(
            seen,
            vec![
                ContextField::Url,
                ContextField::Pages,
                ContextField::Username,
                ContextField::Password,
                ContextField::Url,
            ]
        );
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus, ContextField::Password);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = AppContextForm::new(None);
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        for c in "alice".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(form.value(ContextField::Username), "alice");
        assert_eq!(form.value(ContextField::Url), "");
    }

    #[test]
    fn test_prefilled_from_previous_context() {
        let ctx = AppContext {
            url: "http://app.test".into(),
            pages: "home".into(),
            username: "bob".into(),
            password: "pw".into(),
        };
        let form = AppContextForm::new(Some(&ctx));
        assert_eq!(form.context(), ctx);
        assert_eq!(form.field(ContextField::Password).mask_char(), Some(MASK));
    }

    #[test]
    fn test_backend_rejection_stays_on_form() {
        let mut form = filled("http://app.test", "home");
        form.submit();
        let saved = form.on_saved(Err("Request failed with status 422: no detail".to_string()));
        assert!(saved.is_none());
        assert!(!form.submitting);
        assert!(form.error.is_some());
    }

    #[test]
    fn test_keys_ignored_while_submitting() {
        let mut form = filled("http://app.test", "home");
        form.submit();
        form.handle_key(key(KeyCode::Char('x')));
        form.handle_paste("pasted");
        assert_eq!(form.value(ContextField::Url), "http://app.test");
    }
}
