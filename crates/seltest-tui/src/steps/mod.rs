// ABOUTME: Per-step form state for the wizard
// ABOUTME: Each step owns its inputs and pending flag; the shell owns what they produce

pub mod app_context;
pub mod model_selector;
pub mod review;
pub mod test_plan_form;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Modifier, Style};
use tui_textarea::{CursorMove, TextArea};

pub use app_context::{AppContextForm, ContextField};
pub use model_selector::ModelSelector;
pub use review::{Notice, TestPlanReview};
pub use test_plan_form::{PlanField, TestPlanForm};

/// A one-line text field pre-filled with `value`, cursor at the end.
pub(crate) fn text_field(value: &str) -> TextArea<'static> {
    let mut field = TextArea::new(vec![value.to_string()]);
    field.move_cursor(CursorMove::End);
    field
}

/// Only the focused field shows a cursor.
pub(crate) fn show_cursor(field: &mut TextArea<'static>, focused: bool) {
    let style = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    field.set_cursor_style(style);
}

/// Feed a key to a single-line field, swallowing anything that would add a line.
pub(crate) fn single_line_input(field: &mut TextArea<'static>, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => {}
        KeyCode::Char('m') | KeyCode::Char('j') if ctrl => {}
        _ => {
            field.input(key);
        }
    }
}

/// Insert pasted text into a single-line field, flattening newlines.
pub(crate) fn single_line_paste(field: &mut TextArea<'static>, text: &str) {
    let flat: String = text.lines().collect::<Vec<_>>().join(" ");
    field.insert_str(flat);
}

/// Field content as one string
pub(crate) fn field_value(field: &TextArea<'static>) -> String {
    field.lines().join("\n")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub(crate) fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub(crate) fn type_str(field: &mut TextArea<'static>, text: &str) {
        for c in text.chars() {
            single_line_input(field, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_text_field_prefill() {
        let field = text_field("http://app.test");
        assert_eq!(field_value(&field), "http://app.test");
        assert_eq!(field.cursor(), (0, 15));
    }

    #[test]
    fn test_single_line_ignores_enter() {
        let mut field = text_field("abc");
        single_line_input(&mut field, key(KeyCode::Enter));
        single_line_input(&mut field, ctrl('m'));
        assert_eq!(field.lines().len(), 1);
        single_line_input(&mut field, key(KeyCode::Char('d')));
        assert_eq!(field_value(&field), "abcd");
    }

    #[test]
    fn test_single_line_paste_flattens() {
        let mut field = text_field("");
        single_line_paste(&mut field, "login\ndashboard");
        assert_eq!(field_value(&field), "login dashboard");
    }
}
