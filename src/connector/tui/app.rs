use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::application::MISSING_KEY_MESSAGE;
use crate::domain::ViewState;

/// What the event loop should do after a key press.
pub enum Action {
    Submit(String),
    Quit,
}

/// Front-end state: the input buffer, the display state, and the two flags
/// that drive the entry control.
///
/// Holds no handle to the generator; the event loop owns the request and
/// feeds the outcome back through [`App::finish`]. While a request is in
/// flight every editing and submission key is ignored, which is the only
/// admission control the system has.
pub struct App {
    input: String,
    view: ViewState,
    configured: bool,
    loading: bool,
}

impl App {
    /// `configured` is the startup credential check. When false the session
    /// starts in the configuration-error state and the entry control never
    /// enables.
    pub fn new(configured: bool) -> Self {
        let view = if configured {
            ViewState::Idle
        } else {
            ViewState::error(MISSING_KEY_MESSAGE)
        };

        Self {
            input: String::new(),
            view,
            configured,
            loading: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// The entry control accepts input only when a credential is configured
    /// and no request is outstanding.
    pub fn entry_enabled(&self) -> bool {
        self.configured && !self.loading
    }

    /// Enter the Loading state: prior Result/Error is cleared and the entry
    /// control disables until [`App::finish`].
    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.view = ViewState::Loading;
    }

    /// Leave Loading with the submit outcome and re-enable the entry control.
    pub fn finish(&mut self, state: ViewState) {
        self.loading = false;
        self.view = state;
    }

    /// Route a key press. Quit keys always work; everything else requires
    /// the entry control to be enabled.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Action::Quit)
            }
            _ => {}
        }

        if !self.entry_enabled() {
            return None;
        }

        match key.code {
            KeyCode::Enter => Some(Action::Submit(self.input.clone())),
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::EMPTY_RESPONSE_MESSAGE;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_unconfigured_app_starts_disabled_with_error() {
        let app = App::new(false);

        assert!(!app.entry_enabled());
        assert_eq!(app.view().error_text(), Some(MISSING_KEY_MESSAGE));
    }

    #[test]
    fn test_unconfigured_app_ignores_typing_and_submit() {
        let mut app = App::new(false);

        type_str(&mut app, "dragon");
        assert_eq!(app.input(), "");
        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_typing_and_backspace_edit_the_input() {
        let mut app = App::new(true);

        type_str(&mut app, "cube");
        app.handle_key(key(KeyCode::Backspace));

        assert_eq!(app.input(), "cub");
    }

    #[test]
    fn test_enter_submits_current_input() {
        let mut app = App::new(true);
        type_str(&mut app, "glowing crystal dragon");

        match app.handle_key(key(KeyCode::Enter)) {
            Some(Action::Submit(query)) => assert_eq!(query, "glowing crystal dragon"),
            _ => panic!("Enter should submit"),
        }
    }

    #[test]
    fn test_entry_disabled_while_loading() {
        let mut app = App::new(true);
        type_str(&mut app, "cube");

        app.begin_loading();
        assert!(!app.entry_enabled());
        assert!(app.view().is_loading());

        // Editing and submitting are ignored until the request completes.
        type_str(&mut app, "xyz");
        assert_eq!(app.input(), "cube");
        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_finish_reenables_entry_and_replaces_loading() {
        let mut app = App::new(true);
        app.begin_loading();

        app.finish(ViewState::error(EMPTY_RESPONSE_MESSAGE));

        assert!(app.entry_enabled());
        assert!(!app.view().is_loading());
        assert_eq!(app.view().error_text(), Some(EMPTY_RESPONSE_MESSAGE));
    }

    #[test]
    fn test_finish_does_not_reenable_unconfigured_entry() {
        let mut app = App::new(false);
        app.finish(ViewState::error(MISSING_KEY_MESSAGE));

        assert!(!app.entry_enabled());
    }

    #[test]
    fn test_quit_keys_work_while_loading() {
        let mut app = App::new(true);
        app.begin_loading();

        assert!(matches!(
            app.handle_key(key(KeyCode::Esc)),
            Some(Action::Quit)
        ));
        assert!(matches!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        ));
    }
}
