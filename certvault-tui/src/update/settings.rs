use crossterm::event::{KeyCode, KeyEvent};

use super::ViewController;
use crate::message::{Effect, JobResult};
use crate::model::state::SettingsState;
use crate::model::widgets::TextInput;

impl ViewController for SettingsState {
    fn init(&mut self) -> Effect {
        self.editing = None;
        self.error = None;
        Effect::None
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        let Some(input) = self.editing.as_mut() else {
            if matches!(key.code, KeyCode::Char('e') | KeyCode::Enter) {
                self.editing = Some(TextInput::with_value(self.server_url.clone()));
                self.error = None;
            }
            return Effect::None;
        };
        match key.code {
            KeyCode::Esc => {
                self.editing = None;
                self.error = None;
                Effect::None
            }
            KeyCode::Enter => {
                let url = input.value().trim().to_string();
                match validate_url(&url) {
                    Ok(()) => {
                        self.editing = None;
                        self.error = None;
                        Effect::ServerUrlChanged(url)
                    }
                    Err(message) => {
                        self.error = Some(message);
                        Effect::None
                    }
                }
            }
            _ => {
                input.handle_key(&key);
                Effect::None
            }
        }
    }

    fn handle_result(&mut self, _seq: u64, _result: JobResult) -> Effect {
        Effect::None
    }

    fn is_at_root(&self) -> bool {
        self.editing.is_none()
    }

    fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

fn validate_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("Server URL cannot be empty".to_string());
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err("Server URL must start with http:// or https://".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::update::tests::{ch, key};

    #[test]
    fn edit_and_save_url() {
        let mut state = SettingsState::new("http://a", PathBuf::from("/tmp/config.json"));
        state.handle_key(ch('e'));
        assert!(state.is_editing());
        for _ in 0.."http://a".len() {
            state.handle_key(key(KeyCode::Backspace));
        }
        for c in "https://vault".chars() {
            state.handle_key(ch(c));
        }
        let effect = state.handle_key(key(KeyCode::Enter));
        assert!(matches!(effect, Effect::ServerUrlChanged(ref url) if url == "https://vault"));
        assert!(state.is_at_root());
    }

    #[test]
    fn invalid_url_keeps_editor_open() {
        let mut state = SettingsState::new("http://a", PathBuf::from("/tmp/config.json"));
        state.handle_key(ch('e'));
        for _ in 0.."http://a".len() {
            state.handle_key(key(KeyCode::Backspace));
        }
        for c in "vault".chars() {
            state.handle_key(ch(c));
        }
        assert!(state.handle_key(key(KeyCode::Enter)).is_none());
        assert!(state.error.is_some());
        assert!(state.is_editing());

        state.handle_key(key(KeyCode::Esc));
        assert!(!state.is_editing());
    }
}
