//! 确认对话框
//!
//! 对话框的结果是 `handle_key` 的返回值，调用方在同一次更新中读取，
//! 不存在"先关闭对话框、稍后再收到确认消息"的情况。

use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    yes_selected: bool,
}

impl ConfirmDialog {
    /// 默认选中"否"
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            yes_selected: false,
        }
    }

    pub fn yes_selected(&self) -> bool {
        self.yes_selected
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> DialogOutcome {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.yes_selected = true,
            KeyCode::Right | KeyCode::Char('l') => self.yes_selected = false,
            KeyCode::Tab | KeyCode::BackTab => self.yes_selected = !self.yes_selected,
            KeyCode::Char('y' | 'Y') => return DialogOutcome::Confirmed,
            KeyCode::Char('n' | 'N' | 'q') | KeyCode::Esc => return DialogOutcome::Cancelled,
            KeyCode::Enter => {
                return if self.yes_selected {
                    DialogOutcome::Confirmed
                } else {
                    DialogOutcome::Cancelled
                };
            }
            _ => {}
        }
        DialogOutcome::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_defaults_to_no() {
        let mut dialog = ConfirmDialog::new("Logout", "Are you sure?");
        assert_eq!(dialog.handle_key(&key(KeyCode::Enter)), DialogOutcome::Cancelled);
    }

    #[test]
    fn select_yes_then_enter() {
        let mut dialog = ConfirmDialog::new("Logout", "Are you sure?");
        assert_eq!(dialog.handle_key(&key(KeyCode::Left)), DialogOutcome::Pending);
        assert!(dialog.yes_selected());
        assert_eq!(dialog.handle_key(&key(KeyCode::Enter)), DialogOutcome::Confirmed);
    }

    #[test]
    fn shortcuts() {
        let mut dialog = ConfirmDialog::new("Delete", "Delete it?");
        assert_eq!(dialog.handle_key(&key(KeyCode::Char('y'))), DialogOutcome::Confirmed);
        assert_eq!(dialog.handle_key(&key(KeyCode::Esc)), DialogOutcome::Cancelled);
        dialog.handle_key(&key(KeyCode::Tab));
        assert!(dialog.yes_selected());
        dialog.handle_key(&key(KeyCode::Char('l')));
        assert!(!dialog.yes_selected());
    }
}
