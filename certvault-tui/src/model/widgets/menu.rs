use crossterm::event::{KeyCode, KeyEvent};

/// 竖排菜单
#[derive(Debug, Clone)]
pub struct Menu<T> {
    items: Vec<(T, String)>,
    selected: usize,
}

impl<T: Copy> Menu<T> {
    pub fn new<S: Into<String>>(items: impl IntoIterator<Item = (T, S)>) -> Self {
        Self {
            items: items.into_iter().map(|(v, l)| (v, l.into())).collect(),
            selected: 0,
        }
    }

    pub fn items(&self) -> &[(T, String)] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> Option<T> {
        self.items.get(self.selected).map(|(v, _)| *v)
    }

    /// 移动一项；到两端后不再移动
    pub fn scroll(&mut self, down: bool) {
        if !down {
            self.selected = self.selected.saturating_sub(1);
        } else if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    /// 移动或确认；enter 返回选中项
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<T> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll(false),
            KeyCode::Down | KeyCode::Char('j') => self.scroll(true),
            KeyCode::Enter => return self.current(),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn enter_returns_selection() {
        let mut menu = Menu::new([(1, "one"), (2, "two")]);
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        menu.handle_key(&down);
        menu.handle_key(&down);
        assert_eq!(menu.selected(), 1);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(menu.handle_key(&enter), Some(2));
    }
}
