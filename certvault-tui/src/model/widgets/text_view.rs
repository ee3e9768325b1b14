//! 只读的滚动文本（证书、私钥、分析报告）

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Default)]
pub struct TextView {
    lines: Vec<String>,
    offset: usize,
    height: u16,
}

impl TextView {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            offset: 0,
            height: 1,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[cfg(test)]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_height(&mut self, height: u16) {
        self.height = height.max(1);
        self.offset = self.offset.min(self.max_offset());
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(usize::from(self.height))
    }

    fn scroll_by(&mut self, delta: isize) {
        self.offset = self
            .offset
            .saturating_add_signed(delta)
            .min(self.max_offset());
    }

    pub fn scroll(&mut self, down: bool) {
        self.scroll_by(if down { 1 } else { -1 });
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let page = isize::try_from(self.height).unwrap_or(1).max(1);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') if !ctrl => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') if !ctrl => self.scroll_by(1),
            KeyCode::Char('u') if ctrl => self.scroll_by(-(page / 2).max(1)),
            KeyCode::Char('d') if ctrl => self.scroll_by((page / 2).max(1)),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::Home | KeyCode::Char('g') => self.offset = 0,
            KeyCode::End | KeyCode::Char('G') => self.offset = self.max_offset(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_is_bounded() {
        let mut view = TextView::new("a\nb\nc\nd\ne");
        view.set_height(2);
        view.handle_key(&KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        assert_eq!(view.offset(), 3);
        view.handle_key(&KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE));
        assert_eq!(view.offset(), 3);
        view.handle_key(&KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE));
        assert_eq!(view.offset(), 1);
        view.scroll(false);
        view.scroll(false);
        assert_eq!(view.offset(), 0);
    }
}
