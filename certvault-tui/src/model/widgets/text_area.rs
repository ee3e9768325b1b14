//! 多行文本输入（粘贴 PEM 用）

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone)]
pub struct TextArea {
    lines: Vec<String>,
    row: usize,
    /// 字符下标
    col: usize,
    offset: usize,
    height: u16,
}

impl Default for TextArea {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            offset: 0,
            height: 1,
        }
    }
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}

impl TextArea {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn set_text(&mut self, text: &str) {
        self.lines = text.lines().map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.row = self.lines.len() - 1;
        self.col = self.lines[self.row].chars().count();
        self.scroll_to_cursor();
    }

    pub fn clear(&mut self) {
        *self = Self {
            height: self.height,
            ..Self::default()
        };
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_height(&mut self, height: u16) {
        self.height = height.max(1);
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        let visible = usize::from(self.height);
        if self.row < self.offset {
            self.offset = self.row;
        } else if self.row >= self.offset + visible {
            self.offset = self.row + 1 - visible;
        }
    }

    fn line_len(&self) -> usize {
        self.lines[self.row].chars().count()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                let line = &mut self.lines[self.row];
                let at = byte_index(line, self.col);
                line.insert(at, c);
                self.col += 1;
            }
            KeyCode::Enter => {
                let line = &mut self.lines[self.row];
                let at = byte_index(line, self.col);
                let rest = line.split_off(at);
                self.row += 1;
                self.lines.insert(self.row, rest);
                self.col = 0;
            }
            KeyCode::Backspace => {
                if self.col > 0 {
                    self.col -= 1;
                    let line = &mut self.lines[self.row];
                    let at = byte_index(line, self.col);
                    line.remove(at);
                } else if self.row > 0 {
                    let line = self.lines.remove(self.row);
                    self.row -= 1;
                    self.col = self.line_len();
                    self.lines[self.row].push_str(&line);
                }
            }
            KeyCode::Left => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = self.line_len();
                }
            }
            KeyCode::Right => {
                if self.col < self.line_len() {
                    self.col += 1;
                } else if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
            }
            KeyCode::Up => {
                self.row = self.row.saturating_sub(1);
                self.col = self.col.min(self.line_len());
            }
            KeyCode::Down => {
                self.row = (self.row + 1).min(self.lines.len() - 1);
                self.col = self.col.min(self.line_len());
            }
            KeyCode::Home => self.col = 0,
            KeyCode::End => self.col = self.line_len(),
            _ => return false,
        }
        self.scroll_to_cursor();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_and_newlines() {
        let mut area = TextArea::default();
        for c in "ab".chars() {
            area.handle_key(&key(KeyCode::Char(c)));
        }
        area.handle_key(&key(KeyCode::Enter));
        area.handle_key(&key(KeyCode::Char('c')));
        assert_eq!(area.text(), "ab\nc");

        area.handle_key(&key(KeyCode::Home));
        area.handle_key(&key(KeyCode::Backspace));
        assert_eq!(area.text(), "abc");
        assert_eq!(area.cursor(), (0, 2));
    }

    #[test]
    fn set_text_moves_cursor_to_end() {
        let mut area = TextArea::default();
        area.set_height(2);
        area.set_text("-----BEGIN-----\nAAAA\n-----END-----\n");
        assert_eq!(area.lines().len(), 3);
        assert_eq!(area.cursor(), (2, 13));
        assert_eq!(area.offset(), 1);
        area.clear();
        assert!(area.is_blank());
    }
}
