//! 列表 / 表格状态
//!
//! 不变量：`offset <= cursor < offset + visible_rows()`（列表非空时），
//! 且 `offset <= len - visible_rows()`，窗口不会滚出列表底部。

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 表头与分隔线占用的行数
pub const HEADER_LINES: u16 = 2;

#[derive(Debug)]
pub struct Table<T> {
    rows: Vec<T>,
    cursor: usize,
    offset: usize,
    height: u16,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            cursor: 0,
            offset: 0,
            height: HEADER_LINES + 1,
        }
    }
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换全部行；光标尽量保持原位置
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.clamp();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn selected(&self) -> Option<&T> {
        self.rows.get(self.cursor)
    }

    /// 整个控件的高度（含表头）
    pub fn set_height(&mut self, height: u16) {
        self.height = height;
        self.clamp();
    }

    pub fn visible_rows(&self) -> usize {
        usize::from(self.height.saturating_sub(HEADER_LINES).max(1))
    }

    /// 当前窗口内的行，附带其绝对下标
    pub fn visible(&self) -> impl Iterator<Item = (usize, &T)> {
        self.rows
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.visible_rows())
    }

    fn max_offset(&self) -> usize {
        self.rows.len().saturating_sub(self.visible_rows())
    }

    fn clamp(&mut self) {
        if self.rows.is_empty() {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        let visible = self.visible_rows();
        self.cursor = self.cursor.min(self.rows.len() - 1);
        if self.cursor < self.offset {
            self.offset = self.cursor;
        }
        if self.cursor >= self.offset + visible {
            self.offset = self.cursor + 1 - visible;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.clamp();
    }

    pub fn down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
        }
        self.clamp();
    }

    pub fn first(&mut self) {
        self.cursor = 0;
        self.offset = 0;
        self.clamp();
    }

    pub fn last(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
        self.clamp();
    }

    fn half_page(&self) -> usize {
        (self.visible_rows() / 2).max(1)
    }

    /// 光标与窗口一起上移半页，各自独立夹紧
    pub fn half_page_up(&mut self) {
        let step = self.half_page();
        self.cursor -= step.min(self.cursor);
        self.offset -= step.min(self.offset);
        self.clamp();
    }

    /// 光标与窗口一起下移半页，各自独立夹紧
    pub fn half_page_down(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let step = self.half_page();
        self.cursor += step.min(self.rows.len() - 1 - self.cursor);
        self.offset += step.min(self.max_offset().saturating_sub(self.offset));
        self.clamp();
    }

    /// 移动类按键；返回是否已处理
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') if !ctrl => self.up(),
            KeyCode::Down | KeyCode::Char('j') if !ctrl => self.down(),
            KeyCode::Char('u') if ctrl => self.half_page_up(),
            KeyCode::Char('d') if ctrl => self.half_page_down(),
            KeyCode::Home | KeyCode::Char('g') if !ctrl => self.first(),
            KeyCode::End | KeyCode::Char('G') if !ctrl => self.last(),
            _ => return false,
        }
        true
    }

    /// 滚轮
    pub fn scroll(&mut self, down: bool) {
        if down {
            self.down();
        } else {
            self.up();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table(rows: usize, visible: usize) -> Table<usize> {
        let mut t = Table::new();
        t.set_rows((0..rows).collect());
        t.set_height(u16::try_from(visible).unwrap() + HEADER_LINES);
        t
    }

    fn assert_window(t: &Table<usize>) {
        if t.is_empty() {
            assert_eq!((t.cursor(), t.offset()), (0, 0));
            return;
        }
        assert!(t.cursor() < t.len());
        assert!(t.offset() <= t.cursor());
        assert!(t.cursor() < t.offset() + t.visible_rows());
    }

    #[test]
    fn scrolls_with_cursor() {
        let mut t = table(10, 3);
        for _ in 0..5 {
            t.down();
        }
        assert_eq!((t.cursor(), t.offset()), (5, 3));
        t.last();
        assert_eq!((t.cursor(), t.offset()), (9, 7));
        t.down();
        assert_eq!(t.cursor(), 9);
        t.first();
        assert_eq!((t.cursor(), t.offset()), (0, 0));
    }

    #[test]
    fn shrinking_rows_clamps_cursor() {
        let mut t = table(10, 3);
        t.last();
        t.set_rows(vec![1, 2]);
        assert_eq!((t.cursor(), t.offset()), (1, 0));
        t.set_rows(Vec::new());
        assert_eq!(t.selected(), None);
    }

    #[test]
    fn half_page_clamps_at_edges() {
        let mut t = table(5, 4);
        t.half_page_up();
        assert_eq!((t.cursor(), t.offset()), (0, 0));
        t.half_page_down();
        t.half_page_down();
        t.half_page_down();
        assert_eq!((t.cursor(), t.offset()), (4, 1));
    }

    #[test]
    fn ctrl_keys_move_half_page() {
        let mut t = table(40, 10);
        assert!(t.handle_key(&KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)));
        assert_eq!(t.cursor(), 5);
        assert!(t.handle_key(&KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert_eq!(t.cursor(), 0);
        assert!(!t.handle_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
    }

    #[derive(Debug, Clone)]
    enum Move {
        Up,
        Down,
        HalfUp,
        HalfDown,
        Wheel(bool),
    }

    fn moves() -> impl Strategy<Value = Move> {
        prop_oneof![
            Just(Move::Up),
            Just(Move::Down),
            Just(Move::HalfUp),
            Just(Move::HalfDown),
            any::<bool>().prop_map(Move::Wheel),
        ]
    }

    proptest! {
        #[test]
        fn cursor_stays_visible(
            rows in 0usize..60,
            visible in 1usize..20,
            ops in prop::collection::vec(moves(), 0..80),
        ) {
            let mut t = table(rows, visible);
            for op in ops {
                match op {
                    Move::Up => t.up(),
                    Move::Down => t.down(),
                    Move::HalfUp => t.half_page_up(),
                    Move::HalfDown => t.half_page_down(),
                    Move::Wheel(down) => t.scroll(down),
                }
                assert_window(&t);
            }
        }

        #[test]
        fn half_page_up_then_down_restores(
            visible in 1usize..20,
            extra in 0usize..60,
            a in any::<usize>(),
            b in any::<usize>(),
        ) {
            let rows = visible + extra;
            let mut t = table(rows, visible);
            let step = (visible / 2).max(1);
            prop_assume!(rows > step);

            // 任意合法位置，且上方至少留有半页空间
            let cursor = step + a % (rows - step);
            let lo = step.max((cursor + 1).saturating_sub(visible));
            let hi = cursor.min(rows - visible);
            prop_assume!(lo <= hi);
            let offset = lo + b % (hi - lo + 1);
            t.cursor = cursor;
            t.offset = offset;
            assert_window(&t);

            t.half_page_up();
            assert_window(&t);
            t.half_page_down();
            prop_assert_eq!((t.cursor(), t.offset()), (cursor, offset));
        }
    }
}
