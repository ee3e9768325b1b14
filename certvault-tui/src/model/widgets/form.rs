//! 多字段表单
//!
//! 每个字段按自己的类型处理按键：
//!     - Text / Password：按键写入文本缓冲；↑/↓ 切换字段；
//!     - Selector：←/→/↑/↓ 轮换选项（可选的 selector 在末尾经过"无"）；
//!     - Toggle：空格与方向键切换；
//!     - Path：tab 补全路径，↑/↓ 切换字段。
//!
//! tab / enter 在所有字段上都前进焦点（Path 字段的 tab 除外），
//! 最后一个字段上 enter 或任意位置 ctrl+s 提交。

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::path_input::PathInput;
use super::text_input::TextInput;

/// 固定选项集合
#[derive(Debug, Clone, Default)]
pub struct Selector {
    options: Vec<String>,
    selected: Option<usize>,
    optional: bool,
}

impl Selector {
    /// 必选，初始选中第一个
    pub fn new<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let selected = (!options.is_empty()).then_some(0);
        Self {
            options,
            selected,
            optional: false,
        }
    }

    /// 可选，初始为"无"
    pub fn optional<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        Self {
            selected: None,
            optional: true,
            ..Self::new(options)
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.selected
    }

    pub fn value(&self) -> Option<&str> {
        self.selected.map(|i| self.options[i].as_str())
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = match index {
            Some(i) if i < self.options.len() => Some(i),
            _ if self.optional || self.options.is_empty() => None,
            _ => Some(0),
        };
    }

    pub fn set_options<S: Into<String>>(&mut self, options: impl IntoIterator<Item = S>) {
        self.options = options.into_iter().map(Into::into).collect();
        self.select(self.selected);
    }

    pub fn next(&mut self) {
        let len = self.options.len();
        if len == 0 {
            return;
        }
        self.selected = match self.selected {
            None => Some(0),
            Some(i) if i + 1 < len => Some(i + 1),
            Some(_) if self.optional => None,
            Some(_) => Some(0),
        };
    }

    pub fn prev(&mut self) {
        let len = self.options.len();
        if len == 0 {
            return;
        }
        self.selected = match self.selected {
            None => Some(len - 1),
            Some(0) if self.optional => None,
            Some(0) => Some(len - 1),
            Some(i) => Some(i - 1),
        };
    }
}

#[derive(Debug, Clone)]
pub enum FieldKind {
    Text(TextInput),
    Password(TextInput),
    Selector(Selector),
    Toggle(bool),
    Path(PathInput),
}

#[derive(Debug, Clone)]
pub struct Field {
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// 可选值为空时显示的提示
    pub placeholder: String,
}

impl Field {
    fn new(label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            label: label.into(),
            kind,
            required: false,
            placeholder: String::new(),
        }
    }

    pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, FieldKind::Text(TextInput::with_value(value)))
    }

    pub fn password(label: impl Into<String>) -> Self {
        Self::new(label, FieldKind::Password(TextInput::masked()))
    }

    pub fn selector(label: impl Into<String>, selector: Selector) -> Self {
        Self::new(label, FieldKind::Selector(selector))
    }

    pub fn toggle(label: impl Into<String>, on: bool) -> Self {
        Self::new(label, FieldKind::Toggle(on))
    }

    pub fn path(label: impl Into<String>) -> Self {
        Self::new(label, FieldKind::Path(PathInput::new()))
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// 文本值；selector 为选中项，toggle 为 Yes/No
    pub fn value(&self) -> String {
        match &self.kind {
            FieldKind::Text(input) | FieldKind::Password(input) => input.value().to_string(),
            FieldKind::Selector(selector) => selector.value().unwrap_or_default().to_string(),
            FieldKind::Toggle(on) => (if *on { "Yes" } else { "No" }).to_string(),
            FieldKind::Path(input) => input.value().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.kind {
            FieldKind::Selector(selector) => selector.index().is_none(),
            FieldKind::Toggle(_) => false,
            _ => self.value().trim().is_empty(),
        }
    }

    /// 该字段自己的按键处理；返回是否已处理
    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match &mut self.kind {
            FieldKind::Text(input) | FieldKind::Password(input) => {
                !matches!(key.code, KeyCode::Up | KeyCode::Down) && input.handle_key(key)
            }
            FieldKind::Path(input) => {
                !matches!(key.code, KeyCode::Up | KeyCode::Down) && input.handle_key(key)
            }
            FieldKind::Selector(selector) => match key.code {
                KeyCode::Right | KeyCode::Down | KeyCode::Char('l' | 'j' | ' ') => {
                    selector.next();
                    true
                }
                KeyCode::Left | KeyCode::Up | KeyCode::Char('h' | 'k') => {
                    selector.prev();
                    true
                }
                _ => false,
            },
            FieldKind::Toggle(on) => match key.code {
                KeyCode::Char(' ' | 'h' | 'l' | 'j' | 'k')
                | KeyCode::Left
                | KeyCode::Right
                | KeyCode::Up
                | KeyCode::Down => {
                    *on = !*on;
                    true
                }
                KeyCode::Char('y') => {
                    *on = true;
                    true
                }
                KeyCode::Char('n') => {
                    *on = false;
                    true
                }
                _ => false,
            },
        }
    }
}

/// 表单按键处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Consumed,
    Submit,
    /// 表单不关心的按键（esc 等），交给所属视图
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: Vec<Field>,
    focused: usize,
    offset: usize,
    height: u16,
}

impl Form {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            focused: 0,
            offset: 0,
            height: 1,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut Field> {
        self.fields.get_mut(index)
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn set_height(&mut self, height: u16) {
        self.height = height.max(1);
        self.scroll_to_focus();
    }

    /// 字段文本值（越界为空）
    pub fn value(&self, index: usize) -> String {
        self.field(index).map(Field::value).unwrap_or_default()
    }

    /// 去掉首尾空白的文本值
    pub fn trimmed(&self, index: usize) -> String {
        self.value(index).trim().to_string()
    }

    pub fn selector(&self, index: usize) -> Option<&Selector> {
        match self.field(index).map(|f| &f.kind) {
            Some(FieldKind::Selector(selector)) => Some(selector),
            _ => None,
        }
    }

    pub fn selector_mut(&mut self, index: usize) -> Option<&mut Selector> {
        match self.field_mut(index).map(|f| &mut f.kind) {
            Some(FieldKind::Selector(selector)) => Some(selector),
            _ => None,
        }
    }

    pub fn flag(&self, index: usize) -> bool {
        matches!(
            self.field(index).map(|f| &f.kind),
            Some(FieldKind::Toggle(true))
        )
    }

    #[cfg(test)]
    pub fn set_text(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.field_mut(index) {
            match &mut field.kind {
                FieldKind::Text(input) | FieldKind::Password(input) => input.set(value),
                FieldKind::Path(input) => *input = PathInput::with_value(value),
                FieldKind::Selector(_) | FieldKind::Toggle(_) => {}
            }
        }
    }

    /// 第一个为空的必填字段
    pub fn missing_required(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.required && f.is_empty())
            .map(|f| f.label.as_str())
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
            self.scroll_to_focus();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
            self.scroll_to_focus();
        }
    }

    fn scroll_to_focus(&mut self) {
        let visible = usize::from(self.height);
        if self.focused < self.offset {
            self.offset = self.focused;
        } else if self.focused >= self.offset + visible {
            self.offset = self.focused + 1 - visible;
        }
    }

    fn on_last_field(&self) -> bool {
        self.focused + 1 >= self.fields.len()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> FormOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return FormOutcome::Submit;
        }
        let Some(field) = self.fields.get(self.focused) else {
            return FormOutcome::Ignored;
        };
        let completes_on_tab = matches!(field.kind, FieldKind::Path(_));

        match key.code {
            KeyCode::Esc => return FormOutcome::Ignored,
            KeyCode::Enter if self.on_last_field() => return FormOutcome::Submit,
            KeyCode::Enter => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            KeyCode::Tab if !completes_on_tab => self.focus_next(),
            _ => {
                let focused = self.focused;
                let handled = self.fields[focused].handle_key(key);
                if !handled {
                    match key.code {
                        KeyCode::Down => self.focus_next(),
                        KeyCode::Up => self.focus_prev(),
                        _ => return FormOutcome::Ignored,
                    }
                }
            }
        }
        FormOutcome::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn selector_wraps_to_first() {
        let mut role = Selector::new(["User", "Admin", "Superadmin"]);
        assert_eq!(role.index(), Some(0));
        for _ in 0..2 {
            role.next();
        }
        assert_eq!(role.value(), Some("Superadmin"));
        role.next();
        assert_eq!(role.index(), Some(0));
        role.prev();
        assert_eq!(role.index(), Some(2));
    }

    #[test]
    fn optional_selector_wraps_through_none() {
        let mut parent = Selector::optional(["ca-1", "ca-2"]);
        assert_eq!(parent.index(), None);
        parent.next();
        assert_eq!(parent.index(), Some(0));
        parent.next();
        assert_eq!(parent.index(), Some(1));
        parent.next();
        assert_eq!(parent.index(), None);
        parent.prev();
        assert_eq!(parent.index(), Some(1));
    }

    #[test]
    fn shrinking_options_keeps_selection_valid() {
        let mut s = Selector::new(["a", "b", "c"]);
        s.select(Some(2));
        s.set_options(["x"]);
        assert_eq!(s.index(), Some(0));

        let mut o = Selector::optional(["a", "b"]);
        o.select(Some(1));
        o.set_options(["x"]);
        assert_eq!(o.index(), None);
    }

    fn sample() -> Form {
        Form::new(vec![
            Field::text("Common Name", "").required(),
            Field::selector("Algorithm", Selector::new(["RSA", "EC", "ED25519"])),
            Field::toggle("Allow Sub CA", false),
            Field::text("Comment", ""),
        ])
    }

    #[test]
    fn directional_keys_cycle_focused_selector() {
        let mut form = sample();
        form.handle_key(&key(KeyCode::Tab));
        assert_eq!(form.focused(), 1);

        assert_eq!(form.handle_key(&key(KeyCode::Down)), FormOutcome::Consumed);
        assert_eq!(form.value(1), "EC");
        assert_eq!(form.focused(), 1);
        form.handle_key(&key(KeyCode::Down));
        form.handle_key(&key(KeyCode::Down));
        assert_eq!(form.value(1), "RSA");

        form.handle_key(&key(KeyCode::Enter));
        assert_eq!(form.focused(), 2);
        form.handle_key(&key(KeyCode::Char(' ')));
        assert!(form.flag(2));
    }

    #[test]
    fn text_fields_take_characters_and_arrows_move_focus() {
        let mut form = sample();
        form.handle_key(&key(KeyCode::Char('j')));
        assert_eq!(form.value(0), "j");
        form.handle_key(&key(KeyCode::Down));
        assert_eq!(form.focused(), 1);
        form.handle_key(&key(KeyCode::BackTab));
        assert_eq!(form.focused(), 0);
    }

    #[test]
    fn submit_and_required() {
        let mut form = sample();
        assert_eq!(form.missing_required(), Some("Common Name"));
        form.set_text(0, "example.com");
        assert_eq!(form.missing_required(), None);

        assert_eq!(
            form.handle_key(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            FormOutcome::Submit
        );
        for _ in 0..3 {
            form.handle_key(&key(KeyCode::Tab));
        }
        assert_eq!(form.handle_key(&key(KeyCode::Enter)), FormOutcome::Submit);
        assert_eq!(form.handle_key(&key(KeyCode::Esc)), FormOutcome::Ignored);
    }

    #[test]
    fn focus_scrolls_window() {
        let mut form = sample();
        form.set_height(2);
        form.focus_next();
        form.focus_next();
        assert_eq!(form.offset(), 1);
        form.focus_next();
        form.focus_next();
        assert_eq!((form.focused(), form.offset()), (0, 0));
    }
}
