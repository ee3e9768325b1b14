use crate::model::widgets::{Spinner, TextInput};

/// 登录页焦点环：用户名 → 密码 → 按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginFocus {
    #[default]
    Username,
    Password,
    Button,
}

impl LoginFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Username => Self::Password,
            Self::Password => Self::Button,
            Self::Button => Self::Username,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Username => Self::Button,
            Self::Password => Self::Username,
            Self::Button => Self::Password,
        }
    }
}

#[derive(Debug, Default)]
pub struct LoginState {
    pub username: TextInput,
    pub password: TextInput,
    pub focus: LoginFocus,
    pub error: Option<String>,
    pub spinner: Spinner<()>,
    /// 显示用
    pub server_url: String,
}

impl LoginState {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            password: TextInput::masked(),
            server_url: server_url.into(),
            ..Self::default()
        }
    }
}
