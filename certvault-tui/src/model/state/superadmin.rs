use certvault_api::{AllSession, Role, UserProfile};

use super::PagedList;
use crate::model::widgets::{ConfirmDialog, Field, Form, Menu, Selector, Spinner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuperSection {
    Sessions,
    Users,
}

impl SuperSection {
    pub fn title(self) -> &'static str {
        match self {
            Self::Sessions => "All Sessions",
            Self::Users => "User Management",
        }
    }
}

/// 用户表单字段下标
pub mod user_field {
    pub const USERNAME: usize = 0;
    pub const DISPLAY_NAME: usize = 1;
    pub const EMAIL: usize = 2;
    pub const PASSWORD: usize = 3;
    pub const ROLE: usize = 4;
}

/// 编辑表单字段下标
pub mod edit_field {
    pub const DISPLAY_NAME: usize = 0;
    pub const EMAIL: usize = 1;
    pub const PASSWORD: usize = 2;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFormKind {
    Create,
    Edit(String),
}

pub fn role_selector(current: u8) -> Selector {
    let mut selector = Selector::new(Role::ALL.map(Role::name));
    selector.select(Role::ALL.iter().position(|r| r.code() == current));
    selector
}

pub fn create_user_form() -> Form {
    Form::new(vec![
        Field::text("Username", "").required(),
        Field::text("Display Name", ""),
        Field::text("Email", ""),
        Field::password("Password").required(),
        Field::selector("Role", role_selector(Role::User.code())),
    ])
}

/// 编辑表单：用户名只读，不在表单中
pub fn edit_user_form(user: &UserProfile) -> Form {
    Form::new(vec![
        Field::text("Display Name", user.display_name.clone()),
        Field::text("Email", user.email.clone()),
        Field::password("Password").placeholder("leave empty to keep"),
    ])
}

pub fn role_form(user: &UserProfile) -> Form {
    Form::new(vec![Field::selector("Role", role_selector(user.role))])
}

#[derive(Debug)]
pub enum SuperMode {
    /// `user` 为 `Some` 时只显示该用户的会话
    Sessions {
        list: PagedList<AllSession>,
        user: Option<String>,
    },
    Users(PagedList<UserProfile>),
    UserForm {
        kind: UserFormKind,
        form: Form,
    },
    RoleForm {
        username: String,
        form: Form,
    },
}

impl SuperMode {
    pub fn is_form(&self) -> bool {
        matches!(self, Self::UserForm { .. } | Self::RoleForm { .. })
    }
}

/// 等待确认的危险操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuperAction {
    ForceLogout(String),
    DeleteUser(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuperOp {
    Sessions { page: u32, notice: Option<String> },
    /// `from_form` 为真时成功后关闭表单
    Users {
        page: u32,
        notice: Option<String>,
        from_form: bool,
    },
}

#[derive(Debug)]
pub struct SuperadminState {
    pub menu: Menu<SuperSection>,
    /// 子模式栈；空即菜单
    pub modes: Vec<SuperMode>,
    pub spinner: Spinner<SuperOp>,
    pub confirm: Option<(ConfirmDialog, SuperAction)>,
    /// 表单错误
    pub error: Option<String>,
    pub width: u16,
    pub height: u16,
}

impl Default for SuperadminState {
    fn default() -> Self {
        Self {
            menu: Menu::new([SuperSection::Sessions, SuperSection::Users].map(|s| (s, s.title()))),
            modes: Vec::new(),
            spinner: Spinner::new(),
            confirm: None,
            error: None,
            width: 1,
            height: 1,
        }
    }
}

impl SuperadminState {
    pub fn body_height(&self) -> u16 {
        self.height.saturating_sub(4).max(1)
    }
}
