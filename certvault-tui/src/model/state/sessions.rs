use certvault_api::LoginRecord;

use super::PagedList;
use crate::model::widgets::{ConfirmDialog, Spinner};

/// 等待确认的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// 注销一条登录记录
    Logout(String),
    /// 注销全部会话（包括当前会话）
    LogoutAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionsOp {
    Load { page: u32, notice: Option<String> },
    LogoutAll,
}

#[derive(Debug, Default)]
pub struct SessionsState {
    pub list: PagedList<LoginRecord>,
    pub spinner: Spinner<SessionsOp>,
    pub confirm: Option<(ConfirmDialog, SessionAction)>,
}
