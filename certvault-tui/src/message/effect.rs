use certvault_api::UserProfile;

use super::job::{Job, TaskError};
use crate::model::state::Subject;
use crate::model::widgets::ToastKind;
use crate::model::ViewId;

/// 视图返回给根控制器的意图
///
/// 视图只修改自己的状态；凡是涉及其它视图、会话或运行时的事情，
/// 都以 `Effect` 的形式交给根控制器处理。
#[derive(Debug, Default)]
pub enum Effect {
    #[default]
    None,
    /// 发起异步任务，`seq` 来自视图自己的 spinner
    Spawn { seq: u64, job: Job },
    Batch(Vec<Effect>),
    /// 会话失效：清除会话并回到登录页
    SessionExpired,
    /// 服务端已注销本会话（例如注销全部会话），回到登录页但不提示失效
    LoggedOut,
    LoginSucceeded(UserProfile),
    /// 当前用户资料已更新
    ProfileUpdated(UserProfile),
    Toast(ToastKind, String),
    OpenDetail(Subject),
    /// 关闭证书详情，返回上一个视图
    CloseDetail { reload: bool },
    Navigate(ViewId),
    ServerUrlChanged(String),
}

impl Effect {
    pub fn spawn(seq: u64, job: Job) -> Self {
        Self::Spawn { seq, job }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::Toast(ToastKind::Success, text.into())
    }

    /// 失败分流：会话失效上抛，其它错误写入视图自己的错误槽
    pub fn failure(err: TaskError, slot: &mut Option<String>) -> Self {
        match err {
            TaskError::SessionExpired => Self::SessionExpired,
            TaskError::Failed(message) => {
                *slot = Some(message);
                Self::None
            }
        }
    }

    /// 追加一个效果
    #[must_use]
    pub fn and(self, other: Effect) -> Self {
        match (self, other) {
            (Self::None, other) => other,
            (this, Self::None) => this,
            (Self::Batch(mut list), other) => {
                list.push(other);
                Self::Batch(list)
            }
            (this, other) => Self::Batch(vec![this, other]),
        }
    }

    #[cfg(test)]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_splits_session_expiry() {
        let mut slot = None;
        assert!(matches!(
            Effect::failure(TaskError::SessionExpired, &mut slot),
            Effect::SessionExpired
        ));
        assert!(slot.is_none());

        assert!(Effect::failure(TaskError::Failed("nope".into()), &mut slot).is_none());
        assert_eq!(slot.as_deref(), Some("nope"));
    }

    #[test]
    fn and_flattens_none() {
        assert!(Effect::None.and(Effect::None).is_none());
        let both = Effect::success("a").and(Effect::SessionExpired);
        assert!(matches!(both, Effect::Batch(ref v) if v.len() == 2));
        let three = both.and(Effect::Navigate(ViewId::Dashboard));
        assert!(matches!(three, Effect::Batch(ref v) if v.len() == 3));
    }
}
