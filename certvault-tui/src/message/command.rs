use std::time::Duration;

use super::app::AppMessage;
use super::job::{Job, Ticket};

/// Update 层交给运行时执行的副作用
#[derive(Debug)]
pub enum Command {
    /// 在独立任务中执行，结束后投递 `AppMessage::JobFinished`
    Run { ticket: Ticket, job: Job },
    /// 延时后投递一条消息（不可取消）
    Timer { delay: Duration, msg: AppMessage },
}
