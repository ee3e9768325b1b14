use crossterm::event::KeyEvent;

use super::job::{JobResult, Ticket};

/// 主循环消费的消息
///
/// 输入线程、计时器与异步任务都只向同一条队列投递 `AppMessage`，
/// 主循环按到达顺序逐条交给 Update 层处理。
#[derive(Debug)]
pub enum AppMessage {
    /// 键盘按下（已过滤 Release / Repeat）
    Key(KeyEvent),
    /// 鼠标滚轮
    ScrollUp,
    ScrollDown,
    /// 终端尺寸变化
    Resize(u16, u16),
    /// 动画节拍
    Tick,
    /// 异步任务结束，每个任务恰好一条
    JobFinished { ticket: Ticket, result: JobResult },
    /// 清除指定 id 的提示；id 不匹配时忽略
    ClearToast { id: u64 },
    /// 退出应用
    Quit,
    /// 无操作，用于代替 Option::None
    Noop,
}
