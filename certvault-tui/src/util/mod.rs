//!
//! src/util/mod.rs
//! Util 层：基础设施和工具函数
//!
//! Util 层提供与业务逻辑无关的基础设施代码。
//!
//!
//! 有模块结构：
//!     src/util/mod.rs
//!         mod terminal;       // 终端初始化和恢复
//!         pub mod datetime;   // 服务端时间解析、剩余天数
//!         pub mod logging;    // env_logger 初始化（写文件）
//!         pub mod path;       // `~` 展开
//!
//!
//!     初始化终端：
//!         在 src/util/terminal.rs 中，有：
//!
//!             pub fn init_terminal() -> Result<Term> {
//!                 enable_raw_mode()?;                                  // 1. 原始模式
//!                 execute!(stdout, EnterAlternateScreen,
//!                          EnableMouseCapture)?;                       // 2. 备用屏幕 + 鼠标
//!                 Terminal::new(CrosstermBackend::new(stdout))         // 3. 终端对象
//!             }
//!
//!         · Raw Mode：每个按键立即生效、不回显
//!         · Alternate Screen：退出后恢复原有屏幕内容
//!         · Mouse Capture：列表与结果区支持滚轮
//!
//!
//!     日志：
//!         终端由 TUI 独占，因此日志不能写 stderr。
//!         logging::init_logging() 把 env_logger 的输出重定向到
//!         <配置目录>/certvaultclix/cvx.log。
//!
//!
//!     恢复终端：
//!         无论主循环正常结束还是出错，main.rs 都会先调用 restore_terminal()
//!         再返回结果，否则终端会停留在原始模式。
//!

pub mod datetime;
pub mod logging;
pub mod path;
mod terminal;

pub use terminal::{Term, init_terminal, restore_terminal};
