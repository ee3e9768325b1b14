//!
//! src/model/mod.rs
//! Model 层：应用状态定义
//!
//! Model 层是应用状态的 "唯一真相来源"。
//! 这一层只包含数据结构与控件的局部状态机，不发请求、不做 I/O。
//! 所有跨视图的状态变更都通过 Update 层来触发。
//!
//!
//! 有模块结构：
//!     src/model/mod.rs
//!         mod app;            // 主应用状态
//!         mod navigation;     // 侧边栏状态（按角色过滤）
//!         mod view_id;        // 顶层视图标识
//!
//!         pub mod state;      // 各视图状态
//!         pub mod widgets;    // 通用控件：表格、表单、对话框、提示、spinner ……
//!
//!     ViewId 与 state/ 都表示视图，但两者不同：
//!         - ViewId 是一个简单的枚举，只负责标识"现在在哪个房间"；
//!         - state/ 中的结构体是各房间的内容：列表、选中项、子模式、等待中的任务。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、主应用状态（App）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!         pub struct App {
//!             pub current: ViewId,                // 当前视图
//!             pub prev_view: ViewId,              // 上一个视图（单层返回）
//!             pub epoch: u64,                     // 会话代数
//!             pub login: LoginState,              // 登录页（始终存在）
//!             pub views: Option<Box<MainViews>>,  // 登录后的视图（会话重置时丢弃）
//!             pub logout_dialog: Option<ConfirmDialog>,
//!             pub toast: ToastState,
//!             ...
//!         }
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、子模式
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     复杂视图的子模式都是和类型（enum），渲染与按键处理都对其穷举匹配。
//!     证书详情的子模式以栈保存，esc 只弹出一层：
//!
//!         Normal → ChainSelect → ExportPath
//!                      ▲             │ esc
//!                      └─────────────┘
//!

mod app;
mod navigation;
mod view_id;

pub mod state;
pub mod widgets;

pub use app::{App, FOOTER_HEIGHT, MainViews, PAGE_CHROME, SIDEBAR_WIDTH, STATUS_HEIGHT};
pub use navigation::{NavItemId, NavigationState};
pub use view_id::ViewId;
