//!
//! src/view/mod.rs
//! View 层：UI 渲染
//!
//! View 层只读取 Model，把它画到终端上，不修改任何状态。
//!
//!
//! 有模块结构：
//!     src/view/mod.rs
//!         mod layout;         // 主布局：状态栏 / 侧边栏 / 内容区 / 按键提示
//!         mod theme;          // 颜色与常用样式
//!         mod components;     // 侧边栏、状态栏、浮层、通用控件
//!         mod pages;          // 每个视图一个文件
//!
//!
//!     布局（登录页之外）：
//!
//!         ┌──────────────────────────────────────────────────┐
//!         │ CertVault · 视图 │ 用户 (角色) │ 服务器            │  STATUS_HEIGHT
//!         ├──────────────┬───────────────────────────────────┤
//!         │   侧边栏      │             内容区                 │
//!         │ SIDEBAR_WIDTH │                                   │
//!         ├──────────────┴───────────────────────────────────┤
//!         │ 按键提示                                           │  FOOTER_HEIGHT
//!         └──────────────────────────────────────────────────┘
//!
//!     内容区的尺寸同时由 update 层通过 `App::content_size` 计算，
//!     各视图在 `resize` 中据此设置表格、文本区的可见行数，
//!     这里的行分配必须与之保持一致。
//!

mod components;
mod layout;
mod pages;
mod theme;

use ratatui::Frame;

use crate::model::App;

/// 渲染整个界面
pub fn render(app: &App, frame: &mut Frame) {
    layout::render(app, frame);
}
