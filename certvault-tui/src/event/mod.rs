//!
//! src/event/mod.rs
//! Event 层：事件处理
//!
//! 负责将键盘 / 鼠标 / 尺寸变化等终端事件转换为 Message。
//!
//!
//! 有模块结构：
//!     src/event/mod.rs
//!         mod handler;        // 事件翻译与输入线程
//!
//!         pub use handler::spawn_input;
//!
//!
//!     crossterm 的 event::read() 是阻塞的，因此输入放在独立的线程中：
//!
//!         loop {
//!             poll_event(剩余节拍时间)        // 最多等待到下一次 Tick
//!                 → handle_event(event)       // 翻译为 AppMessage
//!                 → tx.send(msg)              // 投递到主循环的队列
//!             每 100ms 投递一次 AppMessage::Tick（spinner 动画）
//!         }
//!
//!     只转发：
//!         Event::Key（仅 Press）        → AppMessage::Key
//!         Event::Mouse（滚轮）          → AppMessage::ScrollUp / ScrollDown
//!         Event::Resize(w, h)           → AppMessage::Resize
//!
//!     具体按键的含义由 Update 层决定，这里不做任何映射。
//!

mod handler;

pub use handler::spawn_input;
