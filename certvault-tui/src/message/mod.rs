//!
//! src/message/mod.rs
//! Message 层：消息与副作用定义
//!
//! 作为 Event ──▶ Update 之间的桥梁，同时也是 Update ──▶ Backend 之间的桥梁。
//!
//!
//! 有模块结构：
//!     src/message/mod.rs
//!         mod app;            // AppMessage：主循环消费的一切消息
//!         mod command;        // Command：Update 返回给运行时的副作用
//!         mod effect;         // Effect：视图返回给根控制器的意图
//!         mod job;            // Job / JobOutput / Ticket：异步任务
//!
//!
//!     一条消息的生命周期：
//!
//!         crossterm Event ──▶ event::handler ──▶ AppMessage::Key
//!                                                    │
//!                                                    ▼
//!                                     update::update(app, msg) -> Vec<Command>
//!                                                    │
//!                            ┌───────────────────────┴──────────────┐
//!                            ▼                                      ▼
//!                  Command::Run { ticket, job }         Command::Timer { delay, msg }
//!                            │                                      │
//!                   backend::Executor (tokio::spawn)        tokio::time::sleep
//!                            │                                      │
//!                            ▼                                      ▼
//!              AppMessage::JobFinished { ticket, result }     AppMessage::ClearToast
//!
//!
//!     每个任务恰好产生一条结果消息；主循环按到达顺序逐条处理。
//!     Ticket 中的 epoch 与 seq 用来丢弃过期结果，
//!     规则见 src/update/mod.rs。
//!

mod app;
mod command;
mod effect;
mod job;

pub use app::AppMessage;
pub use command::Command;
pub use effect::Effect;
pub use job::{
    CertKind, CertRef, DashboardStats, ExportSource, Job, JobOutput, JobResult, TaskError,
    Target, Ticket,
};
