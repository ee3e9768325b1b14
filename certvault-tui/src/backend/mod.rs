//!
//! src/backend/mod.rs
//! Backend 层：与 UI 解耦的副作用
//!
//! Backend 层不持有任何界面状态，只负责"真正去做事"：
//! 调用 CertVault 接口、读写本地文件、保存配置。
//!
//!
//! 有模块结构：
//!     src/backend/mod.rs
//!         mod config;         // 配置文件（JSON）与环境变量覆盖
//!         mod executor;       // 任务执行器：Command → tokio 任务 → AppMessage
//!         mod export;         // 证书 / 私钥导出与本地文件读取
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、任务执行器（Executor）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     Update 层是同步的纯函数，它只返回 Command：
//!
//!         Command::Run { ticket, job }        执行一个接口调用
//!         Command::Timer { delay, msg }       延时投递一条消息
//!
//!     Executor 为每条 Command 启动一个 tokio 任务，
//!     任务结束时向主循环的队列投递恰好一条消息。
//!     任务之间没有共享状态，接口客户端以 Arc<dyn CertVaultApi> 形式共享。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、配置（ConfigService）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     配置文件位于 <config_dir>/certvaultclix/config.json：
//!
//!         { "server_url": "http://localhost:1888", "session": "..." }
//!
//!     CERTVAULT_URL / CERTVAULT_SESSION 环境变量优先于文件内容。
//!     目录权限 0700，文件权限 0600。
//!

mod config;
mod executor;
mod export;

pub use config::{AppConfig, ConfigService, JsonConfigService, log_file};
pub use executor::Executor;
