//! CertVault TUI（cvx）
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)
//! - **Message**: 事件消息与副作用 (`message/`)
//! - **Update**: 状态更新 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Backend**: 接口调用、文件、配置 (`backend/`)
//!
//!
//! main.rs
//! 程序入口
//!
//! 其执行：
//! async fn `main()` {
//!
//!     Cli::parse()            // 命令行参数
//!     init_logging()          // 日志写入 <配置目录>/certvaultclix/cvx.log
//!     load_config()           // 配置文件 → 环境变量 → --server
//!     CertVaultClient         // 接口客户端（带上保存的会话）
//!
//!     ping / version          // 子命令：直接执行后返回
//!
//!     init_terminal()         // 原始模式 + 备用屏幕
//!     app::run()              // 运行 app.rs 主循环
//!     restore_terminal()      // 无论成功与否，都恢复终端
//!     save_session()          // 正常退出时保存会话令牌
//!
//! }
//!

mod app;
mod backend;
mod cli;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use std::sync::Arc;

use anyhow::{Context, Result};
use certvault_api::{CertVaultApi, CertVaultClient};
use clap::Parser;

use backend::{AppConfig, ConfigService, JsonConfigService, log_file};
use cli::{Cli, Commands};
use util::{init_terminal, logging::init_logging, restore_terminal};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Version)) {
        println!("cvx {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // 日志失败不影响使用
    if let Err(e) = init_logging(cli.log_level, &log_file()) {
        eprintln!("warning: logging disabled: {e:#}");
    }

    // 1. 配置：文件 → 环境变量 → 命令行
    let store = JsonConfigService::new();
    let config = load_config(&store, cli.server.as_deref());

    // 2. 接口客户端
    let client = CertVaultClient::with_session(&config.server_url, config.session())
        .context("failed to create HTTP client")?;
    let api: Arc<dyn CertVaultApi> = Arc::new(client);

    if matches!(cli.command, Some(Commands::Ping)) {
        return ping(api.as_ref()).await;
    }

    // 3. 初始化终端
    let mut terminal = init_terminal()?;

    // 4. 创建应用实例并运行主循环
    let mut app = model::App::new(Arc::clone(&api), config, Box::new(store));
    let result = app::run(&mut terminal, &mut app).await;

    // 5. 恢复终端（无论成功失败都执行）
    restore_terminal(&mut terminal)?;

    // 6. 保存会话
    if result.is_ok() {
        save_session(&app);
    }
    log::info!("cvx exited");
    result
}

/// 加载配置；读取失败时使用默认值
fn load_config(store: &dyn ConfigService, server: Option<&str>) -> AppConfig {
    let mut config = store.load().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {e:#}");
        AppConfig::default()
    });
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(url) = server.filter(|s| !s.trim().is_empty()) {
        config.server_url = url.trim().to_string();
    }
    config
}

fn save_session(app: &model::App) {
    let Some(session) = app.api.session() else {
        return;
    };
    let mut config = app.config.clone();
    config.server_url = app.api.base_url();
    config.session = session;
    if let Err(e) = app.config_store.save(&config) {
        log::warn!("Failed to save session: {e:#}");
    }
}

async fn ping(api: &dyn CertVaultApi) -> Result<()> {
    let url = api.base_url();
    match api.ping().await {
        Ok(()) => {
            println!("{url}: reachable");
            Ok(())
        }
        Err(e) => {
            log::warn!("Ping {url} failed: {e}");
            anyhow::bail!("{url}: unreachable ({e})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonConfigService::at(dir.path().join("config.json"));
        store
            .save(&AppConfig {
                server_url: "http://from-file".into(),
                session: "s".into(),
            })
            .unwrap();
        let config = load_config(&store, Some(" https://flag.example.com "));
        assert_eq!(config.server_url, "https://flag.example.com");
        assert_eq!(config.session, "s");
    }

    #[test]
    fn broken_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{oops").unwrap();
        let config = load_config(&JsonConfigService::at(path), None);
        assert!(config.session.is_empty());
    }
}
