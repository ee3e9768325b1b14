//! 日志初始化
//!
//! 终端被 TUI 占用，日志写入配置目录下的 `cvx.log`。
//! 级别优先级：`--log-level` > `CVX_LOG` > `warn`。

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;

/// 日志级别环境变量
pub const LOG_ENV: &str = "CVX_LOG";

/// 决定最终日志级别
pub fn resolve_level(cli: Option<LevelFilter>, env: Option<&str>) -> LevelFilter {
    cli.or_else(|| env.and_then(|v| v.trim().parse().ok()))
        .unwrap_or(LevelFilter::Warn)
}

/// 初始化 `env_logger`，输出到 `log_path`（追加写入）
pub fn init_logging(cli: Option<LevelFilter>, log_path: &Path) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let level = resolve_level(cli, env.as_deref());

    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    env_logger::Builder::new()
        .filter_level(level)
        .filter_module("hyper", LevelFilter::Warn)
        .filter_module("rustls", LevelFilter::Warn)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    log::info!("cvx {} started, log level {level}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_wins() {
        assert_eq!(
            resolve_level(Some(LevelFilter::Debug), Some("error")),
            LevelFilter::Debug
        );
    }

    #[test]
    fn env_level_then_default() {
        assert_eq!(resolve_level(None, Some("info")), LevelFilter::Info);
        assert_eq!(resolve_level(None, Some("nonsense")), LevelFilter::Warn);
        assert_eq!(resolve_level(None, None), LevelFilter::Warn);
    }
}
