//! 配置服务
//!
//! 配置文件：`<config dir>/certvaultclix/config.json`
//!
//! ```json
//! { "server_url": "http://localhost:1888", "session": "..." }
//! ```
//!
//! 环境变量 `CERTVAULT_URL` / `CERTVAULT_SESSION` 优先于文件。

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 默认服务器地址
pub const DEFAULT_SERVER_URL: &str = "http://localhost:1888";
/// 服务器地址环境变量
pub const ENV_SERVER_URL: &str = "CERTVAULT_URL";
/// 会话令牌环境变量
pub const ENV_SESSION: &str = "CERTVAULT_SESSION";

const CONFIG_DIR_NAME: &str = "certvaultclix";
const CONFIG_FILE_NAME: &str = "config.json";
const LOG_FILE_NAME: &str = "cvx.log";

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub session: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            session: String::new(),
        }
    }
}

impl AppConfig {
    /// 用环境变量覆盖（空值忽略）
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SERVER_URL).filter(|v| !v.is_empty()) {
            self.server_url = url;
        }
        if let Some(session) = lookup(ENV_SESSION).filter(|v| !v.is_empty()) {
            self.session = session;
        }
    }

    /// 持有的会话令牌
    pub fn session(&self) -> Option<String> {
        (!self.session.is_empty()).then(|| self.session.clone())
    }
}

/// 应用的配置目录
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// 日志文件路径
pub fn log_file() -> PathBuf {
    config_dir().join(LOG_FILE_NAME)
}

/// 配置服务 trait
pub trait ConfigService: Send + Sync {
    /// 加载配置（文件不存在时返回默认值）
    fn load(&self) -> Result<AppConfig>;

    /// 保存配置
    fn save(&self, config: &AppConfig) -> Result<()>;

    /// 配置文件路径
    fn path(&self) -> &Path;
}

/// 基于 JSON 文件的配置服务
#[derive(Debug, Clone)]
pub struct JsonConfigService {
    path: PathBuf,
}

impl JsonConfigService {
    /// 默认位置
    pub fn new() -> Self {
        Self::at(config_dir().join(CONFIG_FILE_NAME))
    }

    /// 指定位置（测试用）
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for JsonConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService for JsonConfigService {
    fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            return Ok(AppConfig::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config file {}", self.path.display()))?;
        Ok(config)
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            create_private_dir(dir)?;
        }
        let content = serde_json::to_string_pretty(config)?;
        let mut file = private_file_options()
            .open(&self.path)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        log::debug!("config saved to {}", self.path.display());
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

fn create_private_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
        .create(dir)
        .with_context(|| format!("failed to create {}", dir.display()))
}

fn private_file_options() -> fs::OpenOptions {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = JsonConfigService::at(dir.path().join("none.json"));
        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let service = JsonConfigService::at(dir.path().join("nested/config.json"));
        let config = AppConfig {
            server_url: "https://vault.example.com".into(),
            session: "abc".into(),
        };
        service.save(&config).unwrap();
        assert_eq!(service.load().unwrap(), config);
    }

    #[test]
    fn empty_session_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let service = JsonConfigService::at(dir.path().join("config.json"));
        service.save(&AppConfig::default()).unwrap();
        let raw = fs::read_to_string(service.path()).unwrap();
        assert!(!raw.contains("session"));
        assert!(raw.contains("server_url"));
    }

    #[cfg(unix)]
    #[test]
    fn config_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let service = JsonConfigService::at(dir.path().join("cfg/config.json"));
        service.save(&AppConfig::default()).unwrap();
        let mode = fs::metadata(service.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn env_overrides_file() {
        let mut config = AppConfig {
            server_url: "http://file".into(),
            session: "file-session".into(),
        };
        config.apply_env(|key| match key {
            ENV_SERVER_URL => Some("http://env".into()),
            ENV_SESSION => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.server_url, "http://env");
        assert_eq!(config.session, "file-session");
    }

    #[test]
    fn garbage_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(JsonConfigService::at(path).load().is_err());
    }
}
