use std::path::PathBuf;

use crate::model::widgets::TextInput;

#[derive(Debug, Default)]
pub struct SettingsState {
    pub server_url: String,
    /// 正在编辑的服务器地址
    pub editing: Option<TextInput>,
    pub error: Option<String>,
    pub config_path: PathBuf,
}

impl SettingsState {
    pub fn new(server_url: impl Into<String>, config_path: PathBuf) -> Self {
        Self {
            server_url: server_url.into(),
            config_path,
            ..Self::default()
        }
    }
}
