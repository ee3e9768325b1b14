use std::path::PathBuf;
use std::sync::Arc;

use certvault_api::{CertVaultApi, UserProfile};

use super::state::{
    AdminState, CaListState, CertDetailState, CertListState, CertRequestState, DashboardState,
    LoginState, ProfileState, SessionsState, SettingsState, SuperadminState, ToolsState,
};
use super::widgets::{ConfirmDialog, ToastState};
use super::{NavigationState, ViewId};
use crate::backend::{AppConfig, ConfigService};

/// 侧边栏宽度
pub const SIDEBAR_WIDTH: u16 = 22;
/// 顶部状态栏高度
pub const STATUS_HEIGHT: u16 = 1;
/// 底部按键提示高度
pub const FOOTER_HEIGHT: u16 = 1;
/// 列表页的外框与分页行
pub const PAGE_CHROME: u16 = 3;

/// 登录后才存在的视图
///
/// 登录成功时整体重建，会话重置时整体丢弃，
/// 旧会话的任何状态都不会泄漏到新会话。
#[derive(Debug)]
pub struct MainViews {
    pub dashboard: DashboardState,
    pub ca_list: CaListState,
    pub cert_list: CertListState,
    pub cert_request: CertRequestState,
    pub profile: ProfileState,
    pub sessions: SessionsState,
    pub tools: ToolsState,
    pub admin: AdminState,
    pub superadmin: SuperadminState,
    pub settings: SettingsState,
    /// CA / 证书详情（同一时刻最多一个）
    pub detail: Option<CertDetailState>,
}

impl MainViews {
    pub fn new(user: &UserProfile, server_url: &str, config_path: PathBuf) -> Self {
        Self {
            dashboard: DashboardState::new(user.clone()),
            ca_list: CaListState::default(),
            cert_list: CertListState::default(),
            cert_request: CertRequestState::new(),
            profile: ProfileState::new(user.clone()),
            sessions: SessionsState::default(),
            tools: ToolsState::default(),
            admin: AdminState::default(),
            superadmin: SuperadminState::default(),
            settings: SettingsState::new(server_url, config_path),
            detail: None,
        }
    }
}

/// 应用主状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,

    /// 当前视图
    pub current: ViewId,
    /// 上一个视图（单层返回）
    pub prev_view: ViewId,

    /// 终端尺寸
    pub width: u16,
    pub height: u16,

    /// 会话代数；登录成功与会话重置时递增
    pub epoch: u64,
    /// 当前登录用户
    pub profile: Option<UserProfile>,

    /// 侧边栏
    pub navigation: NavigationState,

    // === 各视图状态 ===
    pub login: LoginState,
    pub views: Option<Box<MainViews>>,

    // === 全局浮层 ===
    pub logout_dialog: Option<ConfirmDialog>,
    /// 注销请求已发出，等待结果
    pub logging_out: bool,
    pub help_visible: bool,
    pub toast: ToastState,

    // === 外部协作者 ===
    pub config: AppConfig,
    pub config_store: Box<dyn ConfigService>,
    pub api: Arc<dyn CertVaultApi>,
}

impl App {
    /// 创建新的应用实例（登录页）
    pub fn new(
        api: Arc<dyn CertVaultApi>,
        config: AppConfig,
        config_store: Box<dyn ConfigService>,
    ) -> Self {
        Self {
            should_quit: false,
            current: ViewId::Login,
            prev_view: ViewId::Login,
            width: 0,
            height: 0,
            epoch: 0,
            profile: None,
            navigation: NavigationState::default(),
            login: LoginState::new(api.base_url()),
            views: None,
            logout_dialog: None,
            logging_out: false,
            help_visible: false,
            toast: ToastState::default(),
            config,
            config_store,
            api,
        }
    }

    /// 内容区尺寸：去掉侧边栏、状态栏与提示行，各维度至少为 1
    pub fn content_size(&self) -> (u16, u16) {
        (
            self.width.saturating_sub(SIDEBAR_WIDTH).max(1),
            self.height
                .saturating_sub(STATUS_HEIGHT + FOOTER_HEIGHT)
                .max(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::JsonConfigService;
    use certvault_api::CertVaultClient;

    #[test]
    fn content_size_is_clamped() {
        let api = Arc::new(CertVaultClient::new("http://127.0.0.1:9").unwrap());
        let mut app = App::new(
            api,
            AppConfig::default(),
            Box::new(JsonConfigService::at("/nonexistent/config.json")),
        );
        app.width = 100;
        app.height = 30;
        assert_eq!(app.content_size(), (78, 28));
        app.width = 10;
        app.height = 1;
        assert_eq!(app.content_size(), (1, 1));
    }
}
