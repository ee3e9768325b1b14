//!
//! src/update/mod.rs
//! Update 层：状态更新逻辑
//!
//! Update 层负责处理 Message，更新 Model 状态，并返回需要运行时执行的 Command。
//! 它是唯一可以修改 Model 的地方，本身不做任何 I/O。
//!
//!
//! 有模块结构：
//!     src/update/mod.rs           // 根控制器：全局按键、会话、视图切换、Effect 落地
//!         mod login;              // 以下每个文件为一个视图实现 ViewController
//!         mod dashboard;
//!         mod cert_list;          // CA 列表与 SSL 证书列表
//!         mod cert_detail;
//!         mod cert_request;
//!         mod profile;
//!         mod sessions;
//!         mod tools;
//!         mod admin;
//!         mod superadmin;
//!         mod settings;
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、根控制器
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!         pub fn update(app: &mut App, msg: AppMessage) -> Vec<Command>
//!
//!     按键的处理顺序：
//!         ctrl+c                      → 退出
//!         帮助浮层打开                 → 任意键关闭
//!         注销确认框打开               → 交给确认框
//!         注销进行中                   → 忽略
//!         ?（视图不在输入状态）         → 打开帮助
//!         q（视图在根状态且不在输入）   → 退出
//!         esc（视图在根状态）          → 离开视图
//!         仪表盘上的 ↑/↓/j/k/enter    → 侧边栏
//!         其它                        → 当前视图
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、任务结果的路由
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     每个任务都带着 Ticket { epoch, target, seq } 出发：
//!         - epoch 与当前会话代数不同 → 丢弃（包括会话失效的结果）
//!         - target 指向的视图已不存在 → 丢弃
//!         - seq 与视图 spinner 中等待的不同 → 由视图自己丢弃
//!

mod admin;
mod cert_detail;
mod cert_list;
mod cert_request;
mod dashboard;
mod login;
mod profile;
mod sessions;
mod settings;
mod superadmin;
mod tools;

use certvault_api::{UserProfile, role_name};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::message::{
    AppMessage, Command, Effect, Job, JobOutput, JobResult, Target, TaskError, Ticket,
};
use crate::model::state::{CertDetailState, LoginState, Subject};
use crate::model::widgets::{ConfirmDialog, DialogOutcome, TOAST_DURATION, ToastKind};
use crate::model::{App, MainViews, NavItemId, NavigationState, ViewId};

pub(crate) use cert_request::{parse_days, parse_key_size};

/// 视图控制器
///
/// 每个视图只修改自己的状态，跨视图的事情通过返回的 [`Effect`] 交给根控制器。
pub trait ViewController {
    /// 进入视图时调用：清空等待中的任务并返回初始加载
    fn init(&mut self) -> Effect;

    fn handle_key(&mut self, key: KeyEvent) -> Effect;

    /// 任务结果；`seq` 与 spinner 中等待的不符时必须忽略
    fn handle_result(&mut self, seq: u64, result: JobResult) -> Effect;

    /// 从子视图返回且数据可能已变化时调用
    fn refresh(&mut self) -> Effect {
        Effect::None
    }

    /// 不在任何子模式中；只有此时 esc 与 q 由根控制器处理
    fn is_at_root(&self) -> bool {
        true
    }

    /// 正在文本输入；此时 q 与 ? 都是普通字符
    fn is_editing(&self) -> bool {
        false
    }

    /// 鼠标滚轮：移动当前列表或滚动当前文本
    fn scroll(&mut self, _down: bool) {}

    /// 内容区尺寸变化
    fn resize(&mut self, _width: u16, _height: u16) {}

    /// 动画节拍
    fn tick(&mut self) {}
}

/// 启动时的命令：持有会话时尝试自动登录
pub fn init(app: &mut App) -> Vec<Command> {
    let mut commands = Vec::new();
    let effect = app.login.init();
    apply_effect(app, ViewId::Login, effect, &mut commands);
    if app.api.session().is_some() {
        log::info!("Restoring saved session");
        commands.push(Command::Run {
            ticket: Ticket {
                epoch: app.epoch,
                target: Target::AutoLogin,
                seq: 0,
            },
            job: Job::Profile,
        });
    }
    commands
}

/// 处理应用消息，更新状态，返回需要执行的命令
pub fn update(app: &mut App, msg: AppMessage) -> Vec<Command> {
    let mut commands = Vec::new();
    match msg {
        AppMessage::Quit => app.should_quit = true,
        AppMessage::Noop => {}
        AppMessage::Key(key) => handle_key(app, key, &mut commands),
        AppMessage::ScrollUp => scroll(app, false),
        AppMessage::ScrollDown => scroll(app, true),
        AppMessage::Resize(width, height) => resize(app, width, height),
        AppMessage::Tick => {
            let current = app.current;
            if let Some(view) = view_mut(app, current) {
                view.tick();
            }
        }
        AppMessage::ClearToast { id } => {
            app.toast.clear(id);
        }
        AppMessage::JobFinished { ticket, result } => {
            job_finished(app, ticket, result, &mut commands);
        }
    }
    commands
}

// ============ 按键 ============

fn handle_key(app: &mut App, key: KeyEvent, commands: &mut Vec<Command>) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    if app.help_visible {
        app.help_visible = false;
        return;
    }
    if let Some(dialog) = app.logout_dialog.as_mut() {
        match dialog.handle_key(&key) {
            DialogOutcome::Pending => {}
            DialogOutcome::Confirmed => {
                app.logout_dialog = None;
                start_logout(app, commands);
            }
            DialogOutcome::Cancelled => app.logout_dialog = None,
        }
        return;
    }
    if app.logging_out {
        return;
    }

    let current = app.current;
    let (at_root, editing) = view_mut(app, current)
        .map_or((true, false), |view| (view.is_at_root(), view.is_editing()));
    let plain = !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    if plain && !editing {
        match key.code {
            KeyCode::Char('?') => {
                app.help_visible = true;
                return;
            }
            KeyCode::Char('q') if at_root => {
                app.should_quit = true;
                return;
            }
            _ => {}
        }
    }
    if key.code == KeyCode::Esc && at_root && current != ViewId::Login {
        leave_view(app, commands);
        return;
    }
    if current == ViewId::Dashboard && sidebar_key(app, &key, commands) {
        return;
    }

    let effect = view_mut(app, current).map_or(Effect::None, |view| view.handle_key(key));
    apply_effect(app, current, effect, commands);
}

/// 仪表盘上侧边栏接管上下移动与 enter
fn sidebar_key(app: &mut App, key: &KeyEvent, commands: &mut Vec<Command>) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.navigation.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.navigation.select_next(),
        KeyCode::Enter => match app.navigation.current_id() {
            Some(NavItemId::View(ViewId::Dashboard)) | None => {}
            Some(NavItemId::View(id)) => navigate(app, id, commands),
            Some(NavItemId::Logout) => {
                app.logout_dialog = Some(ConfirmDialog::new(
                    "Logout",
                    "Are you sure you want to log out?",
                ));
            }
        },
        _ => return false,
    }
    true
}

/// 滚轮交给当前视图；仪表盘移动侧栏
fn scroll(app: &mut App, down: bool) {
    if app.help_visible || app.logout_dialog.is_some() || app.logging_out {
        return;
    }
    if app.current == ViewId::Dashboard {
        if down {
            app.navigation.select_next();
        } else {
            app.navigation.select_previous();
        }
        return;
    }
    let current = app.current;
    if let Some(view) = view_mut(app, current) {
        view.scroll(down);
    }
}

/// esc 离开当前视图
fn leave_view(app: &mut App, commands: &mut Vec<Command>) {
    match app.current {
        ViewId::Login | ViewId::Dashboard => {}
        ViewId::CaDetail | ViewId::CertDetail => {
            let reload = app
                .views
                .as_ref()
                .and_then(|views| views.detail.as_ref())
                .is_some_and(|detail| detail.dirty);
            close_detail(app, reload, commands);
        }
        id if id.returns_to_previous() => {
            let back = app.prev_view;
            switch_to(app, back);
        }
        _ => navigate(app, ViewId::Dashboard, commands),
    }
}

// ============ 视图切换 ============

/// 切换到视图并调用其 `init`
fn navigate(app: &mut App, id: ViewId, commands: &mut Vec<Command>) {
    if app.views.is_none() || matches!(id, ViewId::Login | ViewId::CaDetail | ViewId::CertDetail) {
        return;
    }
    log::debug!("Navigate {:?} -> {:?}", app.current, id);
    switch_to(app, id);
    let effect = view_mut(app, id).map_or(Effect::None, ViewController::init);
    apply_effect(app, id, effect, commands);
}

/// 只切换，不重新加载
fn switch_to(app: &mut App, id: ViewId) {
    if app.current != id {
        app.prev_view = app.current;
        app.current = id;
    }
    app.navigation.select_view(id);
}

fn open_detail(app: &mut App, subject: Subject, commands: &mut Vec<Command>) {
    let (width, height) = app.content_size();
    let Some(views) = app.views.as_deref_mut() else {
        return;
    };
    let id = subject.view_id();
    log::debug!("Open detail {}", subject.uuid());
    views.detail = Some(CertDetailState::new(subject, width, height));
    switch_to(app, id);
    let effect = view_mut(app, id).map_or(Effect::None, ViewController::init);
    apply_effect(app, id, effect, commands);
}

fn close_detail(app: &mut App, reload: bool, commands: &mut Vec<Command>) {
    let Some(views) = app.views.as_deref_mut() else {
        return;
    };
    views.detail = None;
    let back = match app.prev_view {
        ViewId::Login | ViewId::CaDetail | ViewId::CertDetail => ViewId::Dashboard,
        other => other,
    };
    app.current = back;
    app.prev_view = ViewId::Dashboard;
    app.navigation.select_view(back);
    if reload {
        let effect = view_mut(app, back).map_or(Effect::None, ViewController::refresh);
        apply_effect(app, back, effect, commands);
    }
}

pub(crate) fn view_mut(app: &mut App, id: ViewId) -> Option<&mut dyn ViewController> {
    match id {
        ViewId::Login => Some(&mut app.login),
        other => main_view_mut(app.views.as_deref_mut()?, other),
    }
}

fn main_view_mut(views: &mut MainViews, id: ViewId) -> Option<&mut dyn ViewController> {
    let view: &mut dyn ViewController = match id {
        ViewId::Login => return None,
        ViewId::Dashboard => &mut views.dashboard,
        ViewId::CaList => &mut views.ca_list,
        ViewId::CertList => &mut views.cert_list,
        ViewId::CertRequest => &mut views.cert_request,
        ViewId::Profile => &mut views.profile,
        ViewId::Sessions => &mut views.sessions,
        ViewId::Tools => &mut views.tools,
        ViewId::Admin => &mut views.admin,
        ViewId::Superadmin => &mut views.superadmin,
        ViewId::Settings => &mut views.settings,
        ViewId::CaDetail | ViewId::CertDetail => views.detail.as_mut()?,
    };
    Some(view)
}

fn resize(app: &mut App, width: u16, height: u16) {
    app.width = width;
    app.height = height;
    app.login.resize(width, height);
    let (width, height) = app.content_size();
    if let Some(views) = app.views.as_deref_mut() {
        resize_views(views, width, height);
    }
}

fn resize_views(views: &mut MainViews, width: u16, height: u16) {
    views.dashboard.resize(width, height);
    views.ca_list.resize(width, height);
    views.cert_list.resize(width, height);
    views.cert_request.resize(width, height);
    views.profile.resize(width, height);
    views.sessions.resize(width, height);
    views.tools.resize(width, height);
    views.admin.resize(width, height);
    views.superadmin.resize(width, height);
    views.settings.resize(width, height);
    if let Some(detail) = views.detail.as_mut() {
        detail.resize(width, height);
    }
}

// ============ 会话 ============

fn job_finished(app: &mut App, ticket: Ticket, result: JobResult, commands: &mut Vec<Command>) {
    if ticket.epoch != app.epoch {
        log::debug!(
            "Dropping result for {:?} from epoch {} (now {})",
            ticket.target,
            ticket.epoch,
            app.epoch
        );
        return;
    }
    match ticket.target {
        Target::AutoLogin => match result {
            Ok(JobOutput::Profile(profile)) => on_login(app, profile, commands),
            Ok(other) => log::warn!("Unexpected auto-login output: {other:?}"),
            Err(TaskError::SessionExpired) => {
                log::info!("Saved session is no longer valid");
                clear_session(app);
            }
            Err(err) => log::warn!("Auto-login failed: {err}"),
        },
        Target::Logout => {
            if let Err(err) = result {
                log::warn!("Server logout failed: {err}");
            }
            reset_to_login(app);
            show_toast(app, ToastKind::Info, "Logged out".to_string(), commands);
        }
        Target::View(id) => {
            let effect = match view_mut(app, id) {
                Some(view) => view.handle_result(ticket.seq, result),
                None => {
                    log::debug!("Dropping result for closed view {id:?}");
                    Effect::None
                }
            };
            apply_effect(app, id, effect, commands);
        }
    }
}

fn on_login(app: &mut App, profile: UserProfile, commands: &mut Vec<Command>) {
    log::info!(
        "Logged in as {} ({})",
        profile.username,
        role_name(profile.role)
    );
    app.epoch += 1;
    let server_url = app.api.base_url();
    let mut views = MainViews::new(&profile, &server_url, app.config_store.path().to_path_buf());
    let (width, height) = app.content_size();
    resize_views(&mut views, width, height);

    app.navigation = NavigationState::for_role(profile.role);
    app.profile = Some(profile);
    app.views = Some(Box::new(views));
    app.login = LoginState::new(server_url);
    app.current = ViewId::Dashboard;
    app.prev_view = ViewId::Dashboard;

    let effect = app
        .views
        .as_deref_mut()
        .map_or(Effect::None, |views| views.dashboard.init());
    apply_effect(app, ViewId::Dashboard, effect, commands);
}

fn start_logout(app: &mut App, commands: &mut Vec<Command>) {
    log::info!("Logging out");
    app.logging_out = true;
    commands.push(Command::Run {
        ticket: Ticket {
            epoch: app.epoch,
            target: Target::Logout,
            seq: 0,
        },
        job: Job::Logout,
    });
}

/// 清除网关与配置中的会话并持久化
fn clear_session(app: &mut App) {
    app.api.set_session(None);
    app.config.session.clear();
    if let Err(e) = app.config_store.save(&app.config) {
        log::warn!("Failed to persist cleared session: {e:#}");
    }
}

/// 丢弃全部登录后状态并回到登录页
pub fn reset_to_login(app: &mut App) {
    clear_session(app);
    app.epoch += 1;
    app.views = None;
    app.profile = None;
    app.logout_dialog = None;
    app.logging_out = false;
    app.help_visible = false;
    app.navigation = NavigationState::default();
    app.login = LoginState::new(app.api.base_url());
    app.login.resize(app.width, app.height);
    app.current = ViewId::Login;
    app.prev_view = ViewId::Login;
}

fn change_server(app: &mut App, url: String, commands: &mut Vec<Command>) {
    log::info!("Server URL changed to {url}");
    app.api.set_base_url(&url);
    app.config.server_url = app.api.base_url();
    let saved = app.config_store.save(&app.config);
    app.login.server_url = app.config.server_url.clone();
    if let Some(views) = app.views.as_deref_mut() {
        views.settings.server_url = app.config.server_url.clone();
    }
    match saved {
        Ok(()) => show_toast(app, ToastKind::Success, "Server URL saved".to_string(), commands),
        Err(e) => {
            log::warn!("Failed to save config: {e:#}");
            show_toast(app, ToastKind::Error, format!("Failed to save config: {e}"), commands);
        }
    }
}

fn show_toast(app: &mut App, kind: ToastKind, text: String, commands: &mut Vec<Command>) {
    let id = app.toast.show(kind, text);
    commands.push(Command::Timer {
        delay: TOAST_DURATION,
        msg: AppMessage::ClearToast { id },
    });
}

// ============ Effect ============

fn apply_effect(app: &mut App, source: ViewId, effect: Effect, commands: &mut Vec<Command>) {
    match effect {
        Effect::None => {}
        Effect::Spawn { seq, job } => {
            log::debug!("Spawn {} for {source:?} (seq {seq})", job.name());
            commands.push(Command::Run {
                ticket: Ticket {
                    epoch: app.epoch,
                    target: Target::View(source),
                    seq,
                },
                job,
            });
        }
        Effect::Batch(effects) => {
            for effect in effects {
                apply_effect(app, source, effect, commands);
            }
        }
        Effect::SessionExpired => {
            if app.views.is_none() {
                return;
            }
            log::warn!("Session expired (reported by {source:?})");
            reset_to_login(app);
            app.login.error = Some("Session expired, please log in again".to_string());
        }
        Effect::LoggedOut => {
            log::info!("Session closed by {source:?}");
            reset_to_login(app);
        }
        Effect::LoginSucceeded(profile) => on_login(app, profile, commands),
        Effect::ProfileUpdated(profile) => {
            if let Some(views) = app.views.as_deref_mut() {
                views.dashboard.user = profile.clone();
            }
            app.profile = Some(profile);
        }
        Effect::Toast(kind, text) => show_toast(app, kind, text, commands),
        Effect::OpenDetail(subject) => open_detail(app, subject, commands),
        Effect::CloseDetail { reload } => close_detail(app, reload, commands),
        Effect::Navigate(id) => navigate(app, id, commands),
        Effect::ServerUrlChanged(url) => change_server(app, url, commands),
    }
}

/// 任务输出与视图期待的不符
pub(crate) fn unexpected(slot: &mut Option<String>) -> Effect {
    *slot = Some("Unexpected response from server".to_string());
    Effect::None
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use certvault_api::{CaCert, CertVaultClient, Page};
    use tempfile::TempDir;

    use super::*;
    use crate::backend::{AppConfig, ConfigService, JsonConfigService};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn ch(c: char) -> KeyEvent {
        key(KeyCode::Char(c))
    }

    fn app_in(dir: &TempDir) -> App {
        let api = Arc::new(CertVaultClient::new("http://127.0.0.1:9").unwrap());
        let store = JsonConfigService::at(dir.path().join("config.json"));
        let mut app = App::new(api, AppConfig::default(), Box::new(store));
        update(&mut app, AppMessage::Resize(120, 40));
        app
    }

    fn user(role: u8) -> UserProfile {
        UserProfile {
            username: "alice".to_string(),
            role,
            ..UserProfile::default()
        }
    }

    fn logged_in(dir: &TempDir, role: u8) -> App {
        let mut app = app_in(dir);
        let mut commands = Vec::new();
        on_login(&mut app, user(role), &mut commands);
        app
    }

    /// 最后一个任务
    fn last_run(commands: &[Command]) -> Option<(Ticket, &Job)> {
        commands.iter().rev().find_map(|c| match c {
            Command::Run { ticket, job } => Some((*ticket, job)),
            Command::Timer { .. } => None,
        })
    }

    #[test]
    fn login_builds_views_and_loads_dashboard() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        let mut commands = Vec::new();
        on_login(&mut app, user(1), &mut commands);

        assert_eq!(app.current, ViewId::Dashboard);
        assert_eq!(app.epoch, 1);
        let (ticket, job) = last_run(&commands).unwrap();
        assert_eq!(ticket.target, Target::View(ViewId::Dashboard));
        assert_eq!(ticket.epoch, 1);
        assert_eq!(job.name(), "dashboard_stats");
    }

    #[test]
    fn session_expiry_resets_to_login_and_clears_persisted_session() {
        let dir = TempDir::new().unwrap();
        let mut app = logged_in(&dir, 3);
        app.api.set_session(Some("tok".to_string()));
        app.config.session = "tok".to_string();

        let commands = {
            app.navigation.select_view(ViewId::Admin);
            update(&mut app, AppMessage::Key(key(KeyCode::Enter)))
        };
        assert_eq!(app.current, ViewId::Admin);
        assert!(commands.is_empty());

        // 进入用户列表
        let commands = update(&mut app, AppMessage::Key(key(KeyCode::Enter)));
        let (ticket, job) = last_run(&commands).unwrap();
        assert_eq!(job.name(), "list_users");

        let epoch = app.epoch;
        update(
            &mut app,
            AppMessage::JobFinished {
                ticket,
                result: Err(TaskError::SessionExpired),
            },
        );
        assert_eq!(app.current, ViewId::Login);
        assert!(app.views.is_none());
        assert_eq!(app.epoch, epoch + 1);
        assert_eq!(app.api.session(), None);

        let saved = JsonConfigService::at(dir.path().join("config.json"))
            .load()
            .unwrap();
        assert!(saved.session.is_empty());
    }

    #[test]
    fn results_from_old_epoch_are_dropped() {
        let dir = TempDir::new().unwrap();
        let mut app = logged_in(&dir, 1);
        let stale = Ticket {
            epoch: app.epoch - 1,
            target: Target::View(ViewId::Dashboard),
            seq: 1,
        };
        update(
            &mut app,
            AppMessage::JobFinished {
                ticket: stale,
                result: Err(TaskError::SessionExpired),
            },
        );
        assert_eq!(app.current, ViewId::Dashboard);
        assert!(app.views.is_some());
    }

    #[test]
    fn stale_toast_clear_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        let mut commands = Vec::new();
        show_toast(&mut app, ToastKind::Info, "first".into(), &mut commands);
        let first = app.toast.current().unwrap().id;
        show_toast(&mut app, ToastKind::Info, "second".into(), &mut commands);
        assert_eq!(commands.len(), 2);

        update(&mut app, AppMessage::ClearToast { id: first });
        assert_eq!(app.toast.current().map(|t| t.text.as_str()), Some("second"));
    }

    #[test]
    fn q_quits_only_at_root_and_not_editing() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        // 登录页焦点在用户名输入框
        update(&mut app, AppMessage::Key(ch('q')));
        assert!(!app.should_quit);
        assert_eq!(app.login.username.value(), "q");

        let mut app = logged_in(&dir, 1);
        update(&mut app, AppMessage::Key(ch('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn help_toggles_and_any_key_closes() {
        let dir = TempDir::new().unwrap();
        let mut app = logged_in(&dir, 1);
        update(&mut app, AppMessage::Key(ch('?')));
        assert!(app.help_visible);
        update(&mut app, AppMessage::Key(ch('q')));
        assert!(!app.help_visible);
        assert!(!app.should_quit);
    }

    #[test]
    fn wheel_moves_list_cursor_but_not_under_help() {
        let dir = TempDir::new().unwrap();
        let mut app = logged_in(&dir, 1);
        let mut commands = Vec::new();
        navigate(&mut app, ViewId::CaList, &mut commands);
        let (ticket, _) = last_run(&commands).unwrap();
        let cas = (0..3)
            .map(|i| CaCert {
                uuid: format!("ca-{i}"),
                ..CaCert::default()
            })
            .collect();
        update(
            &mut app,
            AppMessage::JobFinished {
                ticket,
                result: Ok(JobOutput::CaPage(Page { total: 3, list: cas })),
            },
        );
        let cursor = |app: &App| app.views.as_ref().unwrap().ca_list.list.table.cursor();

        update(&mut app, AppMessage::ScrollDown);
        update(&mut app, AppMessage::ScrollDown);
        assert_eq!(cursor(&app), 2);
        update(&mut app, AppMessage::ScrollUp);
        assert_eq!(cursor(&app), 1);

        update(&mut app, AppMessage::Key(ch('?')));
        update(&mut app, AppMessage::ScrollDown);
        assert_eq!(cursor(&app), 1);
        assert!(app.help_visible);
    }

    #[test]
    fn esc_leaves_list_for_dashboard() {
        let dir = TempDir::new().unwrap();
        let mut app = logged_in(&dir, 1);
        let mut commands = Vec::new();
        navigate(&mut app, ViewId::CertList, &mut commands);
        assert_eq!(app.current, ViewId::CertList);
        // 加载中不影响 esc
        update(&mut app, AppMessage::Key(key(KeyCode::Esc)));
        assert_eq!(app.current, ViewId::Dashboard);
    }

    #[test]
    fn detail_returns_to_previous_view_and_reloads_when_dirty() {
        let dir = TempDir::new().unwrap();
        let mut app = logged_in(&dir, 1);
        let mut commands = Vec::new();
        navigate(&mut app, ViewId::CaList, &mut commands);
        let (ticket, _) = last_run(&commands).unwrap();
        update(
            &mut app,
            AppMessage::JobFinished {
                ticket,
                result: Ok(JobOutput::CaPage(Page {
                    total: 1,
                    list: vec![CaCert {
                        uuid: "ca-1".to_string(),
                        ..CaCert::default()
                    }],
                })),
            },
        );
        update(&mut app, AppMessage::Key(key(KeyCode::Enter)));
        assert_eq!(app.current, ViewId::CaDetail);
        assert_eq!(app.prev_view, ViewId::CaList);

        app.views.as_mut().unwrap().detail.as_mut().unwrap().dirty = true;
        let commands = update(&mut app, AppMessage::Key(key(KeyCode::Esc)));
        assert_eq!(app.current, ViewId::CaList);
        assert!(app.views.as_ref().unwrap().detail.is_none());
        let (_, job) = last_run(&commands).unwrap();
        assert_eq!(job.name(), "list_user_cas");
    }

    #[test]
    fn logout_waits_for_server_then_resets() {
        let dir = TempDir::new().unwrap();
        let mut app = logged_in(&dir, 1);
        let last = app.navigation.items.len() - 1;
        app.navigation.selected = last;
        update(&mut app, AppMessage::Key(key(KeyCode::Enter)));
        assert!(app.logout_dialog.is_some());

        let commands = update(&mut app, AppMessage::Key(ch('y')));
        let (ticket, job) = last_run(&commands).unwrap();
        assert_eq!(ticket.target, Target::Logout);
        assert_eq!(job.name(), "logout");
        assert!(app.logging_out);
        assert_eq!(app.current, ViewId::Dashboard);

        // 等待期间按键被忽略
        update(&mut app, AppMessage::Key(ch('q')));
        assert!(!app.should_quit);

        update(
            &mut app,
            AppMessage::JobFinished {
                ticket,
                result: Ok(JobOutput::Done),
            },
        );
        assert_eq!(app.current, ViewId::Login);
        assert!(!app.logging_out);
        let toast = app.toast.current().unwrap();
        assert_eq!((toast.kind, toast.text.as_str()), (ToastKind::Info, "Logged out"));
    }

    #[test]
    fn resize_reaches_content_views() {
        let dir = TempDir::new().unwrap();
        let mut app = logged_in(&dir, 2);
        update(&mut app, AppMessage::Resize(100, 30));
        let views = app.views.as_ref().unwrap();
        assert_eq!(views.admin.width, 78);
        assert_eq!(views.admin.height, 28);
    }

    #[test]
    fn server_url_change_is_saved() {
        let dir = TempDir::new().unwrap();
        let mut app = logged_in(&dir, 1);
        let mut commands = Vec::new();
        change_server(&mut app, "https://vault.example.com/".to_string(), &mut commands);
        assert_eq!(app.api.base_url(), "https://vault.example.com");
        assert_eq!(app.login.server_url, "https://vault.example.com");
        let saved = JsonConfigService::at(dir.path().join("config.json"))
            .load()
            .unwrap();
        assert_eq!(saved.server_url, "https://vault.example.com");
        assert!(app.toast.current().is_some());
    }
}
