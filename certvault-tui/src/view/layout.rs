//! 主布局渲染

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::model::{App, FOOTER_HEIGHT, MainViews, SIDEBAR_WIDTH, STATUS_HEIGHT, ViewId};

use super::components::{self, widgets::page_block};
use super::pages;

/// 渲染主布局
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    // 登录页独占整个屏幕
    let Some(views) = app.views.as_deref().filter(|_| app.current != ViewId::Login) else {
        pages::login::render(&app.login, frame, size);
        components::modal::render(app, frame);
        return;
    };

    // 三层布局：状态栏 + 主内容区 + 按键提示
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(size);

    components::statusbar::render(app, frame, main_layout[0]);

    // 左右分栏：固定宽度的侧边栏 + 内容区
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
        .split(main_layout[1]);

    components::navigation::render(app, frame, columns[0]);
    render_page_content(app, views, frame, columns[1]);

    components::statusbar::render_hints(app, frame, main_layout[2]);

    // 浮层在最上层
    components::modal::render(app, frame);
}

/// 根据当前视图渲染内容区；外框由这里统一绘制
fn render_page_content(app: &App, views: &MainViews, frame: &mut Frame, area: Rect) {
    let block = page_block(app.current.title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.current {
        ViewId::Login => {}
        ViewId::Dashboard => pages::dashboard::render(&views.dashboard, frame, inner),
        ViewId::CaList => pages::cert_list::render_cas(&views.ca_list, frame, inner),
        ViewId::CertList => pages::cert_list::render_certs(&views.cert_list, frame, inner),
        ViewId::CaDetail | ViewId::CertDetail => {
            if let Some(detail) = views.detail.as_ref() {
                pages::cert_detail::render(detail, frame, inner);
            }
        }
        ViewId::CertRequest => pages::cert_request::render(&views.cert_request, frame, inner),
        ViewId::Profile => pages::profile::render(&views.profile, frame, inner),
        ViewId::Sessions => pages::sessions::render(&views.sessions, frame, inner),
        ViewId::Tools => pages::tools::render(&views.tools, frame, inner),
        ViewId::Admin => pages::admin::render(&views.admin, frame, inner),
        ViewId::Superadmin => pages::superadmin::render(&views.superadmin, frame, inner),
        ViewId::Settings => pages::settings::render(&views.settings, frame, inner),
    }
}
