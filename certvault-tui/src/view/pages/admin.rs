//! 管理员：用户列表、CA 管理、申请 / 导入 CA
//!
//! 内容区：标题行 + 正文（`AdminState::body_height`）+ 状态行。

use ratatui::{Frame, layout::Rect, text::Line, widgets::Paragraph};

use crate::model::state::{AdminMode, AdminState, PagedList};
use crate::view::components::widgets::{render_form, render_menu, render_table, rows, status_line};
use crate::view::pages::cert_detail::{USER_HEADER, USER_WIDTHS, user_cells};
use crate::view::pages::cert_list::{CA_HEADER, CA_WIDTHS, ca_cells};
use crate::view::theme::Styles;

pub fn render(state: &AdminState, frame: &mut Frame, area: Rect) {
    let parts = rows(area, &[1, state.body_height(), 1]);

    let title = match &state.mode {
        AdminMode::Menu => "Administration",
        AdminMode::Users(_) => "Users",
        AdminMode::Cas(_) => "CA Management",
        AdminMode::RequestCa(_) => "Request CA",
        AdminMode::ImportCa(_) => "Import CA",
    };
    frame.render_widget(Paragraph::new(Line::styled(title, Styles::title())), parts[0]);

    let status = match &state.mode {
        AdminMode::Menu => {
            render_menu(frame, parts[1], &state.menu);
            status_line(&state.spinner, None)
        }
        AdminMode::Users(list) => {
            render_table(frame, parts[1], &list.table, &USER_HEADER, &USER_WIDTHS, user_cells);
            Some(list_status(state, list))
        }
        AdminMode::Cas(list) => {
            render_table(frame, parts[1], &list.table, &CA_HEADER, &CA_WIDTHS, ca_cells);
            Some(list_status(state, list))
        }
        AdminMode::RequestCa(request) => {
            render_form(frame, parts[1], &request.form);
            status_line(&state.spinner, state.error.as_deref())
        }
        AdminMode::ImportCa(form) => {
            render_form(frame, parts[1], form);
            status_line(&state.spinner, state.error.as_deref())
        }
    };
    if let Some(status) = status {
        frame.render_widget(Paragraph::new(status), parts[2]);
    }
}

fn list_status<T>(state: &AdminState, list: &PagedList<T>) -> Line<'static> {
    status_line(&state.spinner, list.error.as_deref())
        .unwrap_or_else(|| Line::styled(list.pager.label(), Styles::muted()))
}
