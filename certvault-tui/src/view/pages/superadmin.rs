//! 超级管理员：全部会话、用户管理
//!
//! 布局与管理员视图相同：标题行 + 正文 + 状态行。

use certvault_api::AllSession;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::model::state::{SuperMode, SuperadminState, UserFormKind};
use crate::util::datetime::format_datetime;
use crate::view::components::modal::render_confirm;
use crate::view::components::widgets::{render_form, render_menu, render_table, rows, status_line};
use crate::view::pages::cert_detail::{USER_HEADER, USER_WIDTHS, user_cells};
use crate::view::theme::Styles;

const SESSION_HEADER: [&str; 4] = ["Username", "IP", "Login Time", "Client"];
const SESSION_WIDTHS: [Constraint; 4] = [
    Constraint::Length(16),
    Constraint::Length(16),
    Constraint::Length(17),
    Constraint::Min(12),
];

pub fn render(state: &SuperadminState, frame: &mut Frame, area: Rect) {
    let parts = rows(area, &[1, state.body_height(), 1]);

    let title = match state.modes.last() {
        None => "Superadmin".to_string(),
        Some(SuperMode::Sessions { user: None, .. }) => "All Sessions".to_string(),
        Some(SuperMode::Sessions { user: Some(u), .. }) => format!("Sessions of {u}"),
        Some(SuperMode::Users(_)) => "User Management".to_string(),
        Some(SuperMode::UserForm { kind: UserFormKind::Create, .. }) => "Create User".to_string(),
        Some(SuperMode::UserForm { kind: UserFormKind::Edit(u), .. }) => format!("Edit {u}"),
        Some(SuperMode::RoleForm { username, .. }) => format!("Role of {username}"),
    };
    frame.render_widget(Paragraph::new(Line::styled(title, Styles::title())), parts[0]);

    let status = match state.modes.last() {
        None => {
            render_menu(frame, parts[1], &state.menu);
            status_line(&state.spinner, None)
        }
        Some(SuperMode::Sessions { list, .. }) => {
            render_table(
                frame,
                parts[1],
                &list.table,
                &SESSION_HEADER,
                &SESSION_WIDTHS,
                session_cells,
            );
            Some(
                status_line(&state.spinner, list.error.as_deref())
                    .unwrap_or_else(|| Line::styled(list.pager.label(), Styles::muted())),
            )
        }
        Some(SuperMode::Users(list)) => {
            render_table(frame, parts[1], &list.table, &USER_HEADER, &USER_WIDTHS, user_cells);
            Some(
                status_line(&state.spinner, list.error.as_deref())
                    .unwrap_or_else(|| Line::styled(list.pager.label(), Styles::muted())),
            )
        }
        Some(SuperMode::UserForm { form, .. } | SuperMode::RoleForm { form, .. }) => {
            render_form(frame, parts[1], form);
            status_line(&state.spinner, state.error.as_deref())
        }
    };
    if let Some(status) = status {
        frame.render_widget(Paragraph::new(status), parts[2]);
    }

    if let Some((dialog, _)) = state.confirm.as_ref() {
        render_confirm(frame, dialog);
    }
}

fn session_cells(session: &AllSession) -> Vec<Span<'static>> {
    let user = if session.is_online {
        Span::styled(session.username.clone(), Styles::success())
    } else {
        Span::raw(session.username.clone())
    };
    vec![
        user,
        Span::raw(session.ip.clone()),
        Span::raw(format_datetime(&session.login_at)),
        Span::raw(session.user_agent.clone()),
    ]
}
