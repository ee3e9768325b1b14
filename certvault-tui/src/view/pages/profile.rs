//! 个人资料：修改显示名、邮箱与密码

use certvault_api::role_name;
use ratatui::{Frame, layout::Rect, text::Line, widgets::Paragraph};

use crate::model::state::ProfileState;
use crate::view::components::widgets::{render_form, rows, status_line};
use crate::view::theme::Styles;

pub fn render(state: &ProfileState, frame: &mut Frame, area: Rect) {
    let form_height = area.height.saturating_sub(1);
    let parts = rows(area, &[form_height, 1]);
    render_form(frame, parts[0], &state.form);

    let status = status_line(&state.spinner, state.error.as_deref()).unwrap_or_else(|| {
        Line::styled(
            format!(
                "{} · {} · Ctrl+S to save",
                state.user.username,
                role_name(state.user.role)
            ),
            Styles::muted(),
        )
    });
    frame.render_widget(Paragraph::new(status), parts[1]);
}
