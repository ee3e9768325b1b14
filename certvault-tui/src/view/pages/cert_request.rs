//! SSL 证书申请表单

use ratatui::{Frame, layout::Rect, text::Line, widgets::Paragraph};

use crate::model::state::CertRequestState;
use crate::view::components::widgets::{render_form, status_line};
use crate::view::theme::Styles;

pub fn render(state: &CertRequestState, frame: &mut Frame, area: Rect) {
    let form_height = area.height.saturating_sub(1);
    render_form(frame, Rect { height: form_height, ..area }, &state.form);
    let status = status_line(&state.spinner, state.error.as_deref())
        .unwrap_or_else(|| Line::styled("* required · Ctrl+S to submit", Styles::muted()));
    frame.render_widget(
        Paragraph::new(status),
        Rect {
            y: area.y + form_height,
            height: area.height - form_height,
            ..area
        },
    );
}
