//! 当前用户的登录记录

use certvault_api::LoginRecord;
use ratatui::{Frame, layout::Constraint, layout::Rect, text::Span};

use crate::model::state::SessionsState;
use crate::util::datetime::format_datetime;
use crate::view::components::modal::render_confirm;
use crate::view::components::widgets::render_paged;
use crate::view::theme::Styles;

const HEADER: [&str; 5] = ["Login Time", "IP", "Location", "Client", "Status"];
const WIDTHS: [Constraint; 5] = [
    Constraint::Length(17),
    Constraint::Length(16),
    Constraint::Min(10),
    Constraint::Min(12),
    Constraint::Length(8),
];

pub fn render(state: &SessionsState, frame: &mut Frame, area: Rect) {
    render_paged(frame, area, &state.list, &state.spinner, &HEADER, &WIDTHS, record_cells);
    if let Some((dialog, _)) = state.confirm.as_ref() {
        render_confirm(frame, dialog);
    }
}

fn record_cells(record: &LoginRecord) -> Vec<Span<'static>> {
    let location = [record.region.as_str(), record.city.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let client = [record.browser.as_str(), record.os.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" / ");
    let status = if record.is_online {
        Span::styled("online", Styles::success())
    } else {
        Span::styled("offline", Styles::muted())
    };
    vec![
        Span::raw(format_datetime(&record.login_time)),
        Span::raw(record.ip_address.clone()),
        Span::raw(location),
        Span::raw(client),
        status,
    ]
}
