//! CA 列表与 SSL 证书列表

use certvault_api::{CaCert, SslCert};
use ratatui::{Frame, layout::Constraint, layout::Rect, text::Span};

use crate::model::state::{CaListState, CertListState};
use crate::util::datetime::{days_left, format_date};
use crate::view::components::widgets::render_paged;
use crate::view::theme::Styles;

pub const CA_HEADER: [&str; 5] = ["UUID", "Type", "Comment", "Expires", "Status"];
pub const CA_WIDTHS: [Constraint; 5] = [
    Constraint::Length(10),
    Constraint::Length(8),
    Constraint::Min(12),
    Constraint::Length(16),
    Constraint::Length(9),
];

const SSL_HEADER: [&str; 4] = ["UUID", "Issuer CA", "Comment", "Expires"];
const SSL_WIDTHS: [Constraint; 4] = [
    Constraint::Length(10),
    Constraint::Length(10),
    Constraint::Min(12),
    Constraint::Length(16),
];

pub fn render_cas(state: &CaListState, frame: &mut Frame, area: Rect) {
    render_paged(frame, area, &state.list, &state.spinner, &CA_HEADER, &CA_WIDTHS, ca_cells);
}

pub fn render_certs(state: &CertListState, frame: &mut Frame, area: Rect) {
    render_paged(
        frame,
        area,
        &state.list,
        &state.spinner,
        &SSL_HEADER,
        &SSL_WIDTHS,
        ssl_cells,
    );
}

/// UUID 只显示前 8 位
pub fn short_uuid(uuid: &str) -> String {
    uuid.chars().take(8).collect()
}

/// 到期日 + 剩余天数，按剩余天数着色
pub fn expiry_span(not_after: &str) -> Span<'static> {
    let days = days_left(not_after);
    let text = match days {
        Some(d) if d < 0 => format!("{} (exp)", format_date(not_after)),
        Some(d) => format!("{} ({d}d)", format_date(not_after)),
        None => format_date(not_after),
    };
    Span::styled(text, Styles::expiry(days))
}

pub fn ca_cells(ca: &CaCert) -> Vec<Span<'static>> {
    let status = if ca.available {
        Span::styled("enabled", Styles::success())
    } else {
        Span::styled("disabled", Styles::muted())
    };
    vec![
        Span::raw(short_uuid(&ca.uuid)),
        Span::raw(ca.kind().label()),
        Span::raw(ca.comment.clone()),
        expiry_span(&ca.not_after),
        status,
    ]
}

fn ssl_cells(cert: &SslCert) -> Vec<Span<'static>> {
    vec![
        Span::raw(short_uuid(&cert.uuid)),
        Span::raw(short_uuid(&cert.ca_uuid)),
        Span::raw(cert.comment.clone()),
        expiry_span(&cert.not_after),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_uuid_truncates() {
        assert_eq!(short_uuid("0123456789abcdef"), "01234567");
        assert_eq!(short_uuid("abc"), "abc");
    }

    #[test]
    fn expired_certificate_is_marked() {
        let span = expiry_span("2001-01-01T00:00:00");
        assert!(span.content.ends_with("(exp)"));
        assert_eq!(span.style, Styles::expiry(Some(-1)));
    }
}
