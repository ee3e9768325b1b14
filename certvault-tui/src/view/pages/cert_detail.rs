//! 证书详情
//!
//! 内容区自上而下：证书摘要行、子模式标题、空行、正文、状态行。
//! 正文高度即 `CertDetailState::text_height`。

use certvault_api::{CaCert, SslCert, UserProfile, role_name};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::model::state::report::{NOT_AFTER_LABEL, SECTIONS};
use crate::model::state::{CertDetailState, ChainAction, ExportForm, KeyAction, Mode, Subject};
use crate::util::datetime::{days_left, format_datetime};
use crate::view::components::modal::render_confirm;
use crate::view::components::widgets::{
    labeled_input, path_lines, render_menu, render_table, render_text_view, rows, status_line,
};
use crate::view::pages::cert_list::{expiry_span, short_uuid};
use crate::view::theme::Styles;

pub const USER_HEADER: [&str; 3] = ["Username", "Display Name", "Role"];
pub const USER_WIDTHS: [Constraint; 3] = [
    Constraint::Length(16),
    Constraint::Min(12),
    Constraint::Length(12),
];

pub fn render(state: &CertDetailState, frame: &mut Frame, area: Rect) {
    let parts = rows(area, &[1, 1, 1, state.text_height(), 1]);

    frame.render_widget(Paragraph::new(subject_line(&state.subject)), parts[0]);
    frame.render_widget(
        Paragraph::new(Line::styled(mode_title(state), Styles::title())),
        parts[1],
    );

    let body = parts[3];
    match state.mode() {
        None | Some(Mode::ConfirmDelete(_)) => render_summary(&state.subject, frame, body),
        Some(Mode::Analysis(view)) => render_text_view(frame, body, view, report_style),
        Some(Mode::ChainSelect { menu, error, .. }) => {
            let [menu_area, error_area] = split_last(body);
            render_menu(frame, menu_area, menu);
            render_error(frame, error_area, error.as_deref());
        }
        Some(Mode::ViewCert { view, .. } | Mode::ViewPrivKey { view, .. }) => {
            render_text_view(frame, body, view, |_| Styles::text());
        }
        Some(Mode::ExportPath(form) | Mode::ExportPriv(form)) => render_export(frame, body, form),
        Some(Mode::PrivKeyPass { input, error, .. }) => {
            let mut lines = vec![
                Line::styled(
                    "Enter the password that protects the private key.",
                    Styles::muted(),
                ),
                Line::from(""),
                labeled_input("Password", input, true),
            ];
            lines.extend(error_line(error.as_deref()));
            frame.render_widget(Paragraph::new(lines), body);
        }
        Some(Mode::BindSelect(list) | Mode::BoundList(list)) => {
            render_table(frame, body, &list.table, &USER_HEADER, &USER_WIDTHS, user_cells);
        }
        Some(Mode::EditComment { input, error }) => {
            let mut lines = vec![labeled_input("Comment", input, true)];
            lines.extend(error_line(error.as_deref()));
            frame.render_widget(Paragraph::new(lines), body);
        }
        Some(Mode::Renew { input, error }) => {
            let mut lines = vec![
                Line::styled(
                    "A new certificate with a fresh validity period will be issued.",
                    Styles::muted(),
                ),
                Line::from(""),
                labeled_input("Days", input, true),
            ];
            lines.extend(error_line(error.as_deref()));
            frame.render_widget(Paragraph::new(lines), body);
        }
    }

    frame.render_widget(Paragraph::new(detail_status(state)), parts[4]);

    if let Some(Mode::ConfirmDelete(dialog)) = state.mode() {
        render_confirm(frame, dialog);
    }
}

fn subject_line(subject: &Subject) -> Line<'static> {
    let (kind, comment) = match subject {
        Subject::UserCa(ca) | Subject::AdminCa(ca) => (ca.kind().label(), ca.comment.as_str()),
        Subject::Ssl(cert) => ("SSL", cert.comment.as_str()),
    };
    let comment = if comment.is_empty() { "(no comment)" } else { comment };
    Line::from(vec![
        Span::styled(format!("{kind} "), Styles::focused()),
        Span::styled(short_uuid(subject.uuid()), Styles::muted()),
        Span::raw("  "),
        Span::styled(comment.to_string(), Styles::text()),
        Span::raw("  "),
        expiry_span(subject.not_after()),
    ])
}

fn mode_title(state: &CertDetailState) -> String {
    match state.mode() {
        None | Some(Mode::ConfirmDelete(_)) => "Overview".to_string(),
        Some(Mode::Analysis(_)) => "Analysis".to_string(),
        Some(Mode::ChainSelect { action, .. }) => match action {
            ChainAction::View => "View certificate: choose chain".to_string(),
            ChainAction::Export => "Export certificate: choose chain".to_string(),
        },
        Some(Mode::ViewCert { .. }) => "Certificate (PEM)".to_string(),
        Some(Mode::ExportPath(_)) => "Export certificate".to_string(),
        Some(Mode::PrivKeyPass { action, .. }) => match action {
            KeyAction::View => "View private key".to_string(),
            KeyAction::Export => "Export private key".to_string(),
        },
        Some(Mode::ViewPrivKey { .. }) => "Private key (PEM)".to_string(),
        Some(Mode::ExportPriv(_)) => "Export private key".to_string(),
        Some(Mode::BindSelect(list)) => format!("Bind a user · {}", list.pager.label()),
        Some(Mode::BoundList(list)) => format!("Bound users · {}", list.pager.label()),
        Some(Mode::EditComment { .. }) => "Edit comment".to_string(),
        Some(Mode::Renew { .. }) => "Renew".to_string(),
    }
}

/// 等待、列表错误，或 Normal 模式下的错误
fn detail_status(state: &CertDetailState) -> Line<'static> {
    let list_error = match state.mode() {
        Some(Mode::BindSelect(list) | Mode::BoundList(list)) => list.error.as_deref(),
        _ => None,
    };
    let error = list_error.or(if state.modes.is_empty() {
        state.error.as_deref()
    } else {
        None
    });
    status_line(&state.spinner, error).unwrap_or_default()
}

fn render_summary(subject: &Subject, frame: &mut Frame, area: Rect) {
    let lines = match subject {
        Subject::UserCa(ca) | Subject::AdminCa(ca) => ca_summary(ca),
        Subject::Ssl(cert) => ssl_summary(cert),
    };
    frame.render_widget(Paragraph::new(lines), area);
}

fn field(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<14}"), Styles::muted()),
        Span::styled(value.into(), Styles::text()),
    ])
}

fn validity(not_before: &str, not_after: &str) -> Vec<Line<'static>> {
    let days = days_left(not_after);
    let left = match days {
        Some(d) if d < 0 => format!("expired {} days ago", -d),
        Some(d) => format!("{d} days left"),
        None => "unknown".to_string(),
    };
    vec![
        field("Not Before", format_datetime(not_before)),
        Line::from(vec![
            Span::styled(format!("{:<14}", "Not After"), Styles::muted()),
            Span::styled(format_datetime(not_after), Styles::expiry(days)),
            Span::styled(format!("  ({left})"), Styles::expiry(days)),
        ]),
    ]
}

fn ca_summary(ca: &CaCert) -> Vec<Line<'static>> {
    let mut lines = vec![
        field("UUID", ca.uuid.clone()),
        field("Type", ca.kind().label()),
        field("Owner", ca.owner.clone()),
        field(
            "Parent CA",
            ca.parent_ca.clone().filter(|p| !p.is_empty()).unwrap_or_else(|| "-".to_string()),
        ),
        field("Sub CA", if ca.allow_sub_ca { "allowed" } else { "not allowed" }),
        field("Available", if ca.available { "yes" } else { "no" }),
        field("Comment", ca.comment.clone()),
    ];
    lines.extend(validity(&ca.not_before, &ca.not_after));
    lines
}

fn ssl_summary(cert: &SslCert) -> Vec<Line<'static>> {
    let mut lines = vec![
        field("UUID", cert.uuid.clone()),
        field("Issuer CA", cert.ca_uuid.clone()),
        field("Owner", cert.owner.clone()),
        field("Comment", cert.comment.clone()),
    ];
    lines.extend(validity(&cert.not_before, &cert.not_after));
    lines.push(field("Created", format_datetime(&cert.created_at)));
    lines.push(field("Modified", format_datetime(&cert.modified_at)));
    lines
}

/// 报告着色：小节标题加粗，到期行按剩余天数
fn report_style(line: &str) -> Style {
    let trimmed = line.trim_start();
    if SECTIONS.contains(&trimmed) {
        return Styles::title().add_modifier(Modifier::UNDERLINED);
    }
    if let Some(value) = trimmed.strip_prefix(NOT_AFTER_LABEL) {
        return Styles::expiry(days_left(value.trim()));
    }
    if trimmed.starts_with("Error:") {
        return Styles::error();
    }
    Styles::text()
}

fn render_export(frame: &mut Frame, area: Rect, form: &ExportForm) {
    let mut lines = path_lines("Path", &form.input);
    lines.push(Line::from(""));
    if let Some(done) = form.done.as_ref() {
        lines.push(Line::from(vec![
            Span::styled("✓ Saved to ", Styles::success()),
            Span::styled(done.display().to_string(), Styles::success()),
        ]));
    }
    lines.extend(error_line(form.error.as_deref()));
    frame.render_widget(Paragraph::new(lines), area);
}

fn error_line(error: Option<&str>) -> Option<Line<'static>> {
    error.map(|e| {
        Line::from(vec![
            Span::styled("✗ ", Styles::error()),
            Span::styled(e.to_string(), Styles::error()),
        ])
    })
}

fn render_error(frame: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(line) = error_line(error) {
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// 正文区切出最后一行给错误
fn split_last(area: Rect) -> [Rect; 2] {
    let top = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let bottom = Rect {
        y: area.y + top.height,
        height: area.height - top.height,
        ..area
    };
    [top, bottom]
}

pub fn user_cells(user: &UserProfile) -> Vec<Span<'static>> {
    vec![
        Span::raw(user.username.clone()),
        Span::raw(user.display_name.clone()),
        Span::raw(role_name(user.role)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_sections_are_highlighted() {
        assert_eq!(
            report_style("Certificate Analysis"),
            Styles::title().add_modifier(Modifier::UNDERLINED)
        );
        assert_eq!(
            report_style(&format!("{NOT_AFTER_LABEL}  2001-01-01T00:00:00")),
            Styles::expiry(Some(-1))
        );
        assert_eq!(report_style("Serial:  01"), Styles::text());
    }

    #[test]
    fn split_last_reserves_one_line() {
        let [top, bottom] = split_last(Rect::new(0, 0, 10, 4));
        assert_eq!(top.height, 3);
        assert_eq!(bottom, Rect::new(0, 3, 10, 1));
    }
}
