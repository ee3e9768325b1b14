//! 浮层：确认框、帮助、提示

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::model::widgets::{ConfirmDialog, ToastKind};
use crate::model::{App, ViewId};
use crate::view::theme::colors;

/// 渲染全局浮层（注销确认、帮助、提示），按此顺序叠放
pub fn render(app: &App, frame: &mut Frame) {
    if let Some(dialog) = app.logout_dialog.as_ref() {
        render_confirm(frame, dialog);
    }
    if app.help_visible {
        render_help(app, frame);
    }
    render_toast(app, frame);
}

/// 计算居中弹窗区域
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// 确认框：取消在左，确认在右
pub fn render_confirm(frame: &mut Frame, dialog: &ConfirmDialog) {
    let width = (dialog.message.width() as u16 + 8).clamp(40, 70);
    let area = centered_rect(width, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", dialog.title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let yes = dialog.yes_selected();
    let cancel_style = if yes {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Black).bg(Color::White)
    };
    let confirm_style = if yes {
        Style::default().fg(Color::Black).bg(Color::Red)
    } else {
        Style::default().fg(Color::Red)
    };

    let lines = vec![
        Line::from(""),
        Line::styled(dialog.message.clone(), Style::default().fg(Color::White)),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Cancel ", cancel_style),
            Span::raw("    "),
            Span::styled(" Confirm ", confirm_style),
        ]),
        Line::from(""),
        Line::styled("y/n · ←→ · Enter", Style::default().fg(Color::DarkGray)),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

type KeyHelp = (&'static str, &'static str);

const GLOBAL_KEYS: [KeyHelp; 6] = [
    ("↑↓/jk", "Move up/down"),
    ("Enter", "Open / confirm"),
    ("Esc", "Back / cancel"),
    ("?", "Toggle this help"),
    ("q", "Quit (outside input)"),
    ("Ctrl+C", "Quit"),
];

fn view_keys(id: ViewId) -> &'static [KeyHelp] {
    match id {
        ViewId::Login => &[("Tab", "Next field"), ("Enter", "Login")],
        ViewId::Dashboard => &[("r/F5", "Refresh statistics")],
        ViewId::CaList => &[("[ ]", "Previous / next page"), ("r", "Reload page")],
        ViewId::CertList => &[
            ("[ ]", "Previous / next page"),
            ("r", "Reload page"),
            ("n", "Request certificate"),
        ],
        ViewId::CaDetail | ViewId::CertDetail => &[
            ("a", "Analyze"),
            ("v / e", "View / export chain"),
            ("k / K", "View / export private key"),
            ("c", "Edit comment"),
            ("R / D", "Renew / delete"),
            ("t", "Toggle CA availability"),
            ("b / u", "Bind user / bound users"),
        ],
        ViewId::CertRequest | ViewId::Profile => &[
            ("Tab", "Next field"),
            ("←→", "Change selection"),
            ("Ctrl+S", "Submit"),
        ],
        ViewId::Sessions => &[("d", "Log out session"), ("L", "Log out everywhere")],
        ViewId::Tools => &[
            ("Ctrl+S", "Run tool"),
            ("Ctrl+O", "Load input from file"),
            ("Ctrl+L", "Clear"),
            ("Tab", "Switch pane"),
        ],
        ViewId::Admin => &[("[ ]", "Previous / next page"), ("Ctrl+S", "Submit form")],
        ViewId::Superadmin => &[
            ("c / e", "Create / edit user"),
            ("R", "Change role"),
            ("D", "Delete user"),
            ("d", "Force logout"),
        ],
        ViewId::Settings => &[("e", "Edit server address")],
    }
}

/// 帮助：全局按键 + 当前视图按键
fn render_help(app: &App, frame: &mut Frame) {
    let keys = view_keys(app.current);
    let height = (GLOBAL_KEYS.len() + keys.len() + 7) as u16;
    let area = centered_rect(56, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let key_line = |(key, desc): &KeyHelp| {
        Line::from(vec![
            Span::styled(format!("  {key:<9}"), Style::default().fg(Color::Yellow)),
            Span::styled(*desc, Style::default().fg(Color::White)),
        ])
    };

    let mut lines = vec![Line::styled("Global shortcuts", heading)];
    lines.extend(GLOBAL_KEYS.iter().map(key_line));
    lines.push(Line::from(""));
    lines.push(Line::styled(app.current.title(), heading));
    lines.extend(keys.iter().map(key_line));
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Press any key to close the help",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(lines), inner);
}

/// 提示：右上角，自动消失
fn render_toast(app: &App, frame: &mut Frame) {
    let Some(toast) = app.toast.current() else {
        return;
    };
    let c = colors();
    let (icon, color) = match toast.kind {
        ToastKind::Info => ("ℹ", c.highlight),
        ToastKind::Success => ("✓", c.success),
        ToastKind::Error => ("✗", c.error),
    };
    let screen = frame.area();
    let width = (toast.text.width() as u16 + 6).min(screen.width.saturating_sub(2)).max(12);
    let area = Rect::new(
        screen.x + screen.width.saturating_sub(width + 1),
        screen.y + 1,
        width.min(screen.width),
        3.min(screen.height),
    );
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Black));
    let line = Line::from(vec![
        Span::styled(format!("{icon} "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(toast.text.clone(), Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_small_area() {
        let area = Rect::new(0, 0, 30, 5);
        let rect = centered_rect(40, 9, area);
        assert_eq!(rect, Rect::new(0, 0, 30, 5));
        let rect = centered_rect(10, 3, Rect::new(0, 0, 30, 9));
        assert_eq!(rect, Rect::new(10, 3, 10, 3));
    }
}
