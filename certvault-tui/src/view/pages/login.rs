//! 登录页：横幅 + 用户名 / 密码 + 登录按钮

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::model::state::{LoginFocus, LoginState};
use crate::view::components::modal::centered_rect;
use crate::view::components::widgets::{labeled_input, status_line};
use crate::view::theme::{Styles, colors};

const BANNER: [&str; 5] = [
    r"  ___         _ __   __         _ _    __  __",
    r" / __|___ _ _| |\ \ / /_ _ _  _| | |_  \ \/ /",
    r"| (__/ -_) '_|  _\ V / _` | || | |  _|  >  < ",
    r" \___\___|_|  \__|\_/\__,_|\_,_|_|\__| /_/\_\",
    "",
];

/// 渲染登录页
pub fn render(login: &LoginState, frame: &mut Frame, area: Rect) {
    let c = colors();
    let box_area = centered_rect(60, 19, area);
    frame.render_widget(Clear, box_area);

    let block = Block::default()
        .title(" Login ")
        .title_alignment(Alignment::Center)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(c.border_focused));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let mut lines: Vec<Line> = BANNER
        .iter()
        .map(|l| Line::styled(*l, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .collect();
    lines.push(Line::styled(
        format!("  Server: {}", login.server_url),
        Styles::muted(),
    ));
    lines.push(Line::from(""));
    lines.push(labeled_input(
        "  Username",
        &login.username,
        login.focus == LoginFocus::Username,
    ));
    lines.push(Line::from(""));
    lines.push(labeled_input(
        "  Password",
        &login.password,
        login.focus == LoginFocus::Password,
    ));
    lines.push(Line::from(""));

    let button_style = if login.focus == LoginFocus::Button {
        Styles::selected()
    } else {
        Style::default().fg(c.fg)
    };
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("[ Login ]", button_style),
    ]));
    lines.push(Line::from(""));

    if let Some(status) = status_line(&login.spinner, None) {
        lines.push(status);
    } else if let Some(err) = login.error.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("  ✗ ", Styles::error()),
            Span::styled(err.to_string(), Styles::error()),
        ]));
    } else {
        lines.push(Line::styled(
            "  Tab switch field · Enter login · Ctrl+C quit",
            Styles::muted(),
        ));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
