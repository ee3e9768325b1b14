//! 仪表盘：欢迎信息 + 统计卡片

use certvault_api::role_name;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::model::state::DashboardState;
use crate::view::components::widgets::status_line;
use crate::view::theme::Styles;

/// 渲染仪表盘
pub fn render(state: &DashboardState, frame: &mut Frame, area: Rect) {
    // 欢迎区域 + 统计区域 + 状态行
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(1),
        ])
        .split(area);

    let user = &state.user;
    let name = if user.display_name.is_empty() {
        user.username.as_str()
    } else {
        user.display_name.as_str()
    };
    let welcome = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Welcome back, {name}"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Signed in as {} · {}", user.username, role_name(user.role)),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(welcome), layout[0]);

    let mut cards: Vec<(&str, Option<u64>, Color)> = vec![
        ("Bound CAs", state.stats.as_ref().map(|s| s.ca_count), Color::Green),
        ("SSL Certificates", state.stats.as_ref().map(|s| s.ssl_count), Color::Blue),
    ];
    if user.is_admin() {
        cards.push((
            "Managed CAs",
            state.stats.as_ref().and_then(|s| s.managed_ca_count),
            Color::Magenta,
        ));
        cards.push((
            "Users",
            state.stats.as_ref().and_then(|s| s.user_count),
            Color::Yellow,
        ));
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(layout[1]);

    for ((title, value, color), card_area) in cards.into_iter().zip(columns.iter()) {
        let block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let text = value.map_or_else(|| "-".to_string(), |v| v.to_string());
        let content = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {text}"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ])
        .block(block);
        frame.render_widget(content, *card_area);
    }

    if let Some(status) = status_line(&state.spinner, state.error.as_deref()) {
        let status_area = Rect {
            height: layout[2].height.min(2),
            ..layout[2]
        };
        frame.render_widget(
            Paragraph::new(vec![Line::from(""), status]).style(Styles::text()),
            status_area,
        );
    }
}
