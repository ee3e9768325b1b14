//! 设置页面视图

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::backend::log_file;
use crate::model::state::SettingsState;
use crate::view::components::widgets::labeled_input;
use crate::view::theme::{Styles, colors};

/// 设置项的标签宽度（用于对齐，基于显示宽度）
const LABEL_WIDTH: usize = 16;

/// 渲染设置页面
pub fn render(settings: &SettingsState, frame: &mut Frame, area: Rect) {
    let c = colors();
    let mut lines = vec![Line::from("")];

    match settings.editing.as_ref() {
        Some(input) => lines.push(labeled_input("  Server URL", input, true)),
        None => lines.push(render_setting_row("Server URL", &settings.server_url)),
    }
    lines.push(render_setting_row(
        "Config file",
        &settings.config_path.display().to_string(),
    ));
    lines.push(render_setting_row("Log file", &log_file().display().to_string()));
    lines.push(render_setting_row("Version", env!("CARGO_PKG_VERSION")));

    lines.push(Line::from(""));
    if let Some(err) = settings.error.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("  ✗ ", Styles::error()),
            Span::styled(err.to_string(), Styles::error()),
        ]));
        lines.push(Line::from(""));
    }

    // 操作提示
    let hint = if settings.editing.is_some() {
        vec![
            Span::styled("  Enter", Style::default().fg(Color::Yellow)),
            Span::styled(" save | ", Style::default().fg(c.muted)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" cancel", Style::default().fg(c.muted)),
        ]
    } else {
        vec![
            Span::styled("  e", Style::default().fg(Color::Yellow)),
            Span::styled(
                " edit the server address (saved to the config file)",
                Style::default().fg(c.muted),
            ),
        ]
    };
    lines.push(Line::from(hint));

    frame.render_widget(Paragraph::new(lines), area);
}

/// 渲染单个设置行
fn render_setting_row(label: &str, value: &str) -> Line<'static> {
    let c = colors();
    let padding = LABEL_WIDTH.saturating_sub(label.width());
    Line::from(vec![
        Span::styled(
            format!("  {label}{}", " ".repeat(padding)),
            Style::default().fg(c.muted),
        ),
        Span::styled(value.to_string(), Style::default().fg(c.fg)),
    ])
}
