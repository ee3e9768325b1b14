//! 证书工具
//!
//! 面板自上而下：工具名、输入标签（私钥分析时附口令）、输入区、
//! 结果标签、结果区、状态行。输入区与结果区等高，见 `ToolsState::pane_height`。

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::model::state::{Tool, ToolFocus, ToolPanel, ToolsState};
use crate::view::components::widgets::{
    input_spans, path_lines, render_menu, render_text_area, render_text_view, rows, status_line,
};
use crate::view::theme::Styles;

pub fn render(state: &ToolsState, frame: &mut Frame, area: Rect) {
    match state.panel.as_ref() {
        None => render_tool_menu(state, frame, area),
        Some(panel) => render_panel(state, panel, frame, area),
    }
}

fn render_tool_menu(state: &ToolsState, frame: &mut Frame, area: Rect) {
    let parts = rows(area, &[2, Tool::ALL.len() as u16 + 1, area.height]);
    frame.render_widget(
        Paragraph::new(Line::styled(
            "Local certificate utilities (processed by the server)",
            Styles::muted(),
        )),
        parts[0],
    );
    render_menu(frame, parts[1], &state.menu);
    if let Some(tool) = state.menu.current() {
        frame.render_widget(
            Paragraph::new(Line::styled(description(tool), Styles::muted())),
            parts[2],
        );
    }
}

fn description(tool: Tool) -> &'static str {
    match tool {
        Tool::AnalyzeCert => "Decode a PEM certificate: subject, validity, public key, extensions.",
        Tool::AnalyzeKey => "Inspect a PEM private key (optionally encrypted).",
        Tool::PemToDer => "Convert a PEM certificate to base64-encoded DER.",
        Tool::DerToPem => "Convert base64-encoded DER back to PEM.",
    }
}

fn render_panel(state: &ToolsState, panel: &ToolPanel, frame: &mut Frame, area: Rect) {
    let Some(tool) = panel.tool else {
        return;
    };
    let pane = state.pane_height();
    let parts = rows(area, &[1, 1, pane, 1, pane, 1]);

    frame.render_widget(
        Paragraph::new(Line::styled(tool.title(), Styles::title())),
        parts[0],
    );

    let input_focused = panel.open_path.is_none() && panel.focus == ToolFocus::Input;
    let mut label = vec![Span::styled(
        tool.input_label(),
        if input_focused { Styles::focused() } else { Styles::muted() },
    )];
    if tool.needs_password() {
        let focused = panel.open_path.is_none() && panel.focus == ToolFocus::Password;
        label.push(Span::raw("    "));
        label.push(Span::styled(
            "Password: ",
            if focused { Styles::focused() } else { Styles::muted() },
        ));
        label.extend(input_spans(&panel.password, focused));
    }
    frame.render_widget(Paragraph::new(Line::from(label)), parts[1]);
    render_text_area(frame, parts[2], &panel.input, input_focused);

    if let Some(path) = panel.open_path.as_ref() {
        frame.render_widget(
            Paragraph::new(Line::styled("Open file", Styles::focused())),
            parts[3],
        );
        frame.render_widget(Paragraph::new(path_lines("Path", path)), parts[4]);
    } else {
        let result_focused = panel.focus == ToolFocus::Result;
        frame.render_widget(
            Paragraph::new(Line::styled(
                "Result",
                if result_focused { Styles::focused() } else { Styles::muted() },
            )),
            parts[3],
        );
        if let Some(result) = panel.result.as_ref() {
            render_text_view(frame, parts[4], result, |_| Styles::text());
        }
    }

    let status = status_line(&state.spinner, panel.error.as_deref()).unwrap_or_else(|| {
        Line::styled("Ctrl+S run · Ctrl+O open file · Tab switch focus", Styles::muted())
    });
    frame.render_widget(Paragraph::new(status), parts[5]);
}
