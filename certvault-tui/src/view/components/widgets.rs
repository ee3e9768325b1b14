//! 通用控件的渲染
//!
//! 控件状态在 `model::widgets` 中；这里只负责把它们画出来。
//! 各函数占用的行数与 update 层 `resize` 中的计算一致。

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table as TableWidget},
};

use crate::model::state::PagedList;
use crate::model::widgets::{
    FieldKind, Form, Menu, PathInput, Spinner, Table, TextArea, TextInput, TextView,
};
use crate::view::theme::{Styles, colors};

/// 视图外框
pub fn page_block(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_focused())
}

/// 单行输入；获得焦点时在光标处显示 `▎`
pub fn input_spans(input: &TextInput, focused: bool) -> Vec<Span<'static>> {
    let display = input.display();
    if !focused {
        return vec![Span::styled(display, Styles::text())];
    }
    let at = display
        .char_indices()
        .nth(input.cursor())
        .map_or(display.len(), |(i, _)| i);
    let (before, after) = display.split_at(at);
    vec![
        Span::styled(before.to_string(), Styles::focused()),
        Span::styled("▎", Styles::focused()),
        Span::styled(after.to_string(), Styles::focused()),
    ]
}

/// `Label: value` 形式的输入行
pub fn labeled_input(label: &str, input: &TextInput, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("{label}: "), label_style(focused))];
    spans.extend(input_spans(input, focused));
    Line::from(spans)
}

/// 路径输入与补全候选（两行）
pub fn path_lines(label: &str, input: &PathInput) -> Vec<Line<'static>> {
    let mut lines = vec![labeled_input(label, input.input(), true)];
    if input.candidates().is_empty() {
        lines.push(Line::styled("  tab to complete", Styles::muted()));
    } else {
        lines.push(Line::styled(
            format!("  {}", input.candidates().join("  ")),
            Styles::muted(),
        ));
    }
    lines
}

fn label_style(focused: bool) -> Style {
    if focused {
        Styles::focused()
    } else {
        Style::default().fg(colors().muted)
    }
}

/// 多字段表单：每个字段一行，只画可见窗口
pub fn render_form(frame: &mut Frame, area: Rect, form: &Form) {
    let label_width = form
        .fields()
        .iter()
        .map(|f| f.label.chars().count() + usize::from(f.required))
        .max()
        .unwrap_or(0);
    let lines: Vec<Line> = form
        .fields()
        .iter()
        .enumerate()
        .skip(form.offset())
        .take(usize::from(form.height()))
        .map(|(i, field)| {
            let focused = i == form.focused();
            let marker = if field.required { "*" } else { "" };
            let label = format!("{}{marker}", field.label);
            let mut spans = vec![
                Span::styled(if focused { "▶ " } else { "  " }, label_style(focused)),
                Span::styled(format!("{label:<label_width$} : "), label_style(focused)),
            ];
            match &field.kind {
                FieldKind::Text(input) | FieldKind::Password(input) => {
                    if input.value().is_empty() && !focused && !field.placeholder.is_empty() {
                        spans.push(Span::styled(field.placeholder.clone(), Styles::muted()));
                    } else {
                        spans.extend(input_spans(input, focused));
                    }
                }
                FieldKind::Path(input) => {
                    spans.extend(input_spans(input.input(), focused));
                    if focused && !input.candidates().is_empty() {
                        spans.push(Span::styled(
                            format!("   {}", input.candidates().join("  ")),
                            Styles::muted(),
                        ));
                    }
                }
                FieldKind::Selector(selector) => {
                    let value = selector.value().map_or_else(
                        || field.placeholder.clone(),
                        str::to_string,
                    );
                    let text = if focused {
                        format!("◀ {value} ▶")
                    } else {
                        value
                    };
                    spans.push(Span::styled(
                        text,
                        if focused { Styles::focused() } else { Styles::text() },
                    ));
                }
                FieldKind::Toggle(on) => {
                    let text = if *on { "[x] Yes" } else { "[ ] No" };
                    spans.push(Span::styled(
                        text,
                        if focused { Styles::focused() } else { Styles::text() },
                    ));
                }
            }
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// 表格：表头 + 分隔行 + 可见行；光标行高亮
pub fn render_table<T>(
    frame: &mut Frame,
    area: Rect,
    table: &Table<T>,
    header: &[&str],
    widths: &[Constraint],
    cells: impl Fn(&T) -> Vec<Span<'static>>,
) {
    if table.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::styled("  No records", Styles::muted()),
        ]);
        frame.render_widget(empty, area);
        return;
    }
    let header_row = Row::new(header.iter().map(|h| (*h).to_string()))
        .style(Styles::title().add_modifier(Modifier::UNDERLINED))
        .bottom_margin(1);
    let rows: Vec<Row> = table
        .visible()
        .map(|(i, item)| {
            let row = Row::new(cells(item));
            if i == table.cursor() {
                row.style(Styles::selected())
            } else {
                row
            }
        })
        .collect();
    let widget = TableWidget::new(rows, widths.to_vec())
        .header(header_row)
        .column_spacing(2);
    frame.render_widget(widget, area);
}

/// 分页表格页：表格 + 最后一行的分页 / 等待 / 错误
pub fn render_paged<T, P>(
    frame: &mut Frame,
    area: Rect,
    list: &PagedList<T>,
    spinner: &Spinner<P>,
    header: &[&str],
    widths: &[Constraint],
    cells: impl Fn(&T) -> Vec<Span<'static>>,
) {
    let table_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };
    if list.loaded || !spinner.is_active() {
        render_table(frame, table_area, &list.table, header, widths, cells);
    }
    let status = match status_line(spinner, list.error.as_deref()) {
        Some(mut line) => {
            if !spinner.is_active() {
                line.spans.push(Span::styled("  (r to retry)", Styles::muted()));
            }
            line
        }
        None => Line::styled(list.pager.label(), Styles::muted()),
    };
    frame.render_widget(Paragraph::new(status), status_area);
}

/// 等待中或出错时的状态行；都没有时为 `None`
pub fn status_line<P>(spinner: &Spinner<P>, error: Option<&str>) -> Option<Line<'static>> {
    if spinner.is_active() {
        return Some(Line::from(vec![
            Span::styled(format!("{} ", spinner.glyph()), Styles::focused()),
            Span::styled(spinner.label().to_string(), Styles::text()),
        ]));
    }
    error.map(|e| {
        Line::from(vec![
            Span::styled("✗ ", Styles::error()),
            Span::styled(e.to_string(), Styles::error()),
        ])
    })
}

/// 竖排菜单
pub fn render_menu<T: Copy>(frame: &mut Frame, area: Rect, menu: &Menu<T>) {
    let lines: Vec<Line> = menu
        .items()
        .iter()
        .enumerate()
        .map(|(i, (_, label))| {
            if i == menu.selected() {
                Line::styled(format!(" ▶ {label} "), Styles::selected())
            } else {
                Line::styled(format!("   {label}"), Styles::text())
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// 只读文本：只画可见窗口，`style` 决定每行的样式
pub fn render_text_view(
    frame: &mut Frame,
    area: Rect,
    view: &TextView,
    style: impl Fn(&str) -> Style,
) {
    let lines: Vec<Line> = view
        .lines()
        .iter()
        .skip(view.offset())
        .take(usize::from(area.height))
        .map(|l| Line::styled(l.clone(), style(l)))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// 多行输入
pub fn render_text_area(frame: &mut Frame, area: Rect, input: &TextArea, focused: bool) {
    let (row, col) = input.cursor();
    let base = if focused { Styles::text() } else { Styles::muted() };
    let lines: Vec<Line> = input
        .lines()
        .iter()
        .enumerate()
        .skip(input.offset())
        .take(usize::from(area.height))
        .map(|(i, line)| {
            if !focused || i != row {
                return Line::styled(line.clone(), base);
            }
            let at = line.char_indices().nth(col).map_or(line.len(), |(b, _)| b);
            let (before, after) = line.split_at(at);
            Line::from(vec![
                Span::styled(before.to_string(), base),
                Span::styled("▎", Styles::focused()),
                Span::styled(after.to_string(), base),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// 把 `area` 自上而下切成若干固定高度的行块；最后一块取剩余高度
pub fn rows(area: Rect, heights: &[u16]) -> Vec<Rect> {
    let mut y = area.y;
    let bottom = area.y + area.height;
    heights
        .iter()
        .map(|h| {
            let height = (*h).min(bottom.saturating_sub(y));
            let rect = Rect {
                y,
                height,
                ..area
            };
            y += height;
            rect
        })
        .collect()
}
