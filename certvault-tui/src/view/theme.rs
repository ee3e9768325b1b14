//! 颜色与常用样式

use ratatui::style::{Color, Modifier, Style};

/// 主题颜色
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub highlight: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
}

static DARK: ThemeColors = ThemeColors {
    fg: Color::Rgb(212, 212, 212),
    border: Color::Rgb(62, 62, 62),
    border_focused: Color::Rgb(0, 122, 204),
    highlight: Color::Rgb(0, 122, 204),
    selected_bg: Color::Rgb(38, 79, 120),
    selected_fg: Color::White,
    success: Color::Rgb(78, 201, 176),
    warning: Color::Rgb(206, 145, 120),
    error: Color::Rgb(244, 135, 113),
    muted: Color::Rgb(128, 128, 128),
};

/// 当前颜色方案
pub fn colors() -> &'static ThemeColors {
    &DARK
}

/// 常用样式
pub struct Styles;

impl Styles {
    pub fn border_focused() -> Style {
        Style::default().fg(colors().border_focused)
    }

    /// 选中项样式
    pub fn selected() -> Style {
        let c = colors();
        Style::default()
            .bg(c.selected_bg)
            .fg(c.selected_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default().fg(colors().fg).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(colors().fg)
    }

    pub fn muted() -> Style {
        Style::default().fg(colors().muted)
    }

    pub fn error() -> Style {
        Style::default().fg(colors().error)
    }

    pub fn success() -> Style {
        Style::default().fg(colors().success)
    }

    /// 输入框获得焦点
    pub fn focused() -> Style {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    /// 状态栏样式
    pub fn statusbar() -> Style {
        Style::default().bg(colors().highlight).fg(Color::White)
    }

    /// 快捷键提示样式
    pub fn hint_key() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// 快捷键说明样式
    pub fn hint_desc() -> Style {
        Style::default().fg(Color::Rgb(180, 180, 180))
    }

    /// 按剩余天数着色：已过期红色，30 天内黄色
    pub fn expiry(days_left: Option<i64>) -> Style {
        let c = colors();
        match days_left {
            Some(days) if days < 0 => Style::default().fg(c.error),
            Some(days) if days <= 30 => Style::default().fg(c.warning),
            Some(_) => Style::default().fg(c.success),
            None => Style::default().fg(c.muted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_thresholds() {
        let c = colors();
        assert_eq!(Styles::expiry(Some(-1)).fg, Some(c.error));
        assert_eq!(Styles::expiry(Some(30)).fg, Some(c.warning));
        assert_eq!(Styles::expiry(Some(31)).fg, Some(c.success));
        assert_eq!(Styles::expiry(None).fg, Some(c.muted));
    }
}
