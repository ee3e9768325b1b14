//! 顶部状态栏与底部按键提示

use certvault_api::role_name;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::model::state::{AdminMode, Mode, SuperMode};
use crate::model::{App, MainViews, ViewId};
use crate::view::theme::Styles;

/// 顶部状态栏：当前用户、服务器、视图标题
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let user = app.profile.as_ref().map_or_else(String::new, |p| {
        format!(" {} ({}) ", p.username, role_name(p.role))
    });
    let spans = vec![
        Span::styled(format!(" CertVault · {} ", app.current.title()), Styles::statusbar()),
        Span::styled(" │ ", Style::default().fg(Color::White)),
        Span::styled(user, Styles::statusbar()),
        Span::styled(" │ ", Style::default().fg(Color::White)),
        Span::styled(app.api.base_url(), Styles::statusbar()),
    ];
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Styles::statusbar()),
        area,
    );
}

/// 底部提示：按当前视图与子模式生成
pub fn render_hints(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (i, (key, desc)) in hints(app).iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

type Hint = (&'static str, &'static str);

const LIST_HINTS: [Hint; 4] = [
    ("↑↓", "Select"),
    ("[ ]", "Page"),
    ("r", "Refresh"),
    ("Enter", "Open"),
];

const FORM_HINTS: [Hint; 4] = [
    ("Tab", "Next"),
    ("←→", "Choose"),
    ("Ctrl+S", "Submit"),
    ("Esc", "Back"),
];

fn hints(app: &App) -> Vec<Hint> {
    if app.logout_dialog.is_some() {
        return vec![("y/n", "Confirm"), ("←→", "Choose"), ("Enter", "Apply")];
    }
    let Some(views) = app.views.as_deref() else {
        return vec![("Tab", "Next field"), ("Enter", "Login"), ("Ctrl+C", "Quit")];
    };
    let mut hints = view_hints(app.current, views);
    hints.push(("?", "Help"));
    hints
}

fn view_hints(current: ViewId, views: &MainViews) -> Vec<Hint> {
    match current {
        ViewId::Login => Vec::new(),
        ViewId::Dashboard => vec![("↑↓", "Navigate"), ("Enter", "Open"), ("r", "Refresh"), ("q", "Quit")],
        ViewId::CaList => LIST_HINTS.to_vec(),
        ViewId::CertList => {
            let mut hints = LIST_HINTS.to_vec();
            hints.push(("n", "New"));
            hints
        }
        ViewId::CaDetail | ViewId::CertDetail => detail_hints(views),
        ViewId::CertRequest | ViewId::Profile => FORM_HINTS.to_vec(),
        ViewId::Sessions => vec![("↑↓", "Select"), ("d", "Logout session"), ("L", "Logout all"), ("r", "Refresh")],
        ViewId::Tools => {
            if views.tools.panel.is_some() {
                vec![("Ctrl+S", "Run"), ("Ctrl+O", "Open file"), ("Ctrl+L", "Clear"), ("Tab", "Focus"), ("Esc", "Back")]
            } else {
                vec![("↑↓", "Select"), ("Enter", "Open")]
            }
        }
        ViewId::Admin => match views.admin.mode {
            AdminMode::Menu => vec![("↑↓", "Select"), ("Enter", "Open")],
            AdminMode::Users(_) => vec![("↑↓", "Select"), ("[ ]", "Page"), ("Esc", "Back")],
            AdminMode::Cas(_) => {
                let mut hints = LIST_HINTS.to_vec();
                hints.push(("Esc", "Back"));
                hints
            }
            AdminMode::RequestCa(_) | AdminMode::ImportCa(_) => FORM_HINTS.to_vec(),
        },
        ViewId::Superadmin => match views.superadmin.modes.last() {
            None => vec![("↑↓", "Select"), ("Enter", "Open")],
            Some(SuperMode::Sessions { .. }) => vec![("↑↓", "Select"), ("d", "Force logout"), ("Esc", "Back")],
            Some(SuperMode::Users(_)) => vec![
                ("c", "Create"),
                ("e", "Edit"),
                ("R", "Role"),
                ("D", "Delete"),
                ("Enter", "Sessions"),
                ("Esc", "Back"),
            ],
            Some(SuperMode::UserForm { .. } | SuperMode::RoleForm { .. }) => FORM_HINTS.to_vec(),
        },
        ViewId::Settings => {
            if views.settings.editing.is_some() {
                vec![("Enter", "Save"), ("Esc", "Cancel")]
            } else {
                vec![("e", "Edit server"), ("Esc", "Back")]
            }
        }
    }
}

fn detail_hints(views: &MainViews) -> Vec<Hint> {
    let Some(detail) = views.detail.as_ref() else {
        return Vec::new();
    };
    match detail.mode() {
        None => {
            let mut hints = vec![("a", "Analyze"), ("v", "View"), ("e", "Export")];
            if detail.subject.is_managed() {
                hints.extend([("k/K", "Key"), ("c", "Comment"), ("R", "Renew"), ("D", "Delete")]);
            }
            if detail.subject.is_admin_ca() {
                hints.extend([("t", "Toggle"), ("b", "Bind"), ("u", "Users")]);
            }
            hints.push(("Esc", "Back"));
            hints
        }
        Some(Mode::Analysis(_)) => vec![("↑↓", "Scroll"), ("Esc", "Back")],
        Some(Mode::ChainSelect { .. }) => vec![("↑↓", "Select"), ("Enter", "Confirm"), ("Esc", "Back")],
        Some(Mode::ViewCert { .. } | Mode::ViewPrivKey { .. }) => {
            vec![("↑↓", "Scroll"), ("e", "Export"), ("Esc", "Back")]
        }
        Some(Mode::ExportPath(_) | Mode::ExportPriv(_)) => {
            vec![("Tab", "Complete"), ("Enter", "Export"), ("Esc", "Back")]
        }
        Some(Mode::BindSelect(_)) => vec![("↑↓", "Select"), ("Enter", "Bind"), ("[ ]", "Page"), ("Esc", "Back")],
        Some(Mode::BoundList(_)) => vec![("↑↓", "Select"), ("d", "Unbind"), ("[ ]", "Page"), ("Esc", "Back")],
        Some(Mode::PrivKeyPass { .. } | Mode::EditComment { .. } | Mode::Renew { .. }) => {
            vec![("Enter", "Confirm"), ("Esc", "Cancel")]
        }
        Some(Mode::ConfirmDelete(_)) => vec![("y/n", "Confirm"), ("←→", "Choose")],
    }
}
