use crate::model::widgets::{Menu, PathInput, Spinner, TextArea, TextInput, TextView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    AnalyzeCert,
    AnalyzeKey,
    PemToDer,
    DerToPem,
}

impl Tool {
    pub const ALL: [Tool; 4] = [
        Tool::AnalyzeCert,
        Tool::AnalyzeKey,
        Tool::PemToDer,
        Tool::DerToPem,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::AnalyzeCert => "Analyze Certificate",
            Self::AnalyzeKey => "Analyze Private Key",
            Self::PemToDer => "Convert PEM → DER",
            Self::DerToPem => "Convert DER → PEM",
        }
    }

    pub fn input_label(self) -> &'static str {
        match self {
            Self::AnalyzeCert | Self::PemToDer => "Certificate (PEM)",
            Self::AnalyzeKey => "Private Key (PEM)",
            Self::DerToPem => "DER (base64)",
        }
    }

    pub fn needs_password(self) -> bool {
        matches!(self, Self::AnalyzeKey)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolFocus {
    #[default]
    Input,
    Password,
    Result,
}

/// 打开的工具面板
#[derive(Debug, Default)]
pub struct ToolPanel {
    pub tool: Option<Tool>,
    pub input: TextArea,
    /// 私钥口令（仅 AnalyzeKey）
    pub password: TextInput,
    pub result: Option<TextView>,
    pub error: Option<String>,
    pub focus: ToolFocus,
    /// ctrl+o 打开的文件路径输入
    pub open_path: Option<PathInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolsOp {
    Run,
    LoadFile,
}

#[derive(Debug)]
pub struct ToolsState {
    pub menu: Menu<Tool>,
    pub panel: Option<ToolPanel>,
    pub spinner: Spinner<ToolsOp>,
    pub width: u16,
    pub height: u16,
}

impl Default for ToolsState {
    fn default() -> Self {
        Self {
            menu: Menu::new(Tool::ALL.map(|t| (t, t.title()))),
            panel: None,
            spinner: Spinner::new(),
            width: 1,
            height: 1,
        }
    }
}

impl ToolsState {
    /// 输入区与结果区各占一半
    pub fn pane_height(&self) -> u16 {
        (self.height.saturating_sub(6) / 2).max(1)
    }
}
