//! 证书详情（用户 CA / 管理员 CA / SSL 证书共用）
//!
//! 子模式以栈表示：栈空即 Normal；esc 只弹出栈顶一层。
//!
//!     Normal ──a──▶ Analysis
//!     Normal ──v──▶ ChainSelect(View) ══fetch══▶ ViewCert ──e──▶ ExportPath
//!     Normal ──e──▶ ChainSelect(Export) ──enter──▶ ExportPath
//!     Normal ──k──▶ PrivKeyPass(View) ══fetch══▶ ViewPrivKey ──e──▶ ExportPriv
//!     Normal ──K──▶ PrivKeyPass(Export) ══fetch══▶ ExportPriv
//!     Normal ──b──▶ BindSelect          Normal ──u──▶ BoundList
//!
//! `══▶` 表示任务成功后用结果替换栈顶；`──▶` 表示压栈。

use std::path::PathBuf;

use certvault_api::{CaCert, ChainOption, SslCert, UserProfile};

use super::PagedList;
use crate::message::{CertKind, CertRef, ExportSource};
use crate::model::ViewId;
use crate::model::widgets::{ConfirmDialog, Menu, PathInput, Spinner, TextInput, TextView};

/// 详情页展示的证书
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// 绑定给当前用户的 CA（只读）
    UserCa(CaCert),
    /// 管理员管理的 CA
    AdminCa(CaCert),
    Ssl(SslCert),
}

impl Subject {
    pub fn kind(&self) -> CertKind {
        match self {
            Self::UserCa(_) => CertKind::UserCa,
            Self::AdminCa(_) => CertKind::AdminCa,
            Self::Ssl(_) => CertKind::Ssl,
        }
    }

    pub fn uuid(&self) -> &str {
        match self {
            Self::UserCa(ca) | Self::AdminCa(ca) => &ca.uuid,
            Self::Ssl(cert) => &cert.uuid,
        }
    }

    pub fn cert_ref(&self) -> CertRef {
        CertRef {
            kind: self.kind(),
            uuid: self.uuid().to_string(),
        }
    }

    pub fn view_id(&self) -> ViewId {
        match self {
            Self::UserCa(_) | Self::AdminCa(_) => ViewId::CaDetail,
            Self::Ssl(_) => ViewId::CertDetail,
        }
    }

    pub fn comment(&self) -> &str {
        match self {
            Self::UserCa(ca) | Self::AdminCa(ca) => &ca.comment,
            Self::Ssl(cert) => &cert.comment,
        }
    }

    pub fn set_comment(&mut self, comment: String) {
        match self {
            Self::UserCa(ca) | Self::AdminCa(ca) => ca.comment = comment,
            Self::Ssl(cert) => cert.comment = comment,
        }
    }

    pub fn not_after(&self) -> &str {
        match self {
            Self::UserCa(ca) | Self::AdminCa(ca) => &ca.not_after,
            Self::Ssl(cert) => &cert.not_after,
        }
    }

    /// 私钥、备注、续期、删除只对自己拥有的证书开放
    pub fn is_managed(&self) -> bool {
        !matches!(self, Self::UserCa(_))
    }

    pub fn is_admin_ca(&self) -> bool {
        matches!(self, Self::AdminCa(_))
    }

    /// 续期后服务端返回的新记录
    pub fn replace_ca(&mut self, ca: CaCert) {
        if let Self::UserCa(old) | Self::AdminCa(old) = self {
            *old = ca;
        }
    }

    pub fn replace_ssl(&mut self, cert: SslCert) {
        if let Self::Ssl(old) = self {
            *old = cert;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainAction {
    View,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    View,
    Export,
}

/// 导出路径输入
#[derive(Debug, Clone)]
pub struct ExportForm {
    pub input: PathInput,
    pub source: ExportSource,
    pub error: Option<String>,
    /// 最近一次成功写入的绝对路径
    pub done: Option<PathBuf>,
}

impl ExportForm {
    pub fn new(source: ExportSource) -> Self {
        Self {
            input: PathInput::new(),
            source,
            error: None,
            done: None,
        }
    }
}

/// 子模式
#[derive(Debug)]
pub enum Mode {
    /// 分析报告，或分析失败的错误信息
    Analysis(TextView),
    ChainSelect {
        action: ChainAction,
        menu: Menu<ChainOption>,
        error: Option<String>,
    },
    ViewCert {
        pem: String,
        view: TextView,
    },
    ExportPath(ExportForm),
    PrivKeyPass {
        action: KeyAction,
        input: TextInput,
        error: Option<String>,
    },
    ViewPrivKey {
        key: String,
        view: TextView,
    },
    ExportPriv(ExportForm),
    /// 尚未绑定的用户，enter 绑定
    BindSelect(PagedList<UserProfile>),
    /// 已绑定的用户，d 解绑
    BoundList(PagedList<UserProfile>),
    EditComment {
        input: TextInput,
        error: Option<String>,
    },
    Renew {
        input: TextInput,
        error: Option<String>,
    },
    ConfirmDelete(ConfirmDialog),
}

impl Mode {
    pub fn chain_select(action: ChainAction) -> Self {
        Self::ChainSelect {
            action,
            menu: Menu::new(ChainOption::ALL.map(|c| (c, c.label()))),
            error: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Analysis(_) => "Analysis",
            Self::ChainSelect { .. } => "ChainSelect",
            Self::ViewCert { .. } => "ViewCert",
            Self::ExportPath(_) => "ExportPath",
            Self::PrivKeyPass { .. } => "PrivKeyPass",
            Self::ViewPrivKey { .. } => "ViewPrivKey",
            Self::ExportPriv(_) => "ExportPriv",
            Self::BindSelect(_) => "BindSelect",
            Self::BoundList(_) => "BoundList",
            Self::EditComment { .. } => "EditComment",
            Self::Renew { .. } => "Renew",
            Self::ConfirmDelete(_) => "ConfirmDelete",
        }
    }

    /// 该模式下按键进入文本输入
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            Self::ExportPath(_)
                | Self::ExportPriv(_)
                | Self::PrivKeyPass { .. }
                | Self::EditComment { .. }
                | Self::Renew { .. }
        )
    }
}

/// 等待中的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Analyze,
    Fetch,
    Export,
    FetchKey(KeyAction),
    Comment(String),
    Renew,
    Delete,
    Toggle(bool),
    /// 绑定列表加载（可能跟在一次绑定 / 解绑之后）
    Users { page: u32, notice: Option<String> },
}

#[derive(Debug)]
pub struct CertDetailState {
    pub subject: Subject,
    pub modes: Vec<Mode>,
    pub spinner: Spinner<Op>,
    /// Normal 模式下的错误
    pub error: Option<String>,
    /// 证书被修改过，返回列表时需要刷新
    pub dirty: bool,
    /// 内容区尺寸
    pub width: u16,
    pub height: u16,
}

impl CertDetailState {
    pub fn new(subject: Subject, width: u16, height: u16) -> Self {
        Self {
            subject,
            modes: Vec::new(),
            spinner: Spinner::new(),
            error: None,
            dirty: false,
            width,
            height,
        }
    }

    pub fn mode(&self) -> Option<&Mode> {
        self.modes.last()
    }

    pub fn mode_mut(&mut self) -> Option<&mut Mode> {
        self.modes.last_mut()
    }

    /// 子模式中文本区可用的高度（去掉标题、边框与提示行）
    pub fn text_height(&self) -> u16 {
        self.height.saturating_sub(6).max(1)
    }

    pub fn text_view(&self, text: &str) -> TextView {
        let mut view = TextView::new(text);
        view.set_height(self.text_height());
        view
    }

    pub fn user_list(&self) -> PagedList<UserProfile> {
        let mut list = PagedList::new();
        list.table.set_height(self.text_height());
        list
    }
}
