use certvault_api::{CaCert, UserProfile};

use super::PagedList;
use super::cert_request::algorithm_selector;
use crate::model::widgets::{Field, Form, Menu, Selector, Spinner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSection {
    Users,
    Cas,
    RequestCa,
    ImportCa,
}

impl AdminSection {
    pub const ALL: [AdminSection; 4] = [
        AdminSection::Users,
        AdminSection::Cas,
        AdminSection::RequestCa,
        AdminSection::ImportCa,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Cas => "CA Management",
            Self::RequestCa => "Request CA",
            Self::ImportCa => "Import CA",
        }
    }
}

/// CA 申请表单字段下标
pub mod ca_field {
    pub const PARENT: usize = 0;
    pub const ALLOW_SUB_CA: usize = 1;
    pub const COMMON_NAME: usize = 2;
    pub const COUNTRY: usize = 3;
    pub const PROVINCE: usize = 4;
    pub const CITY: usize = 5;
    pub const ORGANIZATION: usize = 6;
    pub const ORGANIZATIONAL_UNIT: usize = 7;
    pub const ALGORITHM: usize = 8;
    pub const KEY_SIZE: usize = 9;
    pub const EXPIRY: usize = 10;
    pub const COMMENT: usize = 11;
}

/// CA 导入表单字段下标
pub mod import_field {
    pub const CERT_PATH: usize = 0;
    pub const KEY_PATH: usize = 1;
    pub const COMMENT: usize = 2;
}

/// CA 申请表单；父 CA 选项来自可签发子 CA 的列表
#[derive(Debug)]
pub struct CaRequestForm {
    pub form: Form,
    /// 与父 CA 选项一一对应的 UUID
    pub parents: Vec<String>,
}

impl CaRequestForm {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                Field::selector("Parent CA", Selector::optional(Vec::<String>::new()))
                    .placeholder("none (Root CA)"),
                Field::toggle("Allow Sub CA", true),
                Field::text("Common Name", "").required(),
                Field::text("Country", ""),
                Field::text("Province", ""),
                Field::text("City", ""),
                Field::text("Organization", ""),
                Field::text("Org Unit", ""),
                Field::selector("Algorithm", algorithm_selector()),
                Field::text("Key Size", "").placeholder("2048 (RSA) · 256 (EC) · empty for ED25519"),
                Field::text("Expire Days", "3650"),
                Field::text("Comment", ""),
            ]),
            parents: Vec::new(),
        }
    }

    /// 填入父 CA 候选（只保留允许签发子 CA 的）
    pub fn set_parents(&mut self, cas: &[CaCert]) {
        let usable: Vec<&CaCert> = cas.iter().filter(|ca| ca.allow_sub_ca && ca.available).collect();
        self.parents = usable.iter().map(|ca| ca.uuid.clone()).collect();
        let labels: Vec<String> = usable
            .iter()
            .map(|ca| {
                let short: String = ca.uuid.chars().take(8).collect();
                if ca.comment.is_empty() {
                    short
                } else {
                    format!("{} ({short})", ca.comment)
                }
            })
            .collect();
        if let Some(selector) = self.form.selector_mut(ca_field::PARENT) {
            selector.set_options(labels);
        }
    }

    /// 选中的父 CA；`None` 表示根 CA
    pub fn parent_uuid(&self) -> Option<String> {
        let index = self.form.selector(ca_field::PARENT)?.index()?;
        self.parents.get(index).cloned()
    }
}

impl Default for CaRequestForm {
    fn default() -> Self {
        Self::new()
    }
}

pub fn import_form() -> Form {
    Form::new(vec![
        Field::path("Certificate File").required(),
        Field::path("Private Key File").required(),
        Field::text("Comment", ""),
    ])
}

#[derive(Debug)]
pub enum AdminMode {
    Menu,
    Users(PagedList<UserProfile>),
    Cas(PagedList<CaCert>),
    RequestCa(CaRequestForm),
    ImportCa(Form),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOp {
    Users { page: u32 },
    Cas { page: u32 },
    /// 为 CA 申请表单加载父 CA 候选
    Parents,
    RequestCa,
    ImportCa,
}

/// 父 CA 候选一次最多加载的条数
pub const PARENT_PAGE_SIZE: u32 = 100;

#[derive(Debug)]
pub struct AdminState {
    pub menu: Menu<AdminSection>,
    pub mode: AdminMode,
    pub spinner: Spinner<AdminOp>,
    /// 表单错误
    pub error: Option<String>,
    pub width: u16,
    pub height: u16,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            menu: Menu::new(AdminSection::ALL.map(|s| (s, s.title()))),
            mode: AdminMode::Menu,
            spinner: Spinner::new(),
            error: None,
            width: 1,
            height: 1,
        }
    }
}

impl AdminState {
    /// 列表与表单可用高度（去掉标题与提示行）
    pub fn body_height(&self) -> u16 {
        self.height.saturating_sub(4).max(1)
    }
}
