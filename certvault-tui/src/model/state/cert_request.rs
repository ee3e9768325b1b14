use crate::model::widgets::{Field, Form, Selector, Spinner};

pub const ALGORITHMS: [&str; 3] = ["RSA", "EC", "ED25519"];

/// SSL 证书申请表单的字段下标
pub mod field {
    pub const CA_UUID: usize = 0;
    pub const COMMON_NAME: usize = 1;
    pub const COUNTRY: usize = 2;
    pub const PROVINCE: usize = 3;
    pub const CITY: usize = 4;
    pub const ORGANIZATION: usize = 5;
    pub const SANS: usize = 6;
    pub const ALGORITHM: usize = 7;
    pub const KEY_SIZE: usize = 8;
    pub const EXPIRY: usize = 9;
    pub const COMMENT: usize = 10;
}

/// 申请表单中的算法选择器
pub fn algorithm_selector() -> Selector {
    Selector::new(ALGORITHMS)
}

#[derive(Debug)]
pub struct CertRequestState {
    pub form: Form,
    pub spinner: Spinner<()>,
    pub error: Option<String>,
}

impl Default for CertRequestState {
    fn default() -> Self {
        Self::new()
    }
}

impl CertRequestState {
    pub fn new() -> Self {
        Self {
            form: Self::blank_form(),
            spinner: Spinner::new(),
            error: None,
        }
    }

    pub fn blank_form() -> Form {
        Form::new(vec![
            Field::text("CA UUID", "").required(),
            Field::text("Common Name", "")
                .required()
                .placeholder("example.com"),
            Field::text("Country", "").placeholder("CN"),
            Field::text("Province", ""),
            Field::text("City", ""),
            Field::text("Organization", ""),
            Field::text("SANs", "").placeholder("a.example.com, b.example.com"),
            Field::selector("Algorithm", algorithm_selector()),
            Field::text("Key Size", "").placeholder("2048/4096 (RSA) · 256/384 (EC) · empty for ED25519"),
            Field::text("Expire Days", "365"),
            Field::text("Comment", ""),
        ])
    }
}
