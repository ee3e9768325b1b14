use certvault_api::{CaCert, SslCert};

use super::PagedList;
use crate::model::widgets::Spinner;

/// 绑定到当前用户的 CA 列表
#[derive(Debug, Default)]
pub struct CaListState {
    pub list: PagedList<CaCert>,
    /// 等待中的页码
    pub spinner: Spinner<u32>,
}

/// 当前用户的 SSL 证书列表
#[derive(Debug, Default)]
pub struct CertListState {
    pub list: PagedList<SslCert>,
    /// 等待中的页码
    pub spinner: Spinner<u32>,
}
