use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    AllSession, CaCert, CertAnalysis, ChainOption, ConvertPemToPfxRequest, CreateUserRequest,
    ImportCaRequest, LoginRecord, Page, PageRequest, PrivateKeyAnalysis, RequestCaCertRequest,
    RequestSslCertRequest, SslCert, UpdateProfileRequest, UpdateUserRequest, UserProfile,
};

/// 会话与服务器地址（同步访问，不发请求）
pub trait SessionControl: Send + Sync {
    /// 当前持有的会话令牌
    fn session(&self) -> Option<String>;

    /// 替换会话令牌；`None` 表示清除。
    /// 此前已发出的请求再带回的 Set-Cookie 会被忽略
    fn set_session(&self, session: Option<String>);

    /// 当前服务器地址
    fn base_url(&self) -> String;

    /// 切换服务器地址（不影响已持有的会话令牌）
    fn set_base_url(&self, url: &str);
}

/// 认证接口
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// 用户名密码登录，成功后会话令牌由响应 Cookie 写入
    async fn login(&self, username: &str, password: &str) -> Result<()>;

    /// 注销当前会话；无论成功与否本地令牌都会被清除
    async fn logout(&self) -> Result<()>;

    /// OIDC 授权地址
    async fn oidc_authorization_url(&self) -> Result<String>;

    /// 连通性检查
    async fn ping(&self) -> Result<()>;
}

/// 当前用户的资料与登录记录
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn profile(&self) -> Result<UserProfile>;

    async fn update_profile(&self, req: &UpdateProfileRequest) -> Result<()>;

    async fn list_login_records(&self, page: PageRequest) -> Result<Page<LoginRecord>>;

    /// 注销指定的登录记录
    async fn logout_login_record(&self, uuid: &str) -> Result<()>;

    /// 注销当前用户的全部会话（包括本会话）
    async fn logout_all_sessions(&self) -> Result<()>;
}

/// 普通用户可见的证书接口与工具
#[async_trait]
pub trait CertApi: Send + Sync {
    /// 绑定到当前用户的 CA
    async fn list_user_cas(&self, page: PageRequest) -> Result<Page<CaCert>>;

    /// CA 证书 PEM
    async fn user_ca_cert(&self, uuid: &str, chain: ChainOption) -> Result<String>;

    async fn list_ssl_certs(&self, page: PageRequest) -> Result<Page<SslCert>>;

    /// SSL 证书 PEM
    async fn ssl_cert(&self, uuid: &str, chain: ChainOption) -> Result<String>;

    /// SSL 私钥 PEM，需要账户密码
    async fn ssl_private_key(&self, uuid: &str, password: &str) -> Result<String>;

    async fn request_ssl_cert(&self, req: &RequestSslCertRequest) -> Result<SslCert>;

    async fn renew_ssl_cert(&self, uuid: &str, days: u32) -> Result<SslCert>;

    async fn delete_ssl_cert(&self, uuid: &str) -> Result<()>;

    async fn update_ssl_comment(&self, uuid: &str, comment: &str) -> Result<()>;

    /// 证书解析（PEM 以 base64 形式上传）
    async fn analyze_cert(&self, pem: &str) -> Result<CertAnalysis>;

    /// 私钥解析；加密私钥需提供密码
    async fn analyze_private_key(&self, pem: &str, password: &str) -> Result<PrivateKeyAnalysis>;

    /// PEM → DER（返回 base64）
    async fn convert_pem_to_der(&self, pem: &str) -> Result<String>;

    /// DER（base64）→ PEM
    async fn convert_der_to_pem(&self, der: &str) -> Result<String>;

    /// PEM 证书 + 私钥 → PFX（返回 base64）
    async fn convert_pem_to_pfx(&self, req: &ConvertPemToPfxRequest) -> Result<String>;
}

/// 管理员接口
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_users(&self, page: PageRequest) -> Result<Page<UserProfile>>;

    async fn count_users(&self) -> Result<u64>;

    async fn list_admin_cas(&self, page: PageRequest) -> Result<Page<CaCert>>;

    async fn count_cas(&self) -> Result<u64>;

    async fn admin_ca_cert(&self, uuid: &str, chain: ChainOption) -> Result<String>;

    async fn admin_ca_private_key(&self, uuid: &str, password: &str) -> Result<String>;

    async fn update_ca_comment(&self, uuid: &str, comment: &str) -> Result<()>;

    async fn set_ca_available(&self, uuid: &str, available: bool) -> Result<()>;

    async fn import_ca(&self, req: &ImportCaRequest) -> Result<CaCert>;

    async fn request_ca(&self, req: &RequestCaCertRequest) -> Result<CaCert>;

    async fn renew_ca(&self, uuid: &str, days: u32) -> Result<CaCert>;

    async fn delete_ca(&self, uuid: &str) -> Result<()>;

    async fn bind_user(&self, ca_uuid: &str, username: &str) -> Result<()>;

    async fn unbind_user(&self, ca_uuid: &str, username: &str) -> Result<()>;

    /// 已绑定到 CA 的用户
    async fn list_bound_users(&self, ca_uuid: &str, page: PageRequest)
    -> Result<Page<UserProfile>>;

    /// 尚未绑定到 CA 的用户
    async fn list_unbound_users(
        &self,
        ca_uuid: &str,
        page: PageRequest,
    ) -> Result<Page<UserProfile>>;
}

/// 超级管理员接口
#[async_trait]
pub trait SuperadminApi: Send + Sync {
    async fn list_all_sessions(&self, page: PageRequest) -> Result<Page<AllSession>>;

    async fn list_sessions_of(&self, username: &str, page: PageRequest)
    -> Result<Page<AllSession>>;

    /// 强制注销某用户的全部会话
    async fn force_logout(&self, username: &str) -> Result<()>;

    async fn create_user(&self, req: &CreateUserRequest) -> Result<()>;

    async fn delete_users(&self, usernames: &[String]) -> Result<()>;

    async fn update_user(&self, username: &str, req: &UpdateUserRequest) -> Result<()>;

    async fn update_role(&self, username: &str, role: u8) -> Result<()>;
}

/// CertVault 网关的完整能力集合
///
/// 所有实现了各分区 trait 的类型自动实现此 trait，调用方只需持有
/// `Arc<dyn CertVaultApi>`。
pub trait CertVaultApi:
    SessionControl + AuthApi + UserApi + CertApi + AdminApi + SuperadminApi
{
}

impl<T> CertVaultApi for T where
    T: SessionControl + AuthApi + UserApi + CertApi + AdminApi + SuperadminApi
{
}
