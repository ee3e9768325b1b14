//! 异步任务定义
//!
//! 每个 [`Job`] 在独立的 tokio 任务中执行，结束时恰好投递一条
//! `AppMessage::JobFinished { ticket, result }` 回到主循环。

use std::fmt;
use std::path::PathBuf;

use certvault_api::{
    AllSession, ApiError, CaCert, CertAnalysis, ChainOption, CreateUserRequest, LoginRecord, Page,
    PageRequest, PrivateKeyAnalysis, RequestCaCertRequest, RequestSslCertRequest, SslCert,
    UpdateProfileRequest, UpdateUserRequest, UserProfile,
};

use crate::model::ViewId;

/// 结果的接收方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// 启动时用已保存的会话静默登录；失败不提示
    AutoLogin,
    /// 注销；无论结果如何都回到登录页
    Logout,
    /// 某个视图
    View(ViewId),
}

/// 任务票据
///
/// `epoch` 在登录成功与会话重置时递增，旧 epoch 的结果一律丢弃；
/// `seq` 由发起视图的 spinner 分配，只有与当前等待中的 seq 相同才会被应用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub epoch: u64,
    pub target: Target,
    pub seq: u64,
}

/// 任务失败的两级分类
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// 会话失效，需要回到登录页
    #[error("session expired, please log in again")]
    SessionExpired,
    /// 其它失败，只在发起视图内显示
    #[error("{0}")]
    Failed(String),
}

impl From<ApiError> for TaskError {
    fn from(err: ApiError) -> Self {
        if err.is_session_expired() {
            Self::SessionExpired
        } else {
            Self::Failed(err.to_string())
        }
    }
}

pub type JobResult = Result<JobOutput, TaskError>;

/// 证书所属的接口分区
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertKind {
    /// 绑定到当前用户的 CA（只读）
    UserCa,
    /// 管理员视角的 CA
    AdminCa,
    /// 当前用户的 SSL 证书
    Ssl,
}

/// 指向一张证书
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertRef {
    pub kind: CertKind,
    pub uuid: String,
}

/// 导出内容的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSource {
    /// 已经拿到的文本（查看中的证书或私钥）
    Content { text: String, private: bool },
    /// 先按链选项下载再写入
    Remote { cert: CertRef, chain: ChainOption },
}

/// 仪表盘统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub ca_count: u64,
    pub ssl_count: u64,
    /// 仅管理员可见
    pub user_count: Option<u64>,
    /// 仅管理员可见
    pub managed_ca_count: Option<u64>,
}

/// 异步任务
pub enum Job {
    Login { username: String, password: String },
    Profile,
    Logout,

    DashboardStats { admin: bool },
    ListUserCas(PageRequest),
    ListSslCerts(PageRequest),
    ListAdminCas(PageRequest),
    ListUsers(PageRequest),
    ListBoundUsers { ca_uuid: String, page: PageRequest },
    ListUnboundUsers { ca_uuid: String, page: PageRequest },
    ListLoginRecords(PageRequest),
    ListAllSessions(PageRequest),
    ListSessionsOf { username: String, page: PageRequest },

    /// 下载证书本身并交给服务端解析
    FetchAndAnalyze(CertRef),
    FetchCert { cert: CertRef, chain: ChainOption },
    FetchPrivateKey { cert: CertRef, password: String },
    Export { path: String, source: ExportSource },
    UpdateComment { cert: CertRef, comment: String },
    Renew { cert: CertRef, days: u32 },
    Delete(CertRef),
    SetAvailable { uuid: String, available: bool },
    BindUser { ca_uuid: String, username: String },
    UnbindUser { ca_uuid: String, username: String },

    RequestSsl(RequestSslCertRequest),
    RequestCa(RequestCaCertRequest),
    /// 读取两个本地文件后导入
    ImportCa { cert_path: String, key_path: String, comment: String },

    UpdateProfile(UpdateProfileRequest),
    LogoutLoginRecord(String),
    LogoutAllSessions,

    AnalyzeCert(String),
    AnalyzeKey { pem: String, password: String },
    PemToDer(String),
    DerToPem(String),
    ReadFile(String),

    CreateUser(CreateUserRequest),
    UpdateUser { username: String, req: UpdateUserRequest },
    UpdateRole { username: String, role: u8 },
    DeleteUser(String),
    ForceLogout(String),

    /// 先执行第一个，成功后执行第二个，结果取第二个
    Then(Box<Job>, Box<Job>),
}

impl Job {
    /// 写操作之后重新加载
    #[must_use]
    pub fn then(self, next: Job) -> Self {
        Self::Then(Box::new(self), Box::new(next))
    }

    /// 日志用名称（不含任何参数，避免泄漏密码）
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Profile => "profile",
            Self::Logout => "logout",
            Self::DashboardStats { .. } => "dashboard_stats",
            Self::ListUserCas(_) => "list_user_cas",
            Self::ListSslCerts(_) => "list_ssl_certs",
            Self::ListAdminCas(_) => "list_admin_cas",
            Self::ListUsers(_) => "list_users",
            Self::ListBoundUsers { .. } => "list_bound_users",
            Self::ListUnboundUsers { .. } => "list_unbound_users",
            Self::ListLoginRecords(_) => "list_login_records",
            Self::ListAllSessions(_) => "list_all_sessions",
            Self::ListSessionsOf { .. } => "list_sessions_of",
            Self::FetchAndAnalyze(_) => "fetch_and_analyze",
            Self::FetchCert { .. } => "fetch_cert",
            Self::FetchPrivateKey { .. } => "fetch_private_key",
            Self::Export { .. } => "export",
            Self::UpdateComment { .. } => "update_comment",
            Self::Renew { .. } => "renew",
            Self::Delete(_) => "delete",
            Self::SetAvailable { .. } => "set_available",
            Self::BindUser { .. } => "bind_user",
            Self::UnbindUser { .. } => "unbind_user",
            Self::RequestSsl(_) => "request_ssl",
            Self::RequestCa(_) => "request_ca",
            Self::ImportCa { .. } => "import_ca",
            Self::UpdateProfile(_) => "update_profile",
            Self::LogoutLoginRecord(_) => "logout_login_record",
            Self::LogoutAllSessions => "logout_all_sessions",
            Self::AnalyzeCert(_) => "analyze_cert",
            Self::AnalyzeKey { .. } => "analyze_key",
            Self::PemToDer(_) => "pem_to_der",
            Self::DerToPem(_) => "der_to_pem",
            Self::ReadFile(_) => "read_file",
            Self::CreateUser(_) => "create_user",
            Self::UpdateUser { .. } => "update_user",
            Self::UpdateRole { .. } => "update_role",
            Self::DeleteUser(_) => "delete_user",
            Self::ForceLogout(_) => "force_logout",
            Self::Then(..) => "then",
        }
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Then(first, next) => f.debug_tuple("Then").field(first).field(next).finish(),
            other => f.write_str(other.name()),
        }
    }
}

/// 任务成功时的输出
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutput {
    Done,
    Profile(UserProfile),
    Stats(DashboardStats),
    CaPage(Page<CaCert>),
    SslPage(Page<SslCert>),
    UserPage(Page<UserProfile>),
    LoginRecords(Page<LoginRecord>),
    Sessions(Page<AllSession>),
    /// 证书 PEM
    Pem(String),
    /// 私钥 PEM
    PrivateKey(String),
    Analysis(Box<CertAnalysis>),
    KeyAnalysis(PrivateKeyAnalysis),
    Text(String),
    Exported(PathBuf),
    Ca(CaCert),
    Ssl(SslCert),
}
