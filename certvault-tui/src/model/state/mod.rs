//! 各视图的状态
//!
//! 这里只定义数据结构与少量纯粹的构造 / 查询方法，
//! 按键与任务结果的处理都在 `update` 层。

mod admin;
mod cert_detail;
mod cert_list;
mod cert_request;
mod dashboard;
mod login;
mod paged;
mod profile;
pub mod report;
mod sessions;
mod settings;
mod superadmin;
mod tools;

pub use admin::{
    AdminMode, AdminOp, AdminSection, AdminState, CaRequestForm, PARENT_PAGE_SIZE, ca_field,
    import_field, import_form,
};
pub use cert_detail::{
    CertDetailState, ChainAction, ExportForm, KeyAction, Mode, Op as DetailOp, Subject,
};
pub use cert_list::{CaListState, CertListState};
pub use cert_request::{CertRequestState, field as request_field};
pub use dashboard::DashboardState;
pub use login::{LoginFocus, LoginState};
pub use paged::PagedList;
pub use profile::{ProfileOp, ProfileState, field as profile_field};
pub use sessions::{SessionAction, SessionsOp, SessionsState};
pub use settings::SettingsState;
pub use superadmin::{
    SuperAction, SuperMode, SuperOp, SuperSection, SuperadminState, UserFormKind,
    create_user_form, edit_field, edit_user_form, role_form, user_field,
};
pub use tools::{Tool, ToolFocus, ToolPanel, ToolsOp, ToolsState};
