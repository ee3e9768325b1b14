pub mod admin;
pub mod cert_detail;
pub mod cert_list;
pub mod cert_request;
pub mod dashboard;
pub mod login;
pub mod profile;
pub mod sessions;
pub mod settings;
pub mod superadmin;
pub mod tools;
