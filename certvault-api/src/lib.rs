//! # certvault-api
//!
//! Typed async client for the CertVault certificate management service.
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: use rustls.
//! - **`native-tls`**: use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use certvault_api::{AuthApi, CertApi, CertVaultClient, ChainOption, PageRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CertVaultClient::new("http://localhost:1888")?;
//!     client.login("alice", "secret").await?;
//!
//!     let certs = client.list_ssl_certs(PageRequest::new(1, 20)).await?;
//!     for cert in &certs.list {
//!         let pem = client.ssl_cert(&cert.uuid, ChainOption::FullWithRoot).await?;
//!         println!("{} ({} bytes)", cert.uuid, pem.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Sessions
//!
//! The server identifies a login through the `JSESSIONID` cookie. The client
//! sends the token it holds with every request and replaces it whenever a
//! response sets a new one. Persisting the token between runs is left to the
//! caller ([`SessionControl::session`] / [`SessionControl::set_session`]).
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ApiError>`](ApiError). Only
//! [`ApiError::SessionExpired`] needs special treatment (the user must log in
//! again); every other variant is a failure local to the call.

mod client;
mod endpoints;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

pub use client::{CertVaultClient, normalize_base_url, user_agent};

pub use error::{ApiError, Result};

pub use traits::{AdminApi, AuthApi, CertApi, CertVaultApi, SessionControl, SuperadminApi, UserApi};

pub use types::{
    AllSession, CaCert, CaKind, CertAnalysis, ChainOption, ConvertPemToPfxRequest,
    CreateUserRequest, ImportCaRequest, LoginRecord, Page, PageRequest, PrivateKeyAnalysis,
    RequestCaCertRequest, RequestSslCertRequest, Role, SslCert, SubjectAltName,
    UpdateProfileRequest, UpdateUserRequest, UserProfile, decode_pem_text, role_name,
};

pub use utils::log_sanitizer;
