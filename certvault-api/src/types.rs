use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============ Envelope & pagination ============

/// Response wrapper used by every CertVault endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResultEnvelope<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

/// Pagination parameters for list operations.
///
/// Pages are **1-indexed**. An out-of-range page is not an error: the server
/// answers with an empty `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

impl PageRequest {
    /// Build a request for `page` with the given page size.
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }.validated()
    }

    /// Clamp to `page >= 1` and `limit >= 1`.
    #[must_use]
    pub fn validated(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.max(1),
        }
    }
}

/// One page of a list result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u64,
    /// Items in the requested page.
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            total: 0,
            list: Vec::new(),
        }
    }
}

impl<T> Page<T> {
    /// Whether a page after `request.page` exists.
    pub fn has_more(&self, request: PageRequest) -> bool {
        u64::from(request.page) * u64::from(request.limit) < self.total
    }
}

// ============ Users ============

/// Account role. The API encodes it as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    User,
    Admin,
    Superadmin,
}

impl Role {
    /// All roles, in ascending privilege order.
    pub const ALL: [Role; 3] = [Role::User, Role::Admin, Role::Superadmin];

    /// Wire value.
    pub fn code(self) -> u8 {
        match self {
            Self::User => 1,
            Self::Admin => 2,
            Self::Superadmin => 3,
        }
    }

    /// Parse a wire value.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::User),
            2 => Some(Self::Admin),
            3 => Some(Self::Superadmin),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
            Self::Superadmin => "Superadmin",
        }
    }
}

/// Human-readable name for a raw role code.
pub fn role_name(code: u8) -> &'static str {
    Role::from_code(code).map_or("Unknown", Role::name)
}

/// A user profile (`UserProfileDTO`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: u8,
}

impl UserProfile {
    /// Parsed role, if the code is known.
    pub fn role(&self) -> Option<Role> {
        Role::from_code(self.role)
    }

    /// Whether the user may use the admin screens.
    pub fn is_admin(&self) -> bool {
        self.role >= Role::Admin.code()
    }

    /// Whether the user may use the superadmin screens.
    pub fn is_superadmin(&self) -> bool {
        self.role >= Role::Superadmin.code()
    }
}

/// Body of `PATCH /api/v1/user/profile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub old_password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub new_password: String,
}

/// A login record of the current user (`LoginRecordDTO`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRecord {
    pub uuid: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub browser: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub login_time: String,
    #[serde(default)]
    pub is_online: bool,
}

/// A session as seen by a superadmin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllSession {
    #[serde(default)]
    pub uuid: String,
    pub username: String,
    #[serde(default, alias = "ipAddress")]
    pub ip: String,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default, alias = "loginTime")]
    pub login_at: String,
    #[serde(default)]
    pub is_online: bool,
}

/// Body of `POST /api/v1/superadmin/user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub role: u8,
}

/// Body of `PATCH /api/v1/superadmin/user/{username}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
}

// ============ Certificates ============

/// Which part of the chain to fetch with a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainOption {
    /// Only the certificate itself.
    #[default]
    Bare,
    /// Certificate plus intermediates plus the root CA.
    FullWithRoot,
    /// Certificate plus intermediates, without the root CA.
    FullWithoutRoot,
}

impl ChainOption {
    /// All options in menu order.
    pub const ALL: [ChainOption; 3] = [
        ChainOption::Bare,
        ChainOption::FullWithRoot,
        ChainOption::FullWithoutRoot,
    ];

    /// `(chain, needRootCa)` query flags.
    pub fn flags(self) -> (bool, bool) {
        match self {
            Self::Bare => (false, false),
            Self::FullWithRoot => (true, true),
            Self::FullWithoutRoot => (true, false),
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bare => "Only This Certificate",
            Self::FullWithRoot => "Full Chain (with Root CA)",
            Self::FullWithoutRoot => "Full Chain (without Root CA)",
        }
    }
}

/// Position of a CA in its hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaKind {
    Root,
    Intermediate,
    Leaf,
}

impl CaKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Root => "Root CA",
            Self::Intermediate => "Int CA",
            Self::Leaf => "Leaf CA",
        }
    }
}

/// A CA certificate record (`CaInfoDTO`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaCert {
    pub uuid: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub allow_sub_ca: bool,
    #[serde(default)]
    pub parent_ca: Option<String>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub not_before: String,
    #[serde(default)]
    pub not_after: String,
}

impl CaCert {
    /// Root if there is no parent, intermediate if it may sign sub-CAs, else leaf.
    pub fn kind(&self) -> CaKind {
        match self.parent_ca.as_deref() {
            None | Some("") => CaKind::Root,
            Some(_) if self.allow_sub_ca => CaKind::Intermediate,
            Some(_) => CaKind::Leaf,
        }
    }
}

/// An SSL certificate record (`CertInfoDTO`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslCert {
    pub uuid: String,
    #[serde(default)]
    pub ca_uuid: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub not_before: String,
    #[serde(default)]
    pub not_after: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub modified_at: String,
}

/// A subject alternative name entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAltName {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl SubjectAltName {
    /// A `DNS_NAME` entry.
    pub fn dns(value: impl Into<String>) -> Self {
        Self {
            kind: "DNS_NAME".to_string(),
            value: value.into(),
        }
    }
}

/// Body of `POST /api/v1/user/cert/ssl`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSslCertRequest {
    pub ca_uuid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_size: Option<u32>,
    pub country: String,
    pub province: String,
    pub city: String,
    pub organization: String,
    pub organizational_unit: String,
    pub common_name: String,
    pub expiry: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subject_alt_names: Vec<SubjectAltName>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

/// Body of `POST /api/v1/admin/cert/ca`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCaCertRequest {
    /// Parent CA; `None` requests a root CA.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_uuid: Option<String>,
    pub allow_sub_ca: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_size: Option<u32>,
    pub country: String,
    pub province: String,
    pub city: String,
    pub organization: String,
    pub organizational_unit: String,
    pub common_name: String,
    pub expiry: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

/// Body of `POST /api/v1/admin/cert/ca/import`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportCaRequest {
    pub certificate: String,
    pub privkey: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

/// Body of `POST /api/v1/user/cert/convert/pem/to/pfx`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertPemToPfxRequest {
    pub cert: String,
    pub privkey: String,
    pub password: String,
}

// ============ Analysis ============

/// Server-side certificate analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertAnalysis {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub not_before: String,
    #[serde(default)]
    pub not_after: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub algorithm: String,
    #[serde(default, rename = "isCA")]
    pub is_ca: bool,
    #[serde(default)]
    pub fingerprint: String,
    #[serde(default)]
    pub public_key: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,
    #[serde(default)]
    pub subject_alt_names: Vec<String>,
}

/// Server-side private key analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateKeyAnalysis {
    #[serde(default)]
    pub algorithm: String,
    #[serde(default)]
    pub key_size: u32,
}

// ============ Wire bodies ============

#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PasswordBody<'a> {
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CommentBody<'a> {
    pub comment: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RenewBody {
    pub expiry: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct AvailableBody {
    pub available: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CaBindingBody<'a> {
    pub ca_uuid: &'a str,
    pub username: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RoleBody<'a> {
    pub username: &'a str,
    pub role: u8,
}

#[derive(Debug, Serialize)]
pub(crate) struct UsernamesBody<'a> {
    pub usernames: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeCertBody {
    pub cert: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeKeyBody<'a> {
    pub privkey: String,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ConvertBody<'a> {
    pub cert: &'a str,
}

/// Certificate, key or conversion output as returned by the server.
///
/// Depending on the endpoint the `data` field is either a bare string or an
/// object carrying the text under one of several names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum TextPayload {
    Plain(String),
    Wrapped {
        #[serde(
            alias = "certificate",
            alias = "privateKey",
            alias = "privkey",
            alias = "cert"
        )]
        data: String,
    },
}

impl Default for TextPayload {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl TextPayload {
    pub fn into_text(self) -> String {
        match self {
            Self::Plain(s) | Self::Wrapped { data: s } => s,
        }
    }

    /// PEM text; base64-wrapped PEM is unwrapped.
    pub fn into_pem(self) -> String {
        decode_pem_text(self.into_text())
    }
}

/// Return `text` as PEM, decoding one layer of base64 when it is not PEM yet.
pub fn decode_pem_text(text: String) -> String {
    use base64::Engine;

    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with("-----BEGIN") {
        return text;
    }
    let compact: String = trimmed.split_whitespace().collect();
    match base64::engine::general_purpose::STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(pem) if pem.trim_start().starts_with("-----BEGIN") => pem,
            _ => text,
        },
        Err(_) => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_clamps() {
        let p = PageRequest::new(0, 0);
        assert_eq!(p, PageRequest { page: 1, limit: 1 });
    }

    #[test]
    fn page_has_more() {
        let page: Page<u8> = Page {
            total: 41,
            list: vec![],
        };
        assert!(page.has_more(PageRequest::new(2, 20)));
        assert!(!page.has_more(PageRequest::new(3, 20)));
    }

    #[test]
    fn role_codes() {
        for role in Role::ALL {
            assert_eq!(Role::from_code(role.code()), Some(role));
        }
        assert_eq!(role_name(9), "Unknown");
        assert_eq!(role_name(2), "Admin");
    }

    #[test]
    fn chain_flags() {
        assert_eq!(ChainOption::Bare.flags(), (false, false));
        assert_eq!(ChainOption::FullWithRoot.flags(), (true, true));
        assert_eq!(ChainOption::FullWithoutRoot.flags(), (true, false));
    }

    #[test]
    fn ca_kind_from_hierarchy() {
        let mut ca = CaCert::default();
        assert_eq!(ca.kind(), CaKind::Root);
        ca.parent_ca = Some(String::new());
        assert_eq!(ca.kind(), CaKind::Root);
        ca.parent_ca = Some("parent".into());
        assert_eq!(ca.kind(), CaKind::Leaf);
        ca.allow_sub_ca = true;
        assert_eq!(ca.kind(), CaKind::Intermediate);
    }

    #[test]
    fn deserialize_ca_cert_camel_case() {
        let json = r#"{"uuid":"u1","owner":"alice","allowSubCa":true,"parentCa":"p","comment":"c","available":true,"notBefore":"2024-01-01T00:00:00","notAfter":"2034-01-01T00:00:00"}"#;
        let ca: CaCert = serde_json::from_str(json).unwrap();
        assert_eq!(ca.owner, "alice");
        assert!(ca.allow_sub_ca);
        assert_eq!(ca.parent_ca.as_deref(), Some("p"));
    }

    #[test]
    fn deserialize_analysis_is_ca_field() {
        let json = r#"{"subject":"CN=x","isCA":true,"extensions":{"2.5.29.19":"CA:TRUE"}}"#;
        let a: CertAnalysis = serde_json::from_str(json).unwrap();
        assert!(a.is_ca);
        assert_eq!(a.extensions.len(), 1);
    }

    #[test]
    fn serialize_ssl_request_skips_empty() {
        let req = RequestSslCertRequest {
            ca_uuid: "ca".into(),
            common_name: "example.com".into(),
            expiry: 365,
            ..Default::default()
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["caUuid"], "ca");
        assert_eq!(v["commonName"], "example.com");
        assert!(v.get("subjectAltNames").is_none());
        assert!(v.get("keySize").is_none());
    }

    #[test]
    fn null_page_list_defaults_to_empty() {
        let page: Page<SslCert> = serde_json::from_str(r#"{"total":0}"#).unwrap();
        assert!(page.list.is_empty());
    }

    #[test]
    fn text_payload_shapes() {
        let plain: TextPayload = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(plain.into_text(), "abc");
        let wrapped: TextPayload = serde_json::from_str(r#"{"privateKey":"k"}"#).unwrap();
        assert_eq!(wrapped.into_text(), "k");
        let cert: TextPayload = serde_json::from_str(r#"{"certificate":"c"}"#).unwrap();
        assert_eq!(cert.into_text(), "c");
    }

    #[test]
    fn pem_text_passthrough_and_base64() {
        use base64::Engine;
        let pem = "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n";
        assert_eq!(decode_pem_text(pem.to_string()), pem);
        let encoded = base64::engine::general_purpose::STANDARD.encode(pem);
        assert_eq!(decode_pem_text(encoded), pem);
        assert_eq!(decode_pem_text("not pem".to_string()), "not pem");
    }
}
