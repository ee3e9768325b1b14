//! CertVault HTTP client

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::http_client::{HttpUtils, SESSION_COOKIE};
use crate::traits::SessionControl;
use crate::types::PageRequest;

/// Default connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// `User-Agent` sent with every request.
pub fn user_agent() -> String {
    format!(
        "Mozilla/5.0 (Linux) CertVaultCLIX/{}",
        env!("CARGO_PKG_VERSION")
    )
}

/// Client for one CertVault server.
///
/// Cheap to share behind an `Arc`; the session token and base URL are
/// interior-mutable so that a login on one task is visible to the next.
pub struct CertVaultClient {
    pub(crate) http: Client,
    base_url: RwLock<String>,
    session: RwLock<SessionSlot>,
}

/// Token plus a generation bumped by every explicit `set_session`.
///
/// A response may only refresh the token if no explicit change happened
/// while its request was in flight.
#[derive(Debug, Default)]
struct SessionSlot {
    token: Option<String>,
    generation: u64,
}

impl std::fmt::Debug for CertVaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertVaultClient")
            .field("base_url", &self.base_url())
            .field("has_session", &self.session().is_some())
            .finish_non_exhaustive()
    }
}

impl CertVaultClient {
    /// Build a client for `base_url` without a session.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .user_agent(user_agent())
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: RwLock::new(normalize_base_url(base_url)),
            session: RwLock::new(SessionSlot::default()),
        })
    }

    /// Build a client and restore a persisted session token.
    pub fn with_session(base_url: &str, session: Option<String>) -> Result<Self> {
        let client = Self::new(base_url)?;
        client.set_session(session);
        Ok(client)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }

    /// Send one request and decode the envelope payload.
    pub(crate) async fn send<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let (token, generation) = self.session_snapshot();
        let mut builder = self.http.request(method.clone(), self.url(path));
        if let Some(token) = token {
            builder = builder.header(COOKIE, format!("{SESSION_COOKIE}={token}"));
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let raw = HttpUtils::execute_request(builder, method.as_str(), path).await?;
        if let Some(token) = raw.session_cookie {
            self.refresh_session(generation, token);
        }
        HttpUtils::decode_envelope(raw.status, &raw.body)
    }

    fn session_snapshot(&self) -> (Option<String>, u64) {
        let slot = self.session.read().unwrap_or_else(PoisonError::into_inner);
        (slot.token.clone(), slot.generation)
    }

    /// Store a token from `Set-Cookie` unless the session was replaced or
    /// cleared after the request was sent.
    fn refresh_session(&self, generation: u64, token: String) {
        let mut slot = self.session.write().unwrap_or_else(PoisonError::into_inner);
        if slot.generation != generation {
            log::debug!("[certvault] Ignoring session cookie from a superseded request");
            return;
        }
        log::debug!("[certvault] Session cookie refreshed");
        slot.token = Some(token).filter(|t| !t.is_empty());
    }

    pub(crate) async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.send::<T, ()>(Method::GET, path, None).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.send(Method::PATCH, path, Some(body)).await
    }

    pub(crate) async fn delete<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.send::<T, ()>(Method::DELETE, path, None).await
    }
}

impl SessionControl for CertVaultClient {
    fn session(&self) -> Option<String> {
        self.session_snapshot().0
    }

    fn set_session(&self, session: Option<String>) {
        let mut slot = self.session.write().unwrap_or_else(PoisonError::into_inner);
        slot.token = session.filter(|s| !s.is_empty());
        slot.generation += 1;
    }

    fn base_url(&self) -> String {
        self.base_url
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_base_url(&self, url: &str) {
        *self.base_url.write().unwrap_or_else(PoisonError::into_inner) = normalize_base_url(url);
    }
}

/// Trim whitespace and trailing slashes.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// `?page=..&limit=..` query suffix.
pub(crate) fn page_query(page: PageRequest) -> String {
    let page = page.validated();
    format!("?page={}&limit={}", page.page, page.limit)
}

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_normalized() {
        assert_eq!(
            normalize_base_url(" https://vault.example.com/ "),
            "https://vault.example.com"
        );
        assert_eq!(normalize_base_url("http://h:1888//"), "http://h:1888");
    }

    #[test]
    fn empty_session_is_cleared() {
        let client = CertVaultClient::new("http://localhost:1888").unwrap();
        client.set_session(Some("abc".into()));
        assert_eq!(client.session().as_deref(), Some("abc"));
        client.set_session(Some(String::new()));
        assert_eq!(client.session(), None);
    }

    #[test]
    fn cookie_from_superseded_request_is_dropped() {
        let client =
            CertVaultClient::with_session("http://a", Some("old".to_string())).unwrap();
        let (_, generation) = client.session_snapshot();
        client.refresh_session(generation, "fresh".into());
        assert_eq!(client.session().as_deref(), Some("fresh"));

        // cleared while the request was in flight
        let (_, generation) = client.session_snapshot();
        client.set_session(None);
        client.refresh_session(generation, "stale".into());
        assert_eq!(client.session(), None);
    }

    #[test]
    fn set_base_url_keeps_session() {
        let client =
            CertVaultClient::with_session("http://a", Some("tok".to_string())).unwrap();
        client.set_base_url("http://b/");
        assert_eq!(client.base_url(), "http://b");
        assert_eq!(client.session().as_deref(), Some("tok"));
    }

    #[test]
    fn page_query_is_one_based() {
        assert_eq!(page_query(PageRequest::new(0, 20)), "?page=1&limit=20");
        assert_eq!(page_query(PageRequest::new(3, 10)), "?page=3&limit=10");
    }

    #[test]
    fn user_agent_carries_version() {
        assert!(user_agent().starts_with("Mozilla/5.0 (Linux) CertVaultCLIX/"));
    }

    #[test]
    fn segment_is_encoded() {
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
    }
}
