//! Generic HTTP helpers for the CertVault REST API
//!
//! Sending, logging and envelope decoding live here so that every endpoint
//! module only builds a `RequestBuilder` and names the payload type.
//!
//! # Classification
//! - HTTP 401 or envelope `code == 401` → [`ApiError::SessionExpired`]
//! - HTTP 204 → `T::default()`
//! - envelope `code` other than `200` / `0` → [`ApiError::Api`]
//! - non-JSON body with a failing status → [`ApiError::Http`]

use reqwest::RequestBuilder;
use reqwest::header::SET_COOKIE;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::types::ResultEnvelope;
use crate::utils::log_sanitizer::truncate_for_log;

/// Name of the session cookie issued by the server.
pub(crate) const SESSION_COOKIE: &str = "JSESSIONID";

/// Raw response after the body has been read.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub status: u16,
    /// Value of a `JSESSIONID` cookie set by this response, if any.
    pub session_cookie: Option<String>,
    pub body: String,
}

/// HTTP tool function set
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Send the request and read the full body.
    ///
    /// Only transport failures are errors here; status handling is left to
    /// [`decode_envelope`](Self::decode_envelope).
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        path: &str,
    ) -> Result<RawResponse> {
        log::debug!("[certvault] {method_name} {path}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(e.to_string())
            } else if e.is_builder() {
                ApiError::InvalidRequest(e.to_string())
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[certvault] Response Status: {status}");

        let session_cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(session_from_set_cookie);

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {e}")))?;

        log::debug!("[certvault] Response Body: {}", truncate_for_log(&body));

        Ok(RawResponse {
            status,
            session_cookie,
            body,
        })
    }

    /// Turn a raw response into the envelope payload.
    pub fn decode_envelope<T>(status: u16, body: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        if status == 401 {
            log::warn!("[certvault] Session expired (HTTP 401)");
            return Err(ApiError::SessionExpired);
        }
        if status == 204 {
            return Ok(T::default());
        }

        let envelope: ResultEnvelope<T> = match serde_json::from_str(body) {
            Ok(envelope) => envelope,
            Err(e) if (200..300).contains(&status) => {
                log::error!("[certvault] JSON parse failed: {e}");
                log::error!("[certvault] Raw response: {}", truncate_for_log(body));
                return Err(ApiError::Decode(e.to_string()));
            }
            Err(_) => {
                return Err(ApiError::Http {
                    status,
                    body: truncate_for_log(body),
                });
            }
        };

        match envelope.code {
            401 => {
                log::warn!("[certvault] Session expired (code 401)");
                Err(ApiError::SessionExpired)
            }
            0 | 200 => Ok(envelope.data.unwrap_or_default()),
            code => Err(ApiError::Api {
                code,
                message: envelope.msg,
            }),
        }
    }
}

/// Extract the session value from one `Set-Cookie` header.
fn session_from_set_cookie(header: &str) -> Option<String> {
    let pair = header.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    (name.trim() == SESSION_COOKIE).then(|| value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_401_is_session_expired() {
        let r: Result<String> = HttpUtils::decode_envelope(401, "");
        assert_eq!(r, Err(ApiError::SessionExpired));
    }

    #[test]
    fn body_code_401_is_session_expired() {
        let r: Result<String> =
            HttpUtils::decode_envelope(200, r#"{"code":401,"msg":"not login","data":null}"#);
        assert_eq!(r, Err(ApiError::SessionExpired));
    }

    #[test]
    fn no_content_is_default() {
        let r: Result<Vec<u8>> = HttpUtils::decode_envelope(204, "");
        assert_eq!(r, Ok(Vec::new()));
    }

    #[test]
    fn code_zero_and_200_succeed() {
        let r: Result<u64> = HttpUtils::decode_envelope(200, r#"{"code":0,"msg":"","data":7}"#);
        assert_eq!(r, Ok(7));
        let r: Result<u64> = HttpUtils::decode_envelope(200, r#"{"code":200,"msg":"ok","data":8}"#);
        assert_eq!(r, Ok(8));
    }

    #[test]
    fn null_data_is_default() {
        let r: Result<String> =
            HttpUtils::decode_envelope(200, r#"{"code":200,"msg":"ok","data":null}"#);
        assert_eq!(r, Ok(String::new()));
    }

    #[test]
    fn business_error_code() {
        let r: Result<String> =
            HttpUtils::decode_envelope(200, r#"{"code":500,"msg":"CA not found","data":null}"#);
        assert_eq!(
            r,
            Err(ApiError::Api {
                code: 500,
                message: "CA not found".into()
            })
        );
    }

    #[test]
    fn garbage_on_success_is_decode_error() {
        let r: Result<String> = HttpUtils::decode_envelope(200, "<html>");
        assert!(matches!(r, Err(ApiError::Decode(_))));
    }

    #[test]
    fn garbage_on_failure_is_http_error() {
        let r: Result<String> = HttpUtils::decode_envelope(502, "Bad Gateway");
        assert_eq!(
            r,
            Err(ApiError::Http {
                status: 502,
                body: "Bad Gateway".into()
            })
        );
    }

    #[test]
    fn set_cookie_parsing() {
        assert_eq!(
            session_from_set_cookie("JSESSIONID=abc123; Path=/; HttpOnly"),
            Some("abc123".to_string())
        );
        assert_eq!(session_from_set_cookie("other=1; Path=/"), None);
        assert_eq!(session_from_set_cookie("garbage"), None);
    }
}
