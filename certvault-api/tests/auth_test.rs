//! 认证与会话相关的网关测试

mod common;

use std::time::Duration;

use certvault_api::{ApiError, AuthApi, SessionControl, UserApi};
use common::{TestContext, fail, ok};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

macro_rules! ctx {
    () => {
        match TestContext::new().await {
            Some(ctx) => ctx,
            None => panic!("failed to build test context"),
        }
    };
    ($session:expr) => {
        match TestContext::logged_in($session).await {
            Some(ctx) => ctx,
            None => panic!("failed to build test context"),
        }
    };
}

#[tokio::test]
async fn login_stores_session_cookie() {
    let ctx = ctx!();
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(json!({"username": "alice", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "JSESSIONID=sess-1; Path=/; HttpOnly")
                .set_body_json(ok(json!(null))),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    require_ok!(ctx.client.login("alice", "pw").await);
    assert_eq!(ctx.client.session().as_deref(), Some("sess-1"));
}

#[tokio::test]
async fn login_failure_is_api_error() {
    let ctx = ctx!();
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fail(400, "Bad credentials")))
        .mount(&ctx.server)
        .await;

    let err = ctx.client.login("alice", "wrong").await;
    assert_eq!(
        err,
        Err(ApiError::Api {
            code: 400,
            message: "Bad credentials".into()
        })
    );
    assert_eq!(ctx.client.session(), None);
}

#[tokio::test]
async fn session_cookie_and_user_agent_are_sent() {
    let ctx = ctx!("tok-42");
    Mock::given(method("GET"))
        .and(path("/api/v1/user/profile"))
        .and(header("cookie", "JSESSIONID=tok-42"))
        .and(header("user-agent", certvault_api::user_agent().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "username": "alice",
            "displayName": "Alice",
            "email": "alice@example.com",
            "role": 2
        }))))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let profile = require_ok!(ctx.client.profile().await);
    assert_eq!(profile.display_name, "Alice");
    assert!(profile.is_admin());
    assert!(!profile.is_superadmin());
}

#[tokio::test]
async fn http_401_maps_to_session_expired() {
    let ctx = ctx!("stale");
    Mock::given(method("GET"))
        .and(path("/api/v1/user/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&ctx.server)
        .await;

    let err = ctx.client.profile().await;
    assert_eq!(err, Err(ApiError::SessionExpired));
}

#[tokio::test]
async fn body_code_401_maps_to_session_expired() {
    let ctx = ctx!("stale");
    Mock::given(method("GET"))
        .and(path("/api/v1/user/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fail(401, "Not logged in")))
        .mount(&ctx.server)
        .await;

    let err = ctx.client.profile().await;
    assert!(matches!(err, Err(e) if e.is_session_expired()));
}

#[tokio::test]
async fn logout_clears_session_even_on_failure() {
    let ctx = ctx!("tok");
    Mock::given(method("DELETE"))
        .and(path("/api/v1/auth/logout"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&ctx.server)
        .await;

    let result = ctx.client.logout().await;
    assert!(result.is_err());
    assert_eq!(ctx.client.session(), None);
}

#[tokio::test]
async fn cleared_session_survives_late_set_cookie() {
    let ctx = ctx!("tok");
    Mock::given(method("GET"))
        .and(path("/api/v1/user/profile"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "JSESSIONID=late; Path=/")
                .set_body_json(ok(json!({"username": "alice", "role": 1})))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&ctx.server)
        .await;

    let clear = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        ctx.client.set_session(None);
    };
    let (profile, ()) = tokio::join!(ctx.client.profile(), clear);
    require_ok!(profile);
    assert_eq!(ctx.client.session(), None);
}

#[tokio::test]
async fn ping_no_content() {
    let ctx = ctx!();
    Mock::given(method("GET"))
        .and(path("/api/v1/test/ping"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&ctx.server)
        .await;

    require_ok!(ctx.client.ping().await);
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let client = match certvault_api::CertVaultClient::new("http://127.0.0.1:9") {
        Ok(c) => c,
        Err(e) => panic!("client: {e}"),
    };
    let err = client.ping().await;
    assert!(matches!(err, Err(ApiError::Network(_) | ApiError::Timeout(_))));
}

#[tokio::test]
async fn login_records_page() {
    let ctx = ctx!("tok");
    Mock::given(method("GET"))
        .and(path("/api/v1/user/session"))
        .and(wiremock::matchers::query_param("page", "2"))
        .and(wiremock::matchers::query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(common::page(
            11,
            json!([{
                "uuid": "r1",
                "username": "alice",
                "ipAddress": "10.0.0.1",
                "browser": "Firefox",
                "os": "Linux",
                "loginTime": "2024-06-01T10:00:00",
                "isOnline": true
            }]),
        ))))
        .mount(&ctx.server)
        .await;

    let page = require_ok!(
        ctx.client
            .list_login_records(certvault_api::PageRequest::new(2, 10))
            .await
    );
    assert_eq!(page.total, 11);
    assert_eq!(page.list[0].ip_address, "10.0.0.1");
    assert!(page.list[0].is_online);
}
