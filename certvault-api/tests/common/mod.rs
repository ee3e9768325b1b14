//! 共享测试工具和辅助函数

#![allow(dead_code)]

use certvault_api::{CertVaultClient, SessionControl};
use serde_json::{Value, json};
use wiremock::MockServer;

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 成功响应信封
pub fn ok(data: Value) -> Value {
    json!({
        "code": 200,
        "msg": "Success",
        "data": data,
        "timestamp": "2024-06-01T12:00:00"
    })
}

/// 业务错误响应信封
pub fn fail(code: i64, msg: &str) -> Value {
    json!({
        "code": code,
        "msg": msg,
        "data": null,
        "timestamp": "2024-06-01T12:00:00"
    })
}

/// 分页数据
pub fn page(total: u64, list: Value) -> Value {
    json!({ "total": total, "list": list })
}

pub struct TestContext {
    pub server: MockServer,
    pub client: CertVaultClient,
}

impl TestContext {
    /// 启动 mock 服务器并创建未登录的客户端
    pub async fn new() -> Option<Self> {
        let server = MockServer::start().await;
        let client = CertVaultClient::new(&server.uri()).ok()?;
        Some(Self { server, client })
    }

    /// 启动 mock 服务器并创建持有会话的客户端
    pub async fn logged_in(session: &str) -> Option<Self> {
        let ctx = Self::new().await?;
        ctx.client.set_session(Some(session.to_string()));
        Some(ctx)
    }
}
