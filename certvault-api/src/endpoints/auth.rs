use async_trait::async_trait;

use crate::client::CertVaultClient;
use crate::error::Result;
use crate::traits::{AuthApi, SessionControl};
use crate::types::LoginBody;

#[async_trait]
impl AuthApi for CertVaultClient {
    async fn login(&self, username: &str, password: &str) -> Result<()> {
        let _: serde_json::Value = self
            .post("/api/v1/auth/login", &LoginBody { username, password })
            .await?;
        log::info!("[certvault] Logged in as {username}");
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        let result: Result<serde_json::Value> = self.delete("/api/v1/auth/logout").await;
        self.set_session(None);
        result.map(|_| ())
    }

    async fn oidc_authorization_url(&self) -> Result<String> {
        self.get("/api/v1/auth/oidc/authorization").await
    }

    async fn ping(&self) -> Result<()> {
        let _: serde_json::Value = self.get("/api/v1/test/ping").await?;
        Ok(())
    }
}
