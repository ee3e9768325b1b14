use async_trait::async_trait;

use crate::client::{CertVaultClient, page_query, segment};
use crate::error::Result;
use crate::traits::{SessionControl, UserApi};
use crate::types::{LoginRecord, Page, PageRequest, UpdateProfileRequest, UserProfile};

#[async_trait]
impl UserApi for CertVaultClient {
    async fn profile(&self) -> Result<UserProfile> {
        self.get("/api/v1/user/profile").await
    }

    async fn update_profile(&self, req: &UpdateProfileRequest) -> Result<()> {
        let _: serde_json::Value = self.patch("/api/v1/user/profile", req).await?;
        Ok(())
    }

    async fn list_login_records(&self, page: PageRequest) -> Result<Page<LoginRecord>> {
        self.get(&format!("/api/v1/user/session{}", page_query(page)))
            .await
    }

    async fn logout_login_record(&self, uuid: &str) -> Result<()> {
        let _: serde_json::Value = self
            .delete(&format!("/api/v1/user/session/{}/logout", segment(uuid)))
            .await?;
        Ok(())
    }

    async fn logout_all_sessions(&self) -> Result<()> {
        let _: serde_json::Value = self.delete("/api/v1/user/logout").await?;
        self.set_session(None);
        Ok(())
    }
}
