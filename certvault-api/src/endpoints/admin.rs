use async_trait::async_trait;

use super::cert::chain_query;
use crate::client::{CertVaultClient, page_query, segment};
use crate::error::Result;
use crate::traits::AdminApi;
use crate::types::{
    AvailableBody, CaBindingBody, CaCert, ChainOption, CommentBody, ImportCaRequest, Page,
    PageRequest, PasswordBody, RenewBody, RequestCaCertRequest, TextPayload, UserProfile,
};

#[async_trait]
impl AdminApi for CertVaultClient {
    async fn list_users(&self, page: PageRequest) -> Result<Page<UserProfile>> {
        self.get(&format!("/api/v1/admin/users{}", page_query(page)))
            .await
    }

    async fn count_users(&self) -> Result<u64> {
        self.get("/api/v1/admin/users/count").await
    }

    async fn list_admin_cas(&self, page: PageRequest) -> Result<Page<CaCert>> {
        self.get(&format!("/api/v1/admin/cert/ca{}", page_query(page)))
            .await
    }

    async fn count_cas(&self) -> Result<u64> {
        self.get("/api/v1/admin/cert/ca/count").await
    }

    async fn admin_ca_cert(&self, uuid: &str, chain: ChainOption) -> Result<String> {
        let path = format!(
            "/api/v1/admin/cert/ca/{}/cer{}",
            segment(uuid),
            chain_query("isChain", chain)
        );
        let payload: TextPayload = self.get(&path).await?;
        Ok(payload.into_pem())
    }

    async fn admin_ca_private_key(&self, uuid: &str, password: &str) -> Result<String> {
        let payload: TextPayload = self
            .post(
                &format!("/api/v1/admin/cert/ca/{}/privkey", segment(uuid)),
                &PasswordBody { password },
            )
            .await?;
        Ok(payload.into_pem())
    }

    async fn update_ca_comment(&self, uuid: &str, comment: &str) -> Result<()> {
        let _: serde_json::Value = self
            .patch(
                &format!("/api/v1/admin/cert/ca/{}/comment", segment(uuid)),
                &CommentBody { comment },
            )
            .await?;
        Ok(())
    }

    async fn set_ca_available(&self, uuid: &str, available: bool) -> Result<()> {
        let _: serde_json::Value = self
            .patch(
                &format!("/api/v1/admin/cert/ca/{}/available", segment(uuid)),
                &AvailableBody { available },
            )
            .await?;
        Ok(())
    }

    async fn import_ca(&self, req: &ImportCaRequest) -> Result<CaCert> {
        self.post("/api/v1/admin/cert/ca/import", req).await
    }

    async fn request_ca(&self, req: &RequestCaCertRequest) -> Result<CaCert> {
        self.post("/api/v1/admin/cert/ca", req).await
    }

    async fn renew_ca(&self, uuid: &str, days: u32) -> Result<CaCert> {
        self.put(
            &format!("/api/v1/admin/cert/ca/{}", segment(uuid)),
            &RenewBody { expiry: days },
        )
        .await
    }

    async fn delete_ca(&self, uuid: &str) -> Result<()> {
        let _: serde_json::Value = self
            .delete(&format!("/api/v1/admin/cert/ca/{}", segment(uuid)))
            .await?;
        Ok(())
    }

    async fn bind_user(&self, ca_uuid: &str, username: &str) -> Result<()> {
        let _: serde_json::Value = self
            .post(
                "/api/v1/admin/cert/ca/bind/create",
                &CaBindingBody { ca_uuid, username },
            )
            .await?;
        Ok(())
    }

    async fn unbind_user(&self, ca_uuid: &str, username: &str) -> Result<()> {
        let _: serde_json::Value = self
            .post(
                "/api/v1/admin/cert/ca/bind/delete",
                &CaBindingBody { ca_uuid, username },
            )
            .await?;
        Ok(())
    }

    async fn list_bound_users(
        &self,
        ca_uuid: &str,
        page: PageRequest,
    ) -> Result<Page<UserProfile>> {
        self.get(&format!(
            "/api/v1/admin/cert/ca/{}/bind{}",
            segment(ca_uuid),
            page_query(page)
        ))
        .await
    }

    async fn list_unbound_users(
        &self,
        ca_uuid: &str,
        page: PageRequest,
    ) -> Result<Page<UserProfile>> {
        self.get(&format!(
            "/api/v1/admin/cert/ca/{}/bind/not{}",
            segment(ca_uuid),
            page_query(page)
        ))
        .await
    }
}
