use async_trait::async_trait;

use crate::client::{CertVaultClient, segment};
use crate::error::Result;
use crate::traits::SuperadminApi;
use crate::types::{
    AllSession, CreateUserRequest, Page, PageRequest, RoleBody, UpdateUserRequest, UsernamesBody,
};

/// The superadmin session endpoints name the page size `size`.
fn size_query(page: PageRequest) -> String {
    let page = page.validated();
    format!("?page={}&size={}", page.page, page.limit)
}

#[async_trait]
impl SuperadminApi for CertVaultClient {
    async fn list_all_sessions(&self, page: PageRequest) -> Result<Page<AllSession>> {
        self.get(&format!("/api/v1/superadmin/user/session{}", size_query(page)))
            .await
    }

    async fn list_sessions_of(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<Page<AllSession>> {
        self.get(&format!(
            "/api/v1/superadmin/user/session/{}{}",
            segment(username),
            size_query(page)
        ))
        .await
    }

    async fn force_logout(&self, username: &str) -> Result<()> {
        let _: serde_json::Value = self
            .delete(&format!(
                "/api/v1/superadmin/user/{}/logout",
                segment(username)
            ))
            .await?;
        Ok(())
    }

    async fn create_user(&self, req: &CreateUserRequest) -> Result<()> {
        let _: serde_json::Value = self.post("/api/v1/superadmin/user", req).await?;
        Ok(())
    }

    async fn delete_users(&self, usernames: &[String]) -> Result<()> {
        let _: serde_json::Value = self
            .post("/api/v1/superadmin/users/delete", &UsernamesBody { usernames })
            .await?;
        Ok(())
    }

    async fn update_user(&self, username: &str, req: &UpdateUserRequest) -> Result<()> {
        let _: serde_json::Value = self
            .patch(&format!("/api/v1/superadmin/user/{}", segment(username)), req)
            .await?;
        Ok(())
    }

    async fn update_role(&self, username: &str, role: u8) -> Result<()> {
        let _: serde_json::Value = self
            .patch("/api/v1/superadmin/user/role", &RoleBody { username, role })
            .await?;
        Ok(())
    }
}
