use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::client::{CertVaultClient, page_query, segment};
use crate::error::Result;
use crate::traits::CertApi;
use crate::types::{
    AnalyzeCertBody, AnalyzeKeyBody, CaCert, CertAnalysis, ChainOption, CommentBody, ConvertBody,
    ConvertPemToPfxRequest, Page, PageRequest, PasswordBody, PrivateKeyAnalysis, RenewBody,
    RequestSslCertRequest, SslCert, TextPayload,
};

/// `chain=..&needRootCa=..` query suffix.
pub(super) fn chain_query(flag: &str, chain: ChainOption) -> String {
    let (chain, need_root) = chain.flags();
    format!("?{flag}={chain}&needRootCa={need_root}")
}

#[async_trait]
impl CertApi for CertVaultClient {
    async fn list_user_cas(&self, page: PageRequest) -> Result<Page<CaCert>> {
        self.get(&format!("/api/v1/user/cert/ca{}", page_query(page)))
            .await
    }

    async fn user_ca_cert(&self, uuid: &str, chain: ChainOption) -> Result<String> {
        let path = format!(
            "/api/v1/user/cert/ca/{}/cer{}",
            segment(uuid),
            chain_query("chain", chain)
        );
        let payload: TextPayload = self.get(&path).await?;
        Ok(payload.into_pem())
    }

    async fn list_ssl_certs(&self, page: PageRequest) -> Result<Page<SslCert>> {
        self.get(&format!("/api/v1/user/cert/ssl{}", page_query(page)))
            .await
    }

    async fn ssl_cert(&self, uuid: &str, chain: ChainOption) -> Result<String> {
        let path = format!(
            "/api/v1/user/cert/ssl/{}/cer{}",
            segment(uuid),
            chain_query("chain", chain)
        );
        let payload: TextPayload = self.get(&path).await?;
        Ok(payload.into_pem())
    }

    async fn ssl_private_key(&self, uuid: &str, password: &str) -> Result<String> {
        let payload: TextPayload = self
            .post(
                &format!("/api/v1/user/cert/ssl/{}/privkey", segment(uuid)),
                &PasswordBody { password },
            )
            .await?;
        Ok(payload.into_pem())
    }

    async fn request_ssl_cert(&self, req: &RequestSslCertRequest) -> Result<SslCert> {
        self.post("/api/v1/user/cert/ssl", req).await
    }

    async fn renew_ssl_cert(&self, uuid: &str, days: u32) -> Result<SslCert> {
        self.put(
            &format!("/api/v1/user/cert/ssl/{}", segment(uuid)),
            &RenewBody { expiry: days },
        )
        .await
    }

    async fn delete_ssl_cert(&self, uuid: &str) -> Result<()> {
        let _: serde_json::Value = self
            .delete(&format!("/api/v1/user/cert/ssl/{}", segment(uuid)))
            .await?;
        Ok(())
    }

    async fn update_ssl_comment(&self, uuid: &str, comment: &str) -> Result<()> {
        let _: serde_json::Value = self
            .patch(
                &format!("/api/v1/user/cert/ssl/{}/comment", segment(uuid)),
                &CommentBody { comment },
            )
            .await?;
        Ok(())
    }

    async fn analyze_cert(&self, pem: &str) -> Result<CertAnalysis> {
        let body = AnalyzeCertBody {
            cert: STANDARD.encode(pem.as_bytes()),
        };
        self.post("/api/v1/user/cert/analyze", &body).await
    }

    async fn analyze_private_key(&self, pem: &str, password: &str) -> Result<PrivateKeyAnalysis> {
        let body = AnalyzeKeyBody {
            privkey: STANDARD.encode(pem.as_bytes()),
            password,
        };
        self.post("/api/v1/user/cert/privkey/analyze", &body).await
    }

    async fn convert_pem_to_der(&self, pem: &str) -> Result<String> {
        let payload: TextPayload = self
            .post("/api/v1/user/cert/convert/pem/to/der", &ConvertBody { cert: pem })
            .await?;
        Ok(payload.into_text())
    }

    async fn convert_der_to_pem(&self, der: &str) -> Result<String> {
        let payload: TextPayload = self
            .post("/api/v1/user/cert/convert/der/to/pem", &ConvertBody { cert: der })
            .await?;
        Ok(payload.into_pem())
    }

    async fn convert_pem_to_pfx(&self, req: &ConvertPemToPfxRequest) -> Result<String> {
        let payload: TextPayload = self
            .post("/api/v1/user/cert/convert/pem/to/pfx", req)
            .await?;
        Ok(payload.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_query_flags() {
        assert_eq!(
            chain_query("chain", ChainOption::Bare),
            "?chain=false&needRootCa=false"
        );
        assert_eq!(
            chain_query("isChain", ChainOption::FullWithRoot),
            "?isChain=true&needRootCa=true"
        );
        assert_eq!(
            chain_query("chain", ChainOption::FullWithoutRoot),
            "?chain=true&needRootCa=false"
        );
    }
}
