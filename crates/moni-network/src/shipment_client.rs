//! 배송 API 클라이언트.
//!
//! `ShipmentApi` 포트 구현. 배송 API는 쿼리 문자열 토큰으로 인증하고
//! `paqato-*` 시스템 헤더를 요구한다.

use async_trait::async_trait;
use moni_core::config::{ShipmentApiConfig, TOKEN_PLACEHOLDER};
use moni_core::error::CoreError;
use moni_core::models::shipment::{FileDownload, ShipmentsPage};
use moni_core::ports::request_proxy::{HttpMethod, ProxyRequest, RequestProxy};
use moni_core::ports::shipment_api::ShipmentApi;
use std::sync::Arc;
use tracing::debug;

/// 쿼리 값 URL 인코딩
fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// 배송 API 클라이언트
pub struct ShipmentApiClient {
    proxy: Arc<dyn RequestProxy>,
    config: ShipmentApiConfig,
}

impl ShipmentApiClient {
    /// 새 클라이언트 생성
    pub fn new(proxy: Arc<dyn RequestProxy>, config: ShipmentApiConfig) -> Self {
        Self { proxy, config }
    }

    /// 시스템 헤더가 포함된 GET 요청
    fn get(&self, path_and_query: &str) -> ProxyRequest {
        let url = format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            path_and_query
        );
        ProxyRequest::new(HttpMethod::Get, url)
            .header("paqato-system-name", self.config.system_name.as_str())
            .header("paqato-system-version", self.config.system_version.as_str())
            .header("paqato-plugin-version", self.config.plugin_version.as_str())
    }

    async fn download(&self, path: &str) -> Result<FileDownload, CoreError> {
        let req = self.get(&format!("{path}?token={TOKEN_PLACEHOLDER}"));
        let file: FileDownload = self.proxy.send(req).await?.json()?;
        debug!("문서 수신: {} ({})", file.filename, file.content_type);
        Ok(file)
    }
}

#[async_trait]
impl ShipmentApi for ShipmentApiClient {
    async fn search_shipments(
        &self,
        email: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ShipmentsPage, CoreError> {
        debug!("배송 검색: page={page} size={page_size}");

        let query = format!(
            "/v3/shipments/search?token={TOKEN_PLACEHOLDER}&email={}&page={page}&pageSize={page_size}",
            encode(email)
        );
        let page: ShipmentsPage = self.proxy.send(self.get(&query)).await?.json()?;

        debug!("배송 {}건 수신", page.data.len());
        Ok(page)
    }

    async fn proof_of_delivery(&self, shipment_id: &str) -> Result<FileDownload, CoreError> {
        self.download(&format!(
            "/v3/shipments/{}/proof-of-delivery",
            encode(shipment_id)
        ))
        .await
    }

    async fn signature(
        &self,
        shipment_id: &str,
        signature_id: u64,
    ) -> Result<FileDownload, CoreError> {
        self.download(&format!(
            "/v3/shipments/{}/signatures/{signature_id}",
            encode(shipment_id)
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::HttpRequestProxy;
    use mockito::Matcher;
    use std::time::Duration;

    fn client_for(server: &mockito::ServerGuard) -> ShipmentApiClient {
        let proxy = Arc::new(
            HttpRequestProxy::new(Some("ship_tok".to_string()), Duration::from_secs(5)).unwrap(),
        );
        let config = ShipmentApiConfig {
            base_url: server.url(),
            ..ShipmentApiConfig::default()
        };
        ShipmentApiClient::new(proxy, config)
    }

    #[test]
    fn email_is_url_encoded() {
        assert_eq!(encode("erika+test@example.com"), "erika%2Btest%40example.com");
    }

    #[tokio::test]
    async fn search_sends_token_email_and_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v3/shipments/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("token".into(), "ship_tok".into()),
                Matcher::UrlEncoded("email".into(), "erika+test@example.com".into()),
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("pageSize".into(), "5".into()),
            ]))
            .match_header("paqato-system-name", "zendesk")
            .match_header("paqato-system-version", "1")
            .match_header("paqato-plugin-version", "2.0")
            .with_status(200)
            .with_body(r#"{"data":[],"meta":{"pagination":{"currentPage":2,"maxPage":3,"perPage":5,"total":12}}}"#)
            .create_async()
            .await;

        let page = client_for(&server)
            .search_shipments("erika+test@example.com", 2, 5)
            .await
            .unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.pagination().unwrap().max_page, 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn search_401_is_auth_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v3/shipments/search")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let err = client_for(&server)
            .search_shipments("a@b.c", 1, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Auth(_)));
    }

    #[tokio::test]
    async fn signature_download() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v3/shipments/sh_1/signatures/4")
            .match_query(Matcher::UrlEncoded("token".into(), "ship_tok".into()))
            .with_status(200)
            .with_body(r#"{"data":"aGVsbG8=","contentType":"image/png","filename":"sig.png"}"#)
            .create_async()
            .await;

        let file = client_for(&server).signature("sh_1", 4).await.unwrap();

        assert_eq!(file.filename, "sig.png");
        assert_eq!(file.data, "aGVsbG8=");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn proof_of_delivery_download() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v3/shipments/sh_1/proof-of-delivery")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data":"JVBERg==","contentType":"application/pdf","filename":"pod.pdf"}"#)
            .create_async()
            .await;

        let file = client_for(&server).proof_of_delivery("sh_1").await.unwrap();

        assert_eq!(file.content_type, "application/pdf");
        mock.assert_async().await;
    }
}
