//! 제안 백엔드 API 클라이언트.
//!
//! `SuggestionApi` 포트 구현. 모든 요청은 `RequestProxy`를 경유하며
//! `Authorization: Bearer {{setting.token}}` 헤더를 붙인다.

use async_trait::async_trait;
use moni_core::config::{ApiConfig, TOKEN_PLACEHOLDER};
use moni_core::error::CoreError;
use moni_core::models::oauth::{OAuthInitPayload, OAuthInitResponse, OAuthStatusResponse};
use moni_core::models::suggestion::{
    EditPayload, RatingPayload, SuccessResponse, SuggestionId, SuggestionsPage, TicketId,
};
use moni_core::ports::request_proxy::{HttpMethod, ProxyRequest, RequestProxy};
use moni_core::ports::suggestion_api::SuggestionApi;
use std::sync::Arc;
use tracing::debug;

/// 제안 API 클라이언트
pub struct SuggestionApiClient {
    proxy: Arc<dyn RequestProxy>,
    endpoint_root: String,
}

impl SuggestionApiClient {
    /// 새 클라이언트 생성
    pub fn new(proxy: Arc<dyn RequestProxy>, config: &ApiConfig) -> Self {
        Self {
            proxy,
            endpoint_root: config.endpoint_root(),
        }
    }

    /// 인증 헤더가 포함된 요청
    fn request(&self, method: HttpMethod, endpoint: &str) -> ProxyRequest {
        ProxyRequest::new(method, format!("{}{}", self.endpoint_root, endpoint))
            .header("Authorization", format!("Bearer {TOKEN_PLACEHOLDER}"))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
    }

    /// 제안 목록 경로 (1페이지는 쿼리 없음)
    fn suggestions_endpoint(ticket_id: TicketId, page: u32) -> String {
        if page > 1 {
            format!("/suggestions/{ticket_id}?page={page}")
        } else {
            format!("/suggestions/{ticket_id}")
        }
    }
}

#[async_trait]
impl SuggestionApi for SuggestionApiClient {
    async fn get_suggestions(
        &self,
        ticket_id: TicketId,
        page: u32,
    ) -> Result<SuggestionsPage, CoreError> {
        debug!("제안 조회: ticket={ticket_id} page={page}");

        let endpoint = Self::suggestions_endpoint(ticket_id, page);
        let resp = self
            .proxy
            .send(self.request(HttpMethod::Get, &endpoint))
            .await?;
        let page: SuggestionsPage = resp.json()?;

        debug!(
            "제안 {}개 수신 (전체 {})",
            page.suggestions.len(),
            page.total_count
        );
        Ok(page)
    }

    async fn submit_rating(
        &self,
        suggestion_id: SuggestionId,
        rating: u8,
        feedback: Option<&str>,
    ) -> Result<SuccessResponse, CoreError> {
        debug!("평가 전송: {suggestion_id} → {rating}점");

        let payload = RatingPayload {
            rating,
            feedback: feedback.map(str::to_string),
        };
        let req = self
            .request(HttpMethod::Post, &format!("/rating/{suggestion_id}"))
            .json(&payload)?;
        self.proxy.send(req).await?.json()
    }

    async fn edit_suggestion(
        &self,
        suggestion_id: SuggestionId,
        content: &str,
    ) -> Result<SuccessResponse, CoreError> {
        debug!("보낸 답변 기록: {suggestion_id} ({}자)", content.chars().count());

        let payload = EditPayload {
            content: content.to_string(),
        };
        let req = self
            .request(HttpMethod::Post, &format!("/edit/{suggestion_id}"))
            .json(&payload)?;
        self.proxy.send(req).await?.json()
    }

    async fn oauth_status(&self) -> Result<OAuthStatusResponse, CoreError> {
        let resp = self
            .proxy
            .send(self.request(HttpMethod::Get, "/oauth/status"))
            .await?;
        resp.json()
    }

    async fn init_oauth(&self, subdomain: &str) -> Result<OAuthInitResponse, CoreError> {
        debug!("OAuth 초기화: subdomain={subdomain}");

        let payload = OAuthInitPayload {
            subdomain: subdomain.to_string(),
        };
        let req = self
            .request(HttpMethod::Post, "/oauth/init")
            .json(&payload)?;
        self.proxy.send(req).await?.json()
    }
}
