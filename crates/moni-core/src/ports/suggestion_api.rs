//! 제안 백엔드 API 포트.
//!
//! 구현: `moni-network::suggestion_client::SuggestionApiClient`

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::oauth::{OAuthInitResponse, OAuthStatusResponse};
use crate::models::suggestion::{SuccessResponse, SuggestionId, SuggestionsPage, TicketId};

/// 제안/평가/수정/OAuth 엔드포인트
#[async_trait]
pub trait SuggestionApi: Send + Sync {
    /// 티켓의 제안 페이지 조회 (page는 1부터)
    async fn get_suggestions(
        &self,
        ticket_id: TicketId,
        page: u32,
    ) -> Result<SuggestionsPage, CoreError>;

    /// 제안 평가 전송
    async fn submit_rating(
        &self,
        suggestion_id: SuggestionId,
        rating: u8,
        feedback: Option<&str>,
    ) -> Result<SuccessResponse, CoreError>;

    /// 실제로 보낸 텍스트 기록
    async fn edit_suggestion(
        &self,
        suggestion_id: SuggestionId,
        content: &str,
    ) -> Result<SuccessResponse, CoreError>;

    /// OAuth 연결 상태 조회
    async fn oauth_status(&self) -> Result<OAuthStatusResponse, CoreError>;

    /// OAuth 인증 URL 발급
    async fn init_oauth(&self, subdomain: &str) -> Result<OAuthInitResponse, CoreError>;
}
