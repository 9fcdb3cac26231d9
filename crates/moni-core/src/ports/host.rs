//! 호스트 티켓 워크스페이스 포트.
//!
//! 구현: 호스트 플랫폼 어댑터 (브리지/임베딩 측), 테스트에서는 인메모리 fake.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::suggestion::TicketId;
use crate::models::ticket::{AccountContext, AppMetadata, ConversationMessage};

/// 호스트 플랫폼 — 티켓 데이터 읽기, 초안 읽기/쓰기
#[async_trait]
pub trait TicketHost: Send + Sync {
    /// 앱 메타데이터 (설정, 기능 플래그)
    async fn metadata(&self) -> Result<AppMetadata, CoreError>;

    /// 계정 컨텍스트 (서브도메인)
    async fn account_context(&self) -> Result<AccountContext, CoreError>;

    /// 현재 티켓 ID
    async fn ticket_id(&self) -> Result<Option<TicketId>, CoreError>;

    /// 요청자 이메일
    async fn requester_email(&self) -> Result<Option<String>, CoreError>;

    /// 현재 사용자 로케일
    async fn user_locale(&self) -> Result<String, CoreError>;

    /// 현재 초안 텍스트 (HTML)
    async fn comment_text(&self) -> Result<String, CoreError>;

    /// 초안 텍스트 설정
    ///
    /// `html`은 이미 이스케이프된 HTML이어야 한다.
    async fn set_comment_text(&self, html: &str) -> Result<(), CoreError>;

    /// 티켓 대화 (오래된 순)
    async fn conversation(&self) -> Result<Vec<ConversationMessage>, CoreError>;
}
