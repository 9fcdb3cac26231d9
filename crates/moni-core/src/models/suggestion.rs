//! 제안 모델.
//!
//! 백엔드에서 페이지 단위로 조회하는 AI 답변 제안과 평가/수정 페이로드.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 제안 ID
pub type SuggestionId = u64;

/// 티켓 ID
pub type TicketId = u64;

/// AI 답변 제안
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// 제안 고유 ID
    pub id: SuggestionId,
    /// 제안 답변 텍스트
    pub text: String,
    /// AI 신뢰도 점수 (0.0 ~ 1.0)
    pub confidence: f64,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
    /// 상담원이 수정해서 보냈는지
    #[serde(default)]
    pub edited: bool,
    /// 상담원 평가
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<SuggestionRating>,
    /// 생성 성공 여부
    #[serde(default)]
    pub is_success: bool,
    /// 생성 실패 사유
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Suggestion {
    /// 신뢰도 등급
    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence)
    }
}

/// 상담원 평가 (별점 + 선택 피드백)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRating {
    pub stars: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// 신뢰도 등급
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// 점수 → 등급 (0.8 이상 High, 0.5 이상 Medium)
    pub fn from_score(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceLevel::High
        } else if confidence >= 0.5 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// 서버 페이지네이션 정보
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub max_page: u32,
    pub per_page: u32,
    pub total: u64,
}

/// `GET /suggestions/{ticketId}` 응답
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionsPage {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// `POST /rating/{id}` 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingPayload {
    pub rating: u8,
    pub feedback: Option<String>,
}

/// `POST /edit/{id}` 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditPayload {
    pub content: String,
}

/// 평가/수정 엔드포인트 공통 응답
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}
