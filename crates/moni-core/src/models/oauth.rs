//! OAuth 연결 상태와 OAuth 엔드포인트 모델.

use serde::{Deserialize, Serialize};

/// 외부 계정 OAuth 연결 상태
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OAuthState {
    /// 아직 확인하지 않았거나 분류 불가 실패
    #[default]
    Unknown,
    /// 연결됨
    Connected,
    /// 연결 안 됨 (인증 플로우 필요)
    NotConnected,
    /// 기능 미계약 (403)
    NotLicensed,
    /// API 키 오류 (401)
    ApiKeyInvalid,
}

impl std::fmt::Display for OAuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OAuthState::Unknown => write!(f, "unknown"),
            OAuthState::Connected => write!(f, "connected"),
            OAuthState::NotConnected => write!(f, "not-connected"),
            OAuthState::NotLicensed => write!(f, "not-licensed"),
            OAuthState::ApiKeyInvalid => write!(f, "api-key-invalid"),
        }
    }
}

/// `GET /oauth/status` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthStatusResponse {
    pub connected: bool,
    #[serde(default)]
    pub subdomain: Option<String>,
}

/// `POST /oauth/init` 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthInitPayload {
    pub subdomain: String,
}

/// `POST /oauth/init` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthInitResponse {
    pub authorize_url: String,
}

/// 인증 팝업 창 사양
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthWindowSpec {
    /// 창 이름 (같은 이름이면 기존 창 재사용)
    pub name: String,
    pub width: u32,
    pub height: u32,
}
