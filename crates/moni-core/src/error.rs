//! moni-desk 핵심 에러 타입.
//!
//! 어댑터 crate(network, suggestion, shipment)는 모두 이 타입을 그대로 반환한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 설정, 유효성 검증, API 상태 코드 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 — {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 인증 실패 (401 — API 토큰 오류/만료)
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 라이선스 없음 (403 — 기능 미계약)
    #[error("라이선스 없음: {0}")]
    NotLicensed(String),

    /// 리소스를 찾을 수 없음
    #[error("{resource_type} 미발견: {id}")]
    NotFound {
        /// 리소스 종류 (예: "Suggestion", "Shipment")
        resource_type: String,
        /// 리소스 식별자
        id: String,
    },

    /// 기타 HTTP 에러 응답
    #[error("API 에러 ({status}): {message}")]
    Api {
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문
        message: String,
    },

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 호스트 플랫폼 호출 실패 (초안 읽기/쓰기, 대화 조회 등)
    #[error("호스트 에러: {0}")]
    Host(String),

    /// 바이너리 페이로드 디코딩 실패
    #[error("디코딩 에러: {0}")]
    Decode(String),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

/// API 에러 분류 — 인증 게이트 상태 갱신 여부를 결정한다
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 401: 토큰 오류/만료
    AuthInvalid,
    /// 403: 기능 미계약
    NotLicensed,
    /// 그 외 네트워크/서버 실패
    Unclassified,
}

impl CoreError {
    /// HTTP 상태 코드 → 에러 매핑
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 => CoreError::Auth(body),
            403 => CoreError::NotLicensed(body),
            404 => CoreError::NotFound {
                resource_type: "API".to_string(),
                id: body,
            },
            _ => CoreError::Api {
                status,
                message: body,
            },
        }
    }

    /// 에러 분류
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            CoreError::Auth(_) => ApiErrorKind::AuthInvalid,
            CoreError::NotLicensed(_) => ApiErrorKind::NotLicensed,
            _ => ApiErrorKind::Unclassified,
        }
    }

    /// 에러에 대응하는 HTTP 상태 코드 (알 수 있는 경우)
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Auth(_) => Some(401),
            CoreError::NotLicensed(_) => Some(403),
            CoreError::NotFound { .. } => Some(404),
            CoreError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(CoreError::from_status(401, ""), CoreError::Auth(_)));
        assert!(matches!(
            CoreError::from_status(403, ""),
            CoreError::NotLicensed(_)
        ));
        assert!(matches!(
            CoreError::from_status(404, "x"),
            CoreError::NotFound { .. }
        ));
        assert!(matches!(
            CoreError::from_status(500, "boom"),
            CoreError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn kind_classification() {
        assert_eq!(
            CoreError::from_status(401, "").kind(),
            ApiErrorKind::AuthInvalid
        );
        assert_eq!(
            CoreError::from_status(403, "").kind(),
            ApiErrorKind::NotLicensed
        );
        assert_eq!(
            CoreError::Network("timeout".to_string()).kind(),
            ApiErrorKind::Unclassified
        );
        assert_eq!(
            CoreError::from_status(502, "").kind(),
            ApiErrorKind::Unclassified
        );
    }

    #[test]
    fn status_roundtrip() {
        assert_eq!(CoreError::from_status(418, "teapot").status(), Some(418));
        assert_eq!(CoreError::Host("x".to_string()).status(), None);
    }
}
