//! 인증 팝업 창 포트.
//!
//! OAuth 인증 URL을 별도 브라우징 컨텍스트로 열고 닫힘 여부를 확인한다.

use crate::models::oauth::AuthWindowSpec;

/// 열린 인증 창 핸들
pub trait AuthWindow: Send + Sync {
    /// 사용자가 창을 닫았는지
    fn is_closed(&self) -> bool;
}

/// 인증 창 열기
pub trait AuthWindowOpener: Send + Sync {
    /// 창 열기. 팝업 차단 등으로 열 수 없으면 None.
    fn open(&self, url: &str, spec: &AuthWindowSpec) -> Option<Box<dyn AuthWindow>>;
}
