//! # moni-shipment
//!
//! 티켓 요청자의 배송 이력.
//!
//! - [`browser`] — 이메일 기반 배송 검색, 페이지 이동, 추적 이벤트 모달 선택
//! - [`download`] — 배송 완료 증빙/서명 문서 다운로드 (base64 디코딩)
//! - [`format`] — 추적 이벤트 위치/정보/시각 표시 문자열

pub mod browser;
pub mod download;
pub mod format;

#[cfg(test)]
pub(crate) mod test_support;
