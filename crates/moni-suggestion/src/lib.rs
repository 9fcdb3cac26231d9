//! # moni-suggestion
//!
//! 제안 라이프사이클 엔진.
//! 티켓의 AI 답변 제안을 페이지 단위로 조회하고, 평가/초안 삽입/보낸 답변 기록을
//! 처리하며, 고객 메시지가 들어오면 새 제안이 생성될 때까지 폴링한다.
//! 모든 기능은 외부 계정 OAuth 연결 상태로 게이팅된다.
//!
//! ## 구성 (하위 → 상위)
//!
//! - [`polling`] — 간격/타임아웃 기반 단일 세션 폴링 스케줄러
//! - [`oauth`] — OAuth 연결 상태 머신 + 팝업 인증 플로우
//! - [`store`] — 제안 목록, 페이지네이션, 평가, 사용 기록
//! - [`events`] — 호스트 이벤트 핸들러 레지스트리
//! - [`bridge`] — 티켓 라이프사이클 이벤트 → 저장소/폴링
//! - [`context`] — 티켓 하나에 대한 위 구성요소 소유/수명 관리
//! - [`presenter`] — Suggestion → 표시용 데이터 변환

pub mod bridge;
pub mod context;
pub mod events;
pub mod oauth;
pub mod polling;
pub mod presenter;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
