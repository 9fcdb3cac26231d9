//! # moni-app
//!
//! moni-desk 조립 계층.
//! 포트 구현을 주입받아 제안/배송 기능을 부트스트랩하고 정리한다.
//!
//! - [`shell`] — 기능 플래그 확인, OAuth 게이트 확인, 초기 조회
//! - [`host`] — 고정 값 기반 호스트/인증 창 어댑터 (CLI, 테스트)
//! - [`lifecycle`] — 종료 신호와 폴링 대기

pub mod host;
pub mod lifecycle;
pub mod shell;
