//! # moni-core
//!
//! moni-desk 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 도메인 데이터 구조체 (serde Serialize/Deserialize)
//! - [`ports`] — Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 애플리케이션 설정 구조체
//! - [`text`] — 초안 HTML 변환, 일반 텍스트 추출
//! - [`locale`] — 지원 로케일 매핑

pub mod config;
pub mod error;
pub mod locale;
pub mod models;
pub mod ports;
pub mod text;
