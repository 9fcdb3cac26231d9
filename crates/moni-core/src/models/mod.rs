//! moni-desk 도메인 모델.
//!
//! 백엔드/호스트와 주고받는 데이터 구조체를 정의한다.
//! 와이어 포맷 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod app;
pub mod oauth;
pub mod shipment;
pub mod suggestion;
pub mod ticket;
