//! # moni-network
//!
//! HTTP 네트워크 어댑터.
//! 호스트 보안 프록시와 같은 계약의 reqwest 기반 [`proxy::HttpRequestProxy`]와,
//! 임의의 `RequestProxy` 위에서 동작하는 제안/배송 API 클라이언트를 제공한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use moni_network::proxy::HttpRequestProxy;
//! use moni_network::suggestion_client::SuggestionApiClient;
//!
//! let proxy = Arc::new(HttpRequestProxy::new(Some(token), Duration::from_secs(30))?);
//! let api = SuggestionApiClient::new(proxy, &config.api);
//! ```

pub mod proxy;
pub mod shipment_client;
pub mod suggestion_client;
