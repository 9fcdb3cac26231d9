//! 보안 요청 프록시 포트.
//!
//! 호스트가 제공하는 아웃바운드 HTTP 프록시를 추상화한다.
//! 프록시는 `{{setting.token}}` 플레이스홀더를 실제 토큰으로 치환한다.
//!
//! 구현: `moni-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;

/// HTTP 메서드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 프록시 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    /// JSON 본문 (직렬화된 문자열)
    pub body: Option<String>,
}

impl ProxyRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 헤더 추가
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// JSON 본문 설정
    pub fn json<T: serde::Serialize>(mut self, body: &T) -> Result<Self, CoreError> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }
}

/// 프록시 응답 (2xx만 성공으로 반환)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: String,
}

impl ProxyResponse {
    /// JSON 본문 파싱
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, CoreError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// 보안 아웃바운드 요청 프록시
///
/// 2xx가 아닌 응답은 [`CoreError::from_status`]로 매핑된 에러를 반환한다.
#[async_trait]
pub trait RequestProxy: Send + Sync {
    async fn send(&self, request: ProxyRequest) -> Result<ProxyResponse, CoreError>;
}
