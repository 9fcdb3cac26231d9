//! reqwest 기반 요청 프록시.
//!
//! `RequestProxy` 포트 구현. 호스트 보안 프록시처럼 `{{setting.token}}`
//! 플레이스홀더를 설정된 토큰으로 치환한 뒤 요청을 보낸다.
//! 재시도는 하지 않는다 (실패는 호출자에게 그대로 전달).

use async_trait::async_trait;
use moni_core::config::TOKEN_PLACEHOLDER;
use moni_core::error::CoreError;
use moni_core::ports::request_proxy::{HttpMethod, ProxyRequest, ProxyResponse, RequestProxy};
use std::time::Duration;
use tracing::{debug, warn};

/// REST 요청 프록시 — `RequestProxy` 포트 구현
pub struct HttpRequestProxy {
    client: reqwest::Client,
    token: Option<String>,
}

impl HttpRequestProxy {
    /// 새 프록시 생성
    pub fn new(token: Option<String>, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self { client, token })
    }

    /// 토큰 플레이스홀더 치환
    fn substitute(&self, value: &str) -> String {
        match &self.token {
            Some(token) => value.replace(TOKEN_PLACEHOLDER, token),
            None => value.to_string(),
        }
    }

    /// 응답 상태 코드 확인 및 에러 매핑
    async fn check_response(resp: reqwest::Response) -> Result<ProxyResponse, CoreError> {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_else(|e| {
            warn!("응답 본문 읽기 실패: {e}");
            String::new()
        });

        if (200..300).contains(&status) {
            Ok(ProxyResponse { status, body })
        } else {
            Err(CoreError::from_status(status, body))
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl RequestProxy for HttpRequestProxy {
    async fn send(&self, request: ProxyRequest) -> Result<ProxyResponse, CoreError> {
        // 로그에는 치환 전 URL만 남긴다
        debug!("프록시 요청: {} {}", request.method, request.url);

        if self.token.is_none() && request.url.contains(TOKEN_PLACEHOLDER) {
            warn!("토큰 미설정 상태에서 토큰 플레이스홀더 사용");
        }

        let url = self.substitute(&request.url);
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), self.substitute(value));
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(|e| {
            CoreError::Network(format!(
                "요청 실패 ({} {}): {}",
                request.method,
                request.url,
                e.without_url()
            ))
        })?;

        let result = Self::check_response(resp).await;
        if let Err(e) = &result {
            debug!("프록시 응답 에러: {e}");
        }
        result
    }
}
