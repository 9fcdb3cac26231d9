//! 애플리케이션 설정 구조체.
//!
//! 백엔드 URL, API 토큰, 폴링 주기, OAuth 팝업 설정 등 런타임 설정을 정의한다.
//! `config` crate를 통해 파일/환경변수(`MONI_*`)에서 로드.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::CoreError;

/// AI 제안 백엔드 기본 URL
pub const DEFAULT_API_BASE_URL: &str = "https://moni.paqato.com";

/// 배송 API 기본 URL
pub const DEFAULT_SHIPMENT_BASE_URL: &str = "https://api.paqato.com";

/// 호스트 보안 프록시가 치환하는 토큰 플레이스홀더
pub const TOKEN_PLACEHOLDER: &str = "{{setting.token}}";

/// 환경변수 접두사
const ENV_PREFIX: &str = "MONI";

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 제안 API 설정
    #[serde(default)]
    pub api: ApiConfig,
    /// 배송 API 설정
    #[serde(default)]
    pub shipment: ShipmentApiConfig,
    /// AI 응답 폴링 설정
    #[serde(default)]
    pub polling: PollingConfig,
    /// OAuth 팝업 설정
    #[serde(default)]
    pub oauth: OAuthConfig,
}

impl AppConfig {
    /// 설정 파일(선택) + `MONI_` 환경변수에서 설정 로드
    ///
    /// 섹션 구분자는 `__` (예: `MONI_API__TOKEN`).
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let config: AppConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::Config(format!("설정 로드 실패: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// 설정값 유효성 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api.base_url.trim().is_empty() {
            return Err(CoreError::Config("api.base_url이 비어 있음".to_string()));
        }
        if self.shipment.base_url.trim().is_empty() {
            return Err(CoreError::Config(
                "shipment.base_url이 비어 있음".to_string(),
            ));
        }
        if self.polling.interval_ms == 0 || self.polling.timeout_ms == 0 {
            return Err(CoreError::Config(
                "polling 간격/타임아웃은 0보다 커야 함".to_string(),
            ));
        }
        if self.oauth.check_interval_ms == 0 {
            return Err(CoreError::Config(
                "oauth.check_interval_ms는 0보다 커야 함".to_string(),
            ));
        }
        if self.shipment.page_size == 0 {
            return Err(CoreError::Config(
                "shipment.page_size는 0보다 커야 함".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================
// 제안 API 설정
// ============================================================

/// 제안/평가/OAuth 백엔드 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 백엔드 기본 URL
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// API 경로 접두사
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// API 토큰 (호스트 앱 설정 `token`)
    #[serde(default)]
    pub token: Option<String>,
    /// HTTP 요청 타임아웃 (초)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            api_prefix: default_api_prefix(),
            token: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// 요청 타임아웃
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 엔드포인트 기준 URL (`{base_url}{api_prefix}`)
    pub fn endpoint_root(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix
        )
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_api_prefix() -> String {
    "/api/v1/zendesk-app".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

// ============================================================
// 배송 API 설정
// ============================================================

/// 배송 검색/다운로드 API 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentApiConfig {
    /// 배송 API 기본 URL
    #[serde(default = "default_shipment_base_url")]
    pub base_url: String,
    /// 페이지당 배송 수
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// `paqato-system-name` 헤더
    #[serde(default = "default_system_name")]
    pub system_name: String,
    /// `paqato-system-version` 헤더
    #[serde(default = "default_system_version")]
    pub system_version: String,
    /// `paqato-plugin-version` 헤더
    #[serde(default = "default_plugin_version")]
    pub plugin_version: String,
}

impl Default for ShipmentApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_shipment_base_url(),
            page_size: default_page_size(),
            system_name: default_system_name(),
            system_version: default_system_version(),
            plugin_version: default_plugin_version(),
        }
    }
}

fn default_shipment_base_url() -> String {
    DEFAULT_SHIPMENT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    5
}

fn default_system_name() -> String {
    "zendesk".to_string()
}

fn default_system_version() -> String {
    "1".to_string()
}

fn default_plugin_version() -> String {
    "2.0".to_string()
}

// ============================================================
// 폴링 설정
// ============================================================

/// AI 응답 폴링 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// 확인 간격 (ms)
    #[serde(default = "default_polling_interval_ms")]
    pub interval_ms: u64,
    /// 세션 최대 지속 시간 (ms)
    #[serde(default = "default_polling_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_polling_interval_ms(),
            timeout_ms: default_polling_timeout_ms(),
        }
    }
}

impl PollingConfig {
    /// 확인 간격
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// 세션 타임아웃
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_polling_interval_ms() -> u64 {
    10_000
}

fn default_polling_timeout_ms() -> u64 {
    90_000
}

// ============================================================
// OAuth 설정
// ============================================================

/// OAuth 팝업 플로우 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// 팝업 창 이름
    #[serde(default = "default_window_name")]
    pub window_name: String,
    /// 팝업 너비 (px)
    #[serde(default = "default_popup_width")]
    pub popup_width: u32,
    /// 팝업 높이 (px)
    #[serde(default = "default_popup_height")]
    pub popup_height: u32,
    /// 팝업 닫힘 확인 간격 (ms)
    #[serde(default = "default_check_interval_ms")]
    pub check_interval_ms: u64,
    /// 팝업 닫힘 최대 대기 시간 (ms)
    #[serde(default = "default_max_wait_ms")]
    pub max_wait_ms: u64,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            window_name: default_window_name(),
            popup_width: default_popup_width(),
            popup_height: default_popup_height(),
            check_interval_ms: default_check_interval_ms(),
            max_wait_ms: default_max_wait_ms(),
        }
    }
}

impl OAuthConfig {
    /// 닫힘 확인 간격
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    /// 최대 대기 시간
    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }
}

fn default_window_name() -> String {
    "paqato_oauth".to_string()
}

fn default_popup_width() -> u32 {
    600
}

fn default_popup_height() -> u32 {
    700
}

fn default_check_interval_ms() -> u64 {
    500
}

fn default_max_wait_ms() -> u64 {
    90_000
}
