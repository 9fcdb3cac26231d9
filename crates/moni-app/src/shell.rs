//! 앱 셸.
//!
//! 호스트 메타데이터의 기능 플래그를 읽고, 켜진 기능(AI 답변 제안, 배송 이력)을
//! 초기화한 뒤 전체 앱 상태를 결정한다.

use moni_core::config::AppConfig;
use moni_core::error::CoreError;
use moni_core::locale::SupportedLocale;
use moni_core::models::app::{AppSettings, AppState};
use moni_core::models::oauth::OAuthState;
use moni_core::models::suggestion::TicketId;
use moni_core::ports::auth_window::AuthWindowOpener;
use moni_core::ports::host::TicketHost;
use moni_core::ports::shipment_api::ShipmentApi;
use moni_core::ports::suggestion_api::SuggestionApi;
use moni_shipment::browser::ShipmentBrowser;
use moni_shipment::download::DocumentDownloader;
use moni_suggestion::context::SuggestionContext;
use moni_suggestion::events::EventRegistry;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 외부 서비스 포트 묶음
pub struct AppServices {
    pub suggestion_api: Arc<dyn SuggestionApi>,
    pub shipment_api: Arc<dyn ShipmentApi>,
    pub auth_opener: Arc<dyn AuthWindowOpener>,
}

/// 앱 셸
pub struct AppShell {
    host: Arc<dyn TicketHost>,
    registry: Arc<EventRegistry>,
    suggestions: SuggestionContext,
    shipments: ShipmentBrowser,
    downloader: DocumentDownloader,
    state: Mutex<AppState>,
    settings: Mutex<AppSettings>,
    locale: Mutex<SupportedLocale>,
}

impl AppShell {
    pub fn new(
        host: Arc<dyn TicketHost>,
        registry: Arc<EventRegistry>,
        services: AppServices,
        config: &AppConfig,
    ) -> Self {
        let suggestions = SuggestionContext::new(
            services.suggestion_api,
            Arc::clone(&host),
            services.auth_opener,
            &config.polling,
            &config.oauth,
        );
        let shipments =
            ShipmentBrowser::new(Arc::clone(&services.shipment_api), config.shipment.page_size);
        let downloader = DocumentDownloader::new(services.shipment_api);

        Self {
            host,
            registry,
            suggestions,
            shipments,
            downloader,
            state: Mutex::new(AppState::Loading),
            settings: Mutex::new(AppSettings::default()),
            locale: Mutex::new(SupportedLocale::default()),
        }
    }

    /// 기능 초기화 후 앱 상태 결정
    ///
    /// 호스트 호출 실패는 `AppState::Error`로 끝난다.
    pub async fn bootstrap(&self) -> AppState {
        *self.state.lock() = AppState::Loading;

        let state = match self.initialize_features().await {
            Ok(state) => state,
            Err(e) => {
                error!("앱 초기화 실패: {e}");
                AppState::Error(e.to_string())
            }
        };

        info!("앱 상태: {state:?}");
        *self.state.lock() = state.clone();
        state
    }

    async fn initialize_features(&self) -> Result<AppState, CoreError> {
        let metadata = self.host.metadata().await?;
        let settings = AppSettings::from(&metadata.settings);
        *self.settings.lock() = settings;

        if settings.enabled_features_count() == 0 {
            info!("활성화된 기능 없음");
            return Ok(AppState::FeatureDisabled);
        }

        let locale = match self.host.user_locale().await {
            Ok(raw) => SupportedLocale::from_host_locale(&raw),
            Err(e) => {
                warn!("사용자 로케일 조회 실패, 기본값 사용: {e}");
                SupportedLocale::default()
            }
        };
        *self.locale.lock() = locale;

        let subdomain = self.host.account_context().await?.subdomain;
        let ticket_id = self.host.ticket_id().await?;

        let mut blocked = None;
        if settings.ai_agent_enabled {
            blocked = self.initialize_suggestions(ticket_id, subdomain).await;
        }

        if settings.shipment_history_enabled {
            let email = self.host.requester_email().await?;
            self.shipments.initialize(email);
            if self.shipments.email().is_some() {
                self.shipments.load(1).await;
            }
        }

        // 배송 이력이 함께 켜져 있으면 제안 패널만 자체 상태를 표시한다
        match blocked {
            Some(state) if !settings.shipment_history_enabled => Ok(state),
            _ => Ok(AppState::Ready),
        }
    }

    /// 제안 기능 초기화. 앱 전체를 막아야 하는 OAuth 상태면 Some.
    async fn initialize_suggestions(
        &self,
        ticket_id: Option<TicketId>,
        subdomain: String,
    ) -> Option<AppState> {
        self.suggestions.initialize(ticket_id, subdomain, &self.registry);

        match self.suggestions.check_oauth_status().await {
            OAuthState::NotLicensed => Some(AppState::FeatureNotLicensed),
            OAuthState::ApiKeyInvalid => Some(AppState::ApiKeyInvalid),
            OAuthState::Connected => {
                self.suggestions.store().load(1, false).await;
                None
            }
            OAuthState::NotConnected | OAuthState::Unknown => None,
        }
    }

    /// 인증 플로우 후 상태 재확인, 연결되면 제안 조회
    pub async fn connect_account(&self) -> OAuthState {
        if !self.suggestions.start_oauth_flow().await {
            return self.suggestions.gate().state();
        }
        let state = self.suggestions.check_oauth_status().await;
        if state == OAuthState::Connected {
            self.suggestions.store().refresh().await;
        }
        state
    }

    /// 호스트 이벤트 전달 (호스트 응답값 반환)
    pub async fn dispatch_host_event(&self, name: &str) -> bool {
        self.registry.dispatch_host_event(name).await
    }

    /// 두 기능 정리
    pub fn shutdown(&self) {
        self.suggestions.cleanup(&self.registry);
        self.shipments.cleanup();
        info!("앱 셸 종료");
    }

    pub fn state(&self) -> AppState {
        self.state.lock().clone()
    }

    pub fn settings(&self) -> AppSettings {
        *self.settings.lock()
    }

    pub fn locale(&self) -> SupportedLocale {
        *self.locale.lock()
    }

    pub fn suggestions(&self) -> &SuggestionContext {
        &self.suggestions
    }

    pub fn shipments(&self) -> &ShipmentBrowser {
        &self.shipments
    }

    pub fn downloader(&self) -> &DocumentDownloader {
        &self.downloader
    }
}
