//! 티켓 단위 제안 컨텍스트.
//!
//! 스케줄러/게이트/저장소/브리지를 함께 소유하고 티켓 하나의 수명 동안
//! 초기화와 정리를 담당한다.

use crate::bridge::TicketEventBridge;
use crate::events::{EventRegistry, SubscriptionId};
use crate::oauth::OAuthGate;
use crate::polling::PollingScheduler;
use crate::store::SuggestionStore;
use moni_core::config::{OAuthConfig, PollingConfig};
use moni_core::models::oauth::OAuthState;
use moni_core::models::suggestion::TicketId;
use moni_core::ports::auth_window::AuthWindowOpener;
use moni_core::ports::host::TicketHost;
use moni_core::ports::suggestion_api::SuggestionApi;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 제안 기능 컨텍스트
pub struct SuggestionContext {
    scheduler: Arc<PollingScheduler>,
    gate: Arc<OAuthGate>,
    store: Arc<SuggestionStore>,
    bridge: Arc<TicketEventBridge>,
    subdomain: Mutex<Option<String>>,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl SuggestionContext {
    pub fn new(
        api: Arc<dyn SuggestionApi>,
        host: Arc<dyn TicketHost>,
        opener: Arc<dyn AuthWindowOpener>,
        polling: &PollingConfig,
        oauth: &OAuthConfig,
    ) -> Self {
        let scheduler = Arc::new(PollingScheduler::new(polling));
        let gate = Arc::new(OAuthGate::new(Arc::clone(&api), opener, oauth));
        let store = Arc::new(SuggestionStore::new(
            api,
            Arc::clone(&host),
            Arc::clone(&gate),
            Arc::clone(&scheduler),
        ));
        let bridge = Arc::new(TicketEventBridge::new(
            host,
            Arc::clone(&store),
            Arc::clone(&scheduler),
        ));

        Self {
            scheduler,
            gate,
            store,
            bridge,
            subdomain: Mutex::new(None),
            subscription: Mutex::new(None),
        }
    }

    /// 티켓 연결 + 이벤트 구독
    ///
    /// 다시 호출하면 이전 구독을 교체한다.
    pub fn initialize(
        &self,
        ticket_id: Option<TicketId>,
        subdomain: impl Into<String>,
        registry: &EventRegistry,
    ) {
        let subdomain = subdomain.into();
        info!("제안 컨텍스트 초기화: ticket={ticket_id:?}, subdomain={subdomain}");

        self.store.set_ticket(ticket_id);
        *self.subdomain.lock() = Some(subdomain);

        let bridge: Arc<dyn crate::events::EventHandler> = self.bridge.clone();
        let id = registry.register(bridge);
        if let Some(previous) = self.subscription.lock().replace(id) {
            registry.unregister(previous);
            debug!("이전 이벤트 구독 교체");
        }
    }

    /// 폴링 중지, 상태 초기화, 이벤트 구독 해제
    pub fn cleanup(&self, registry: &EventRegistry) {
        self.scheduler.stop();
        self.store.reset();
        self.store.set_ticket(None);
        if let Some(id) = self.subscription.lock().take() {
            registry.unregister(id);
        }
        debug!("제안 컨텍스트 정리 완료");
    }

    pub fn store(&self) -> &Arc<SuggestionStore> {
        &self.store
    }

    pub fn gate(&self) -> &Arc<OAuthGate> {
        &self.gate
    }

    pub fn scheduler(&self) -> &Arc<PollingScheduler> {
        &self.scheduler
    }

    pub fn subdomain(&self) -> Option<String> {
        self.subdomain.lock().clone()
    }

    pub async fn check_oauth_status(&self) -> OAuthState {
        self.gate.check_status().await
    }

    /// 저장된 서브도메인으로 인증 플로우 시작
    pub async fn start_oauth_flow(&self) -> bool {
        let Some(subdomain) = self.subdomain() else {
            warn!("서브도메인 없음 — 인증 플로우 시작 불가");
            return false;
        };
        self.gate.start_authorization_flow(&subdomain).await
    }

    pub fn stop_polling(&self) {
        self.scheduler.stop();
    }
}
