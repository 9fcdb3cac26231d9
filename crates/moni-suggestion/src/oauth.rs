//! OAuth 연결 게이트.
//!
//! 외부 계정 OAuth 연결 상태를 보관하고 변경을 `watch` 채널로 알린다.
//! 제안 관련 기능은 `Connected` 상태에서만 활성화된다.

use moni_core::config::OAuthConfig;
use moni_core::error::{ApiErrorKind, CoreError};
use moni_core::models::oauth::{AuthWindowSpec, OAuthState};
use moni_core::ports::auth_window::{AuthWindow, AuthWindowOpener};
use moni_core::ports::suggestion_api::SuggestionApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// OAuth 연결 상태 게이트
pub struct OAuthGate {
    api: Arc<dyn SuggestionApi>,
    opener: Arc<dyn AuthWindowOpener>,
    window: AuthWindowSpec,
    check_interval: Duration,
    max_wait: Duration,
    state_tx: watch::Sender<OAuthState>,
}

impl OAuthGate {
    /// 새 게이트 생성 (초기 상태 `Unknown`)
    pub fn new(
        api: Arc<dyn SuggestionApi>,
        opener: Arc<dyn AuthWindowOpener>,
        config: &OAuthConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(OAuthState::Unknown);
        Self {
            api,
            opener,
            window: AuthWindowSpec {
                name: config.window_name.clone(),
                width: config.popup_width,
                height: config.popup_height,
            },
            check_interval: config.check_interval(),
            max_wait: config.max_wait(),
            state_tx,
        }
    }

    /// 현재 상태
    pub fn state(&self) -> OAuthState {
        *self.state_tx.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == OAuthState::Connected
    }

    /// 상태 변경 수신기
    pub fn subscribe(&self) -> watch::Receiver<OAuthState> {
        self.state_tx.subscribe()
    }

    /// 상태 설정 (같은 값이면 알림 없음)
    pub fn set_state(&self, state: OAuthState) {
        let changed = self.state_tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
        if changed {
            info!("OAuth 상태 변경: {state}");
        }
    }

    /// API 에러를 상태에 반영
    ///
    /// 401/403만 상태를 바꾸며, 반영했으면 `true`.
    pub fn apply_error(&self, err: &CoreError) -> bool {
        match err.kind() {
            ApiErrorKind::AuthInvalid => {
                self.set_state(OAuthState::ApiKeyInvalid);
                true
            }
            ApiErrorKind::NotLicensed => {
                self.set_state(OAuthState::NotLicensed);
                true
            }
            ApiErrorKind::Unclassified => false,
        }
    }

    /// 서버에 연결 상태 조회 후 상태 갱신
    pub async fn check_status(&self) -> OAuthState {
        let state = match self.api.oauth_status().await {
            Ok(resp) if resp.connected => OAuthState::Connected,
            Ok(_) => OAuthState::NotConnected,
            Err(e) => match e.kind() {
                ApiErrorKind::AuthInvalid => OAuthState::ApiKeyInvalid,
                ApiErrorKind::NotLicensed => OAuthState::NotLicensed,
                ApiErrorKind::Unclassified => {
                    error!("OAuth 상태 확인 실패: {e}");
                    OAuthState::Unknown
                }
            },
        };

        debug!("OAuth 상태 확인 결과: {state}");
        self.set_state(state);
        state
    }

    /// 팝업 인증 플로우
    ///
    /// 사용자가 창을 닫으면 `true`. 연결 여부는 호출자가
    /// [`check_status`](Self::check_status)로 다시 확인해야 한다.
    pub async fn start_authorization_flow(&self, subdomain: &str) -> bool {
        let authorize_url = match self.api.init_oauth(subdomain).await {
            Ok(resp) => resp.authorize_url,
            Err(e) => {
                error!("OAuth 초기화 실패: {e}");
                return false;
            }
        };

        let Some(window) = self.opener.open(&authorize_url, &self.window) else {
            error!("인증 창 열기 실패 (팝업 차단?)");
            return false;
        };

        info!("인증 창 열림: {}", self.window.name);
        self.wait_for_close(window.as_ref()).await
    }

    async fn wait_for_close(&self, window: &dyn AuthWindow) -> bool {
        let started_at = Instant::now();
        let mut ticker =
            tokio::time::interval_at(started_at + self.check_interval, self.check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            if window.is_closed() {
                info!("인증 창 닫힘");
                return true;
            }
            if started_at.elapsed() > self.max_wait {
                warn!("인증 창 대기 시간 초과 ({:?})", self.max_wait);
                return false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeApi, FakeOpener};
    use std::sync::atomic::Ordering;

    fn gate(api: Arc<FakeApi>, opener: Arc<FakeOpener>) -> OAuthGate {
        OAuthGate::new(api, opener, &OAuthConfig::default())
    }

    #[tokio::test]
    async fn status_mapping() {
        let api = Arc::new(FakeApi::default());
        let g = gate(Arc::clone(&api), Arc::new(FakeOpener::default()));
        assert_eq!(g.state(), OAuthState::Unknown);

        *api.oauth_status.lock() = Ok(true);
        assert_eq!(g.check_status().await, OAuthState::Connected);
        assert!(g.is_connected());

        *api.oauth_status.lock() = Ok(false);
        assert_eq!(g.check_status().await, OAuthState::NotConnected);

        *api.oauth_status.lock() = Err(401);
        assert_eq!(g.check_status().await, OAuthState::ApiKeyInvalid);

        *api.oauth_status.lock() = Err(403);
        assert_eq!(g.check_status().await, OAuthState::NotLicensed);

        *api.oauth_status.lock() = Err(500);
        assert_eq!(g.check_status().await, OAuthState::Unknown);
        assert_eq!(g.state(), OAuthState::Unknown);
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let api = Arc::new(FakeApi::default());
        let g = gate(api, Arc::new(FakeOpener::default()));
        let mut rx = g.subscribe();

        g.set_state(OAuthState::Connected);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), OAuthState::Connected);

        // 같은 값은 알림 없음
        g.set_state(OAuthState::Connected);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn apply_error_only_for_auth_faults() {
        let g = gate(Arc::new(FakeApi::default()), Arc::new(FakeOpener::default()));

        assert!(!g.apply_error(&CoreError::Network("timeout".into())));
        assert_eq!(g.state(), OAuthState::Unknown);

        assert!(g.apply_error(&CoreError::from_status(403, "")));
        assert_eq!(g.state(), OAuthState::NotLicensed);

        assert!(g.apply_error(&CoreError::from_status(401, "")));
        assert_eq!(g.state(), OAuthState::ApiKeyInvalid);
    }

    #[tokio::test(start_paused = true)]
    async fn flow_succeeds_when_window_closes() {
        let api = Arc::new(FakeApi::default());
        let opener = Arc::new(FakeOpener::default());
        let g = Arc::new(gate(api, Arc::clone(&opener)));

        let flow = {
            let g = Arc::clone(&g);
            tokio::spawn(async move { g.start_authorization_flow("acme").await })
        };

        tokio::time::sleep(Duration::from_secs(3)).await;
        opener.close_window();

        assert!(flow.await.unwrap());
        let opened = opener.opened.lock();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].0, "https://auth.example/authorize");
        assert_eq!(opened[0].1.name, "paqato_oauth");
        assert_eq!((opened[0].1.width, opened[0].1.height), (600, 700));
    }

    #[tokio::test(start_paused = true)]
    async fn flow_times_out_when_window_stays_open() {
        let g = gate(Arc::new(FakeApi::default()), Arc::new(FakeOpener::default()));
        let started = Instant::now();

        assert!(!g.start_authorization_flow("acme").await);
        assert!(started.elapsed() >= Duration::from_secs(90));
    }

    #[tokio::test]
    async fn blocked_popup_fails() {
        let opener = Arc::new(FakeOpener::default());
        opener.blocked.store(true, Ordering::SeqCst);
        let g = gate(Arc::new(FakeApi::default()), opener);

        assert!(!g.start_authorization_flow("acme").await);
    }

    #[tokio::test]
    async fn init_failure_fails_without_opening() {
        let api = Arc::new(FakeApi::default());
        *api.authorize_url.lock() = Err(500);
        let opener = Arc::new(FakeOpener::default());
        let g = gate(api, Arc::clone(&opener));

        assert!(!g.start_authorization_flow("acme").await);
        assert!(opener.opened.lock().is_empty());
    }
}
