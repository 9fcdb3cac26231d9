//! 라이프사이클 관리.
//!
//! 종료 신호(Ctrl+C 또는 명시적 요청)와 폴링 세션 종료 대기.

use moni_suggestion::polling::PollingScheduler;
use tokio::sync::watch;
use tracing::{info, warn};

/// 폴링 대기 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// 폴링 세션이 스스로 끝남 (새 데이터 또는 타임아웃)
    PollingFinished,
    /// 종료 신호
    Shutdown,
}

/// 라이프사이클 관리자
pub struct LifecycleManager {
    shutdown_tx: watch::Sender<bool>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self { shutdown_tx }
    }

    /// 종료 수신기
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// 종료 신호 발송
    pub fn shutdown(&self) {
        info!("종료 신호 발송");
        self.shutdown_tx.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    /// Ctrl+C 대기 후 종료 신호 발송
    ///
    /// 핸들러 등록에 실패하면 영원히 대기한다.
    pub async fn wait_for_signal(&self) {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl+C 수신"),
            Err(e) => {
                warn!("시그널 핸들러 등록 실패: {e}");
                std::future::pending::<()>().await;
            }
        }
        self.shutdown();
    }

    /// 폴링 세션이 끝나거나 종료 신호가 올 때까지 대기
    pub async fn wait_for_polling(&self, scheduler: &PollingScheduler) -> WaitOutcome {
        let mut active = scheduler.subscribe();
        let mut shutdown = self.subscribe();

        loop {
            if *shutdown.borrow_and_update() {
                return WaitOutcome::Shutdown;
            }
            if !*active.borrow_and_update() {
                return WaitOutcome::PollingFinished;
            }

            tokio::select! {
                changed = active.changed() => {
                    if changed.is_err() {
                        return WaitOutcome::PollingFinished;
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        return WaitOutcome::Shutdown;
                    }
                }
            }
        }
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}
