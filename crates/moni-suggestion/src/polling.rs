//! 폴링 스케줄러.
//!
//! 확인 함수 하나를 고정 간격으로 실행하다가, 완료(`Ok(true)`)를 보고하거나
//! 세션 타임아웃이 지나면 멈춘다. 동시에 활성 세션은 하나뿐이다.
//!
//! 확인 함수는 세션 태스크 안에서 await되므로 자기 자신과 겹쳐 실행되지 않는다.
//! 확인이 진행 중인 동안 지나간 틱은 건너뛴다.

use moni_core::config::PollingConfig;
use moni_core::error::CoreError;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// 활성 폴링 세션
struct PollSession {
    /// 세션 세대 번호 (종료 시 자기 세션인지 확인용)
    generation: u64,
    started_at: Instant,
    task: JoinHandle<()>,
}

/// 세션 태스크와 공유하는 상태
struct Shared {
    session: Mutex<Option<PollSession>>,
    active_tx: watch::Sender<bool>,
    generation: AtomicU64,
}

impl Shared {
    /// 활성 플래그 내리기 (이미 false면 알림 없음)
    fn mark_inactive(&self) {
        self.active_tx.send_if_modified(|active| std::mem::replace(active, false));
    }

    /// 세션 태스크가 스스로 끝났을 때 호출
    fn finish(&self, generation: u64) {
        let mut session = self.session.lock();
        if session.as_ref().map(|s| s.generation) == Some(generation) {
            *session = None;
            drop(session);
            self.mark_inactive();
        }
    }
}

/// 간격/타임아웃 폴링 스케줄러
pub struct PollingScheduler {
    interval: Duration,
    timeout: Duration,
    shared: Arc<Shared>,
}

impl PollingScheduler {
    /// 설정으로 생성
    pub fn new(config: &PollingConfig) -> Self {
        Self::with_timing(config.interval(), config.timeout())
    }

    /// 간격/타임아웃 직접 지정
    pub fn with_timing(interval: Duration, timeout: Duration) -> Self {
        let (active_tx, _) = watch::channel(false);
        Self {
            interval,
            timeout,
            shared: Arc::new(Shared {
                session: Mutex::new(None),
                active_tx,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// 확인 간격
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 세션 타임아웃
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 폴링 시작
    ///
    /// 이미 세션이 활성 상태면 무시하고 `false`를 반환한다.
    /// tokio 런타임 안에서 호출해야 한다.
    pub fn start<F, Fut>(&self, check: F) -> bool
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, CoreError>> + Send + 'static,
    {
        let mut session = self.shared.session.lock();
        if session.is_some() {
            debug!("폴링 세션이 이미 활성 상태 — 시작 요청 무시");
            return false;
        }

        let generation = self.shared.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let started_at = Instant::now();
        let task = tokio::spawn(run_session(
            Arc::clone(&self.shared),
            generation,
            started_at,
            self.interval,
            self.timeout,
            check,
        ));

        *session = Some(PollSession {
            generation,
            started_at,
            task,
        });
        // finish()는 세션 락을 잡은 뒤에만 플래그를 내리므로 락 안에서 올린다
        self.shared.active_tx.send_replace(true);
        drop(session);

        info!(
            "폴링 시작: 간격 {:?}, 타임아웃 {:?}",
            self.interval, self.timeout
        );
        true
    }

    /// 폴링 중지 (유휴 상태에서도 안전)
    pub fn stop(&self) {
        let session = self.shared.session.lock().take();
        if let Some(session) = session {
            session.task.abort();
            debug!(
                "폴링 중지 (경과 {:?})",
                session.started_at.elapsed()
            );
        }
        self.shared.mark_inactive();
    }

    /// 세션 활성 여부
    pub fn is_active(&self) -> bool {
        self.shared.session.lock().is_some()
    }

    /// 활성 세션 시작 시각
    pub fn started_at(&self) -> Option<Instant> {
        self.shared.session.lock().as_ref().map(|s| s.started_at)
    }

    /// 활성 플래그 변경 수신기
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shared.active_tx.subscribe()
    }
}

impl Default for PollingScheduler {
    fn default() -> Self {
        Self::new(&PollingConfig::default())
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// 세션 태스크 본문
async fn run_session<F, Fut>(
    shared: Arc<Shared>,
    generation: u64,
    started_at: Instant,
    interval: Duration,
    timeout: Duration,
    check: F,
) where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool, CoreError>> + Send + 'static,
{
    let deadline = started_at + timeout;
    let mut ticker = tokio::time::interval_at(started_at + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        // 마감 시각의 틱은 확인 없이 종료 (남은 시간이 없어 결과를 기다릴 수 없음)
        if started_at.elapsed() >= timeout {
            info!("폴링 타임아웃 ({timeout:?}) — 세션 종료");
            break;
        }

        tokio::select! {
            biased;
            result = check() => match result {
                Ok(true) => {
                    info!("새 데이터 확인 — 폴링 종료");
                    break;
                }
                Ok(false) => debug!("새 데이터 없음 — 다음 틱 대기"),
                Err(e) => warn!("폴링 확인 에러 (계속 진행): {e}"),
            },
            _ = tokio::time::sleep_until(deadline) => {
                warn!("확인 진행 중 세션 타임아웃 — 세션 종료");
                break;
            }
        }
    }

    shared.finish(generation);
}
