//! 호스트 이벤트 레지스트리.
//!
//! 호스트 라이프사이클 이벤트를 등록된 핸들러에 순서대로 전달한다.
//! 디스패치는 직렬화되어, 한 이벤트의 핸들러가 모두 끝나야 다음 이벤트가 시작된다.

use async_trait::async_trait;
use moni_core::models::ticket::HostEvent;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// 이벤트 핸들러
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// 이 이벤트를 받을지
    fn subscribes_to(&self, event: HostEvent) -> bool;

    /// 이벤트 처리 (실패는 핸들러 안에서 처리)
    async fn handle(&self, event: HostEvent);
}

/// 등록 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// 이벤트 핸들러 레지스트리
pub struct EventRegistry {
    handlers: Mutex<Vec<(SubscriptionId, Arc<dyn EventHandler>)>>,
    next_id: AtomicU64,
    dispatch_lock: tokio::sync::Mutex<()>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            dispatch_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// 핸들러 등록
    pub fn register(&self, handler: Arc<dyn EventHandler>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.lock().push((id, handler));
        debug!("이벤트 핸들러 등록: {id:?}");
        id
    }

    /// 핸들러 해제. 등록되어 있었으면 `true`.
    pub fn unregister(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.lock();
        let before = handlers.len();
        handlers.retain(|(sid, _)| *sid != id);
        let removed = handlers.len() != before;
        if removed {
            debug!("이벤트 핸들러 해제: {id:?}");
        }
        removed
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().len()
    }

    /// 이벤트 전달
    ///
    /// 등록 순서대로 핸들러를 await하고 호스트 응답값 `true`를 반환한다.
    pub async fn dispatch(&self, event: HostEvent) -> bool {
        let _serial = self.dispatch_lock.lock().await;

        let targets: Vec<Arc<dyn EventHandler>> = self
            .handlers
            .lock()
            .iter()
            .filter(|(_, h)| h.subscribes_to(event))
            .map(|(_, h)| Arc::clone(h))
            .collect();

        debug!("이벤트 {event} → 핸들러 {}개", targets.len());
        for handler in targets {
            handler.handle(event).await;
        }
        true
    }

    /// 호스트 이벤트 이름으로 전달 (구독하지 않는 이름은 무시)
    pub async fn dispatch_host_event(&self, name: &str) -> bool {
        match HostEvent::from_host_name(name) {
            Some(event) => self.dispatch(event).await,
            None => {
                debug!("구독하지 않는 호스트 이벤트: {name}");
                true
            }
        }
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        name: &'static str,
        only: Option<HostEvent>,
        log: Arc<Mutex<Vec<(&'static str, HostEvent)>>>,
    }

    #[async_trait]
    impl EventHandler for Recorder {
        fn subscribes_to(&self, event: HostEvent) -> bool {
            self.only.map_or(true, |e| e == event)
        }

        async fn handle(&self, event: HostEvent) {
            tokio::task::yield_now().await;
            self.log.lock().push((self.name, event));
        }
    }

    fn recorder(
        name: &'static str,
        only: Option<HostEvent>,
        log: &Arc<Mutex<Vec<(&'static str, HostEvent)>>>,
    ) -> Arc<dyn EventHandler> {
        Arc::new(Recorder {
            name,
            only,
            log: Arc::clone(log),
        })
    }

    #[tokio::test]
    async fn dispatch_in_registration_order() {
        let registry = EventRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.register(recorder("a", None, &log));
        registry.register(recorder("b", None, &log));

        assert!(registry.dispatch(HostEvent::DraftSave).await);

        assert_eq!(
            *log.lock(),
            vec![("a", HostEvent::DraftSave), ("b", HostEvent::DraftSave)]
        );
    }

    #[tokio::test]
    async fn handlers_filter_events() {
        let registry = EventRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.register(recorder("save", Some(HostEvent::DraftSave), &log));

        registry.dispatch(HostEvent::SubmitComplete).await;
        registry.dispatch(HostEvent::DraftSave).await;

        assert_eq!(*log.lock(), vec![("save", HostEvent::DraftSave)]);
    }

    #[tokio::test]
    async fn unregister_stops_delivery() {
        let registry = EventRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let id = registry.register(recorder("a", None, &log));

        assert!(registry.unregister(id));
        assert!(!registry.unregister(id));
        assert_eq!(registry.handler_count(), 0);

        registry.dispatch(HostEvent::DraftSave).await;
        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn host_names_are_mapped() {
        let registry = EventRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.register(recorder("a", None, &log));

        assert!(registry.dispatch_host_event("ticket.submit.done").await);
        assert!(registry.dispatch_host_event("app.registered").await);

        assert_eq!(*log.lock(), vec![("a", HostEvent::SubmitComplete)]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_dispatches_do_not_interleave() {
        let registry = Arc::new(EventRegistry::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.register(recorder("a", None, &log));
        registry.register(recorder("b", None, &log));

        let r1 = Arc::clone(&registry);
        let r2 = Arc::clone(&registry);
        let (x, y) = tokio::join!(
            tokio::spawn(async move { r1.dispatch(HostEvent::DraftSave).await }),
            tokio::spawn(async move { r2.dispatch(HostEvent::SubmitComplete).await }),
        );
        assert!(x.unwrap() && y.unwrap());

        let log = log.lock();
        assert_eq!(log.len(), 4);
        // 같은 이벤트의 두 핸들러가 연속으로 기록됨
        assert_eq!(log[0].1, log[1].1);
        assert_eq!(log[2].1, log[3].1);
        assert_ne!(log[0].1, log[2].1);
    }
}
