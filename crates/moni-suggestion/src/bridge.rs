//! 티켓 라이프사이클 이벤트 브리지.
//!
//! 초안 저장/제출 완료/대화 변경 이벤트를 저장소와 폴링 스케줄러 동작으로 옮긴다.
//! 모든 핸들러는 실패를 로그로 남기고 정상 종료한다.

use crate::events::EventHandler;
use crate::polling::PollingScheduler;
use crate::store::SuggestionStore;
use async_trait::async_trait;
use moni_core::models::ticket::HostEvent;
use moni_core::ports::host::TicketHost;
use moni_core::text::html_to_plain_text;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 호스트 이벤트 → 제안 라이프사이클
pub struct TicketEventBridge {
    host: Arc<dyn TicketHost>,
    store: Arc<SuggestionStore>,
    scheduler: Arc<PollingScheduler>,
}

impl TicketEventBridge {
    pub fn new(
        host: Arc<dyn TicketHost>,
        store: Arc<SuggestionStore>,
        scheduler: Arc<PollingScheduler>,
    ) -> Self {
        Self {
            host,
            store,
            scheduler,
        }
    }

    /// 초안 저장: 삽입한 제안이 있으면 현재 초안을 캡처
    pub async fn on_draft_save(&self) {
        if self.store.pending_use().is_none() {
            return;
        }

        match self.host.comment_text().await {
            Ok(html) => {
                self.store.capture_pending_text(html);
                debug!("제출 예정 초안 캡처");
            }
            Err(e) => error!("초안 읽기 실패: {e}"),
        }
    }

    /// 제출 완료: 보낸 텍스트 기록 후 목록 새로고침
    pub async fn on_submit_complete(&self) {
        let Some(pending) = self.store.take_pending_use() else {
            return;
        };
        let Some(html) = pending.draft_text else {
            debug!("캡처된 초안 없음 — 제안 {} 기록 생략", pending.suggestion_id);
            return;
        };

        let text = html_to_plain_text(&html);
        match self.store.record_edit(pending.suggestion_id, &text).await {
            Ok(()) => {
                info!("보낸 답변 기록 완료: 제안 {}", pending.suggestion_id);
                self.store.load(1, false).await;
            }
            Err(e) => error!("보낸 답변 기록 실패 ({}): {e}", pending.suggestion_id),
        }
    }

    /// 대화 변경: 마지막 메시지가 고객이면 새 제안 폴링 시작
    pub async fn on_conversation_changed(&self) {
        if self.scheduler.is_active() {
            debug!("폴링 중 — 대화 변경 무시");
            return;
        }

        let conversation = match self.host.conversation().await {
            Ok(c) => c,
            Err(e) => {
                error!("대화 읽기 실패: {e}");
                return;
            }
        };

        let Some(last) = conversation.last() else {
            return;
        };
        if last.is_from_end_user() {
            info!("고객 메시지 감지 — AI 제안 대기");
            self.store.start_ai_polling();
        }
    }
}

#[async_trait]
impl EventHandler for TicketEventBridge {
    fn subscribes_to(&self, _event: HostEvent) -> bool {
        true
    }

    async fn handle(&self, event: HostEvent) {
        match event {
            HostEvent::DraftSave => self.on_draft_save().await,
            HostEvent::SubmitComplete => self.on_submit_complete().await,
            HostEvent::ConversationChanged => self.on_conversation_changed().await,
        }
    }
}
