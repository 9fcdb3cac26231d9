//! 제안 저장소.
//!
//! 티켓 하나의 제안 목록/페이지네이션/평가 선택/사용 기록을 보관하고
//! 백엔드 API와 호스트 초안 편집기 사이의 작업을 조율한다.
//!
//! 모든 공개 작업은 자체적으로 에러를 처리한다. 401/403은 [`OAuthGate`]에
//! 반영되고 나머지는 로그 후 빈 결과 또는 `false`로 끝난다.

use crate::oauth::OAuthGate;
use crate::polling::PollingScheduler;
use moni_core::error::CoreError;
use moni_core::models::suggestion::{
    Pagination, Suggestion, SuggestionId, SuggestionRating, TicketId,
};
use moni_core::ports::host::TicketHost;
use moni_core::ports::suggestion_api::SuggestionApi;
use moni_core::text::text_to_draft_html;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 허용 별점 범위
const STAR_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// 페이지 요청 상태
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Empty,
    Loading,
    Loaded,
    Error,
}

/// 상담원이 초안에 삽입한 제안 기록
///
/// 삽입 → 초안 저장 → 제출 순서로 채워진다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUse {
    pub suggestion_id: SuggestionId,
    /// 초안 저장 시점에 캡처한 HTML
    pub draft_text: Option<String>,
}

/// 평가 모달 선택
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingSelection {
    pub suggestion_id: SuggestionId,
    pub preselected_rating: Option<u8>,
}

/// 저장소 상태 스냅샷
#[derive(Debug, Clone)]
pub struct SuggestionSnapshot {
    pub suggestions: Vec<Suggestion>,
    pub total_count: u64,
    pub pagination: Option<Pagination>,
    pub current_page: u32,
    pub is_loading: bool,
    pub load_state: LoadState,
    pub rating_selection: Option<RatingSelection>,
    pub pending_use: Option<PendingUse>,
}

impl Default for SuggestionSnapshot {
    fn default() -> Self {
        Self {
            suggestions: Vec::new(),
            total_count: 0,
            pagination: None,
            current_page: 1,
            is_loading: false,
            load_state: LoadState::Empty,
            rating_selection: None,
            pending_use: None,
        }
    }
}

impl SuggestionSnapshot {
    fn has_more(&self) -> bool {
        self.pagination
            .is_some_and(|p| self.current_page < p.max_page)
    }
}

/// 제안 저장소
pub struct SuggestionStore {
    api: Arc<dyn SuggestionApi>,
    host: Arc<dyn TicketHost>,
    gate: Arc<OAuthGate>,
    scheduler: Arc<PollingScheduler>,
    ticket_id: Arc<Mutex<Option<TicketId>>>,
    state: Arc<Mutex<SuggestionSnapshot>>,
}

impl SuggestionStore {
    pub fn new(
        api: Arc<dyn SuggestionApi>,
        host: Arc<dyn TicketHost>,
        gate: Arc<OAuthGate>,
        scheduler: Arc<PollingScheduler>,
    ) -> Self {
        Self {
            api,
            host,
            gate,
            scheduler,
            ticket_id: Arc::new(Mutex::new(None)),
            state: Arc::new(Mutex::new(SuggestionSnapshot::default())),
        }
    }

    /// 대상 티켓 설정 (None이면 조회 중단)
    pub fn set_ticket(&self, ticket_id: Option<TicketId>) {
        *self.ticket_id.lock() = ticket_id;
    }

    pub fn ticket_id(&self) -> Option<TicketId> {
        *self.ticket_id.lock()
    }

    // ── 조회 ──────────────────────────────────────────────

    /// 제안 페이지 조회
    ///
    /// `append`이면 기존 목록 뒤에 붙인다. 폴링 중이거나 이어붙일 때는
    /// 로딩 표시를 켜지 않는다.
    pub async fn load(&self, page: u32, append: bool) {
        let Some(ticket_id) = self.ticket_id() else {
            debug!("티켓 없음 — 제안 조회 생략");
            return;
        };

        if !self.scheduler.is_active() && !append {
            let mut state = self.state.lock();
            state.is_loading = true;
            state.load_state = LoadState::Loading;
        }

        let result = self.api.get_suggestions(ticket_id, page).await;

        if let Err(e) = &result {
            self.gate.apply_error(e);
            error!("제안 조회 실패 (ticket={ticket_id}, page={page}): {e}");
        }

        let mut state = self.state.lock();
        state.is_loading = false;
        match result {
            Ok(resp) => {
                state.total_count = resp.total_count;
                state.pagination = resp.pagination;
                state.current_page = page;
                if append {
                    state.suggestions.extend(resp.suggestions);
                } else {
                    state.suggestions = resp.suggestions;
                }
                state.load_state = LoadState::Loaded;
                debug!(
                    "제안 {}개 표시 (page={page}, 전체 {})",
                    state.suggestions.len(),
                    state.total_count
                );
            }
            Err(_) => {
                state.suggestions.clear();
                state.load_state = LoadState::Error;
            }
        }
    }

    /// 1페이지로 되돌린 뒤 다시 조회
    ///
    /// 조회가 실패해도 현재 페이지는 1로 남는다.
    pub async fn refresh(&self) {
        self.state.lock().current_page = 1;
        self.load(1, false).await;
    }

    /// 다음 페이지 이어붙이기
    pub async fn load_more(&self) {
        let next = {
            let state = self.state.lock();
            if !state.has_more() {
                debug!("더 불러올 페이지 없음");
                return;
            }
            state.current_page + 1
        };
        self.load(next, true).await;
    }

    /// 새 AI 제안 대기 폴링 시작
    ///
    /// 시작 시점의 전체 개수보다 서버 개수가 늘면 목록을 교체하고 폴링을 끝낸다.
    pub fn start_ai_polling(&self) -> bool {
        let initial_count = self.total_count();
        let api = Arc::clone(&self.api);
        let gate = Arc::clone(&self.gate);
        let ticket = Arc::clone(&self.ticket_id);
        let state = Arc::clone(&self.state);

        let started = self.scheduler.start(move || {
            let api = Arc::clone(&api);
            let gate = Arc::clone(&gate);
            let ticket = Arc::clone(&ticket);
            let state = Arc::clone(&state);
            async move {
                let ticket_id = *ticket.lock();
                let Some(ticket_id) = ticket_id else {
                    return Ok(false);
                };

                let resp = api.get_suggestions(ticket_id, 1).await.map_err(|e| {
                    gate.apply_error(&e);
                    e
                })?;

                if resp.total_count <= initial_count {
                    return Ok(false);
                }

                info!(
                    "새 AI 제안 도착: {initial_count} → {}",
                    resp.total_count
                );
                {
                    let mut s = state.lock();
                    s.suggestions = resp.suggestions;
                    s.total_count = resp.total_count;
                    s.pagination = resp.pagination;
                    s.current_page = 1;
                    s.load_state = LoadState::Loaded;
                }
                Ok(true)
            }
        });

        if started {
            info!("AI 제안 폴링 시작 (현재 {initial_count}개)");
        }
        started
    }

    // ── 평가 ──────────────────────────────────────────────

    /// 평가 전송 후 로컬 제안에 반영
    pub async fn submit_rating(
        &self,
        suggestion_id: SuggestionId,
        stars: u8,
        feedback: Option<&str>,
    ) -> bool {
        if !STAR_RANGE.contains(&stars) {
            warn!("허용 범위 밖 별점: {stars}");
            return false;
        }
        let feedback = feedback.filter(|f| !f.is_empty());

        if let Err(e) = self.api.submit_rating(suggestion_id, stars, feedback).await {
            self.gate.apply_error(&e);
            error!("평가 전송 실패 ({suggestion_id}): {e}");
            return false;
        }

        let mut state = self.state.lock();
        if let Some(s) = state.suggestions.iter_mut().find(|s| s.id == suggestion_id) {
            s.rating = Some(SuggestionRating {
                stars,
                feedback: feedback.map(str::to_string),
            });
        }
        info!("평가 완료: {suggestion_id} → {stars}점");
        true
    }

    /// 피드백 없이 바로 평가
    pub async fn submit_direct_rating(&self, suggestion_id: SuggestionId, stars: u8) -> bool {
        self.submit_rating(suggestion_id, stars, None).await
    }

    /// 평가 모달에서 선택한 제안 평가 (성공 시 모달 닫힘)
    pub async fn submit_selected_rating(&self, stars: u8, feedback: Option<&str>) -> bool {
        let Some(selection) = self.rating_selection() else {
            warn!("선택된 제안 없이 평가 요청");
            return false;
        };

        let ok = self
            .submit_rating(selection.suggestion_id, stars, feedback)
            .await;
        if ok {
            self.close_rating_modal();
        }
        ok
    }

    pub fn open_rating_modal(&self, suggestion_id: SuggestionId, preselected_rating: Option<u8>) {
        self.state.lock().rating_selection = Some(RatingSelection {
            suggestion_id,
            preselected_rating,
        });
    }

    pub fn close_rating_modal(&self) {
        self.state.lock().rating_selection = None;
    }

    pub fn rating_selection(&self) -> Option<RatingSelection> {
        self.state.lock().rating_selection
    }

    // ── 사용 기록 ─────────────────────────────────────────

    /// 제안을 호스트 초안에 삽입하고 사용 기록 시작
    pub async fn use_response(&self, suggestion: &Suggestion) -> bool {
        let html = text_to_draft_html(&suggestion.text);
        if let Err(e) = self.host.set_comment_text(&html).await {
            error!("초안 삽입 실패 ({}): {e}", suggestion.id);
            return false;
        }

        let previous = self.state.lock().pending_use.replace(PendingUse {
            suggestion_id: suggestion.id,
            draft_text: None,
        });
        if let Some(prev) = previous {
            debug!(
                "이전 사용 기록 덮어씀: {} → {}",
                prev.suggestion_id, suggestion.id
            );
        }
        info!("제안 {} 초안에 삽입", suggestion.id);
        true
    }

    /// 초안 저장 시점 텍스트 캡처 (사용 기록이 있을 때만)
    pub fn capture_pending_text(&self, html: impl Into<String>) -> bool {
        let mut state = self.state.lock();
        match state.pending_use.as_mut() {
            Some(pending) => {
                pending.draft_text = Some(html.into());
                true
            }
            None => false,
        }
    }

    /// 사용 기록 꺼내기 (저장소에서는 제거됨)
    pub fn take_pending_use(&self) -> Option<PendingUse> {
        self.state.lock().pending_use.take()
    }

    pub fn clear_pending_use(&self) {
        self.state.lock().pending_use = None;
    }

    pub fn pending_use(&self) -> Option<PendingUse> {
        self.state.lock().pending_use.clone()
    }

    /// 실제로 보낸 텍스트 기록
    pub async fn record_edit(
        &self,
        suggestion_id: SuggestionId,
        plain_text: &str,
    ) -> Result<(), CoreError> {
        self.api
            .edit_suggestion(suggestion_id, plain_text)
            .await
            .map(|_| ())
            .map_err(|e| {
                self.gate.apply_error(&e);
                e
            })
    }

    // ── 읽기 ──────────────────────────────────────────────

    pub fn snapshot(&self) -> SuggestionSnapshot {
        self.state.lock().clone()
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.state.lock().suggestions.clone()
    }

    pub fn total_count(&self) -> u64 {
        self.state.lock().total_count
    }

    pub fn current_page(&self) -> u32 {
        self.state.lock().current_page
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.state.lock().pagination
    }

    /// 다음 페이지 존재 여부
    pub fn has_more(&self) -> bool {
        self.state.lock().has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    pub fn load_state(&self) -> LoadState {
        self.state.lock().load_state
    }

    /// OAuth 연결 완료 여부
    pub fn is_ready(&self) -> bool {
        self.gate.is_connected()
    }

    /// 상태 초기화 (티켓은 유지)
    pub fn reset(&self) {
        *self.state.lock() = SuggestionSnapshot::default();
    }
}
