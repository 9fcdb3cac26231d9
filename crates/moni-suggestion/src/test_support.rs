//! 테스트용 인메모리 포트 구현.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use moni_core::error::CoreError;
use moni_core::models::oauth::{AuthWindowSpec, OAuthInitResponse, OAuthStatusResponse};
use moni_core::models::suggestion::{
    Pagination, SuccessResponse, Suggestion, SuggestionId, SuggestionsPage, TicketId,
};
use moni_core::models::ticket::{
    AccountContext, AppMetadata, AuthorRole, ConversationMessage, MessageAuthor,
};
use moni_core::ports::auth_window::{AuthWindow, AuthWindowOpener};
use moni_core::ports::host::TicketHost;
use moni_core::ports::suggestion_api::SuggestionApi;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

pub fn suggestion(id: SuggestionId, text: &str) -> Suggestion {
    Suggestion {
        id,
        text: text.to_string(),
        confidence: 0.9,
        created_at: Utc.with_ymd_and_hms(2026, 10, 1, 10, 0, 0).unwrap(),
        edited: false,
        rating: None,
        is_success: true,
        error: None,
    }
}

pub fn page_of(ids: &[SuggestionId], total: u64, max_page: u32) -> SuggestionsPage {
    SuggestionsPage {
        suggestions: ids
            .iter()
            .map(|id| suggestion(*id, &format!("Antwort {id}")))
            .collect(),
        total_count: total,
        pagination: Some(Pagination {
            current_page: 1,
            max_page,
            per_page: 10,
            total,
        }),
    }
}

pub fn message(role: AuthorRole, value: &str) -> ConversationMessage {
    ConversationMessage {
        author: Some(MessageAuthor { role: Some(role) }),
        value: value.to_string(),
    }
}

/// 스크립트 가능한 제안 API
pub struct FakeApi {
    pub page: Mutex<SuggestionsPage>,
    pub fail_status: Mutex<Option<u16>>,
    pub get_calls: AtomicUsize,
    pub requested_pages: Mutex<Vec<(TicketId, u32)>>,
    pub ratings: Mutex<Vec<(SuggestionId, u8, Option<String>)>>,
    pub rating_fail: Mutex<Option<u16>>,
    pub edits: Mutex<Vec<(SuggestionId, String)>>,
    pub edit_fail: Mutex<Option<u16>>,
    /// Ok(connected) 또는 Err(status)
    pub oauth_status: Mutex<Result<bool, u16>>,
    pub authorize_url: Mutex<Result<String, u16>>,
    /// 설정되면 제안 조회가 알림을 받을 때까지 멈춘다
    pub hold: Mutex<Option<Arc<Notify>>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            page: Mutex::new(SuggestionsPage::default()),
            fail_status: Mutex::new(None),
            get_calls: AtomicUsize::new(0),
            requested_pages: Mutex::new(Vec::new()),
            ratings: Mutex::new(Vec::new()),
            rating_fail: Mutex::new(None),
            edits: Mutex::new(Vec::new()),
            edit_fail: Mutex::new(None),
            oauth_status: Mutex::new(Ok(true)),
            authorize_url: Mutex::new(Ok("https://auth.example/authorize".to_string())),
            hold: Mutex::new(None),
        }
    }
}

impl FakeApi {
    pub fn with_page(page: SuggestionsPage) -> Arc<Self> {
        let api = Self::default();
        *api.page.lock() = page;
        Arc::new(api)
    }

    pub fn set_page(&self, page: SuggestionsPage) {
        *self.page.lock() = page;
    }

    pub fn fail_with(&self, status: Option<u16>) {
        *self.fail_status.lock() = status;
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// 이후 제안 조회를 멈춰 두고, 풀어 줄 알림 핸들 반환
    pub fn hold_requests(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.hold.lock() = Some(Arc::clone(&notify));
        notify
    }

    pub fn release_requests(&self) {
        *self.hold.lock() = None;
    }
}

#[async_trait]
impl SuggestionApi for FakeApi {
    async fn get_suggestions(
        &self,
        ticket_id: TicketId,
        page: u32,
    ) -> Result<SuggestionsPage, CoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_pages.lock().push((ticket_id, page));
        let hold = self.hold.lock().clone();
        if let Some(notify) = hold {
            notify.notified().await;
        }
        if let Some(status) = *self.fail_status.lock() {
            return Err(CoreError::from_status(status, "scripted"));
        }
        Ok(self.page.lock().clone())
    }

    async fn submit_rating(
        &self,
        suggestion_id: SuggestionId,
        rating: u8,
        feedback: Option<&str>,
    ) -> Result<SuccessResponse, CoreError> {
        if let Some(status) = *self.rating_fail.lock() {
            return Err(CoreError::from_status(status, "scripted"));
        }
        self.ratings
            .lock()
            .push((suggestion_id, rating, feedback.map(str::to_string)));
        Ok(SuccessResponse { success: true })
    }

    async fn edit_suggestion(
        &self,
        suggestion_id: SuggestionId,
        content: &str,
    ) -> Result<SuccessResponse, CoreError> {
        if let Some(status) = *self.edit_fail.lock() {
            return Err(CoreError::from_status(status, "scripted"));
        }
        self.edits.lock().push((suggestion_id, content.to_string()));
        Ok(SuccessResponse { success: true })
    }

    async fn oauth_status(&self) -> Result<OAuthStatusResponse, CoreError> {
        match *self.oauth_status.lock() {
            Ok(connected) => Ok(OAuthStatusResponse {
                connected,
                subdomain: None,
            }),
            Err(status) => Err(CoreError::from_status(status, "scripted")),
        }
    }

    async fn init_oauth(&self, _subdomain: &str) -> Result<OAuthInitResponse, CoreError> {
        match &*self.authorize_url.lock() {
            Ok(url) => Ok(OAuthInitResponse {
                authorize_url: url.clone(),
            }),
            Err(status) => Err(CoreError::from_status(*status, "scripted")),
        }
    }
}

/// 인메모리 티켓 호스트
#[derive(Default)]
pub struct FakeHost {
    pub draft: Mutex<String>,
    pub drafts_written: Mutex<Vec<String>>,
    pub conversation: Mutex<Vec<ConversationMessage>>,
    pub fail_writes: AtomicBool,
    pub fail_reads: AtomicBool,
}

impl FakeHost {
    pub fn set_draft(&self, html: &str) {
        *self.draft.lock() = html.to_string();
    }

    pub fn push_message(&self, role: AuthorRole, value: &str) {
        self.conversation.lock().push(message(role, value));
    }

    fn read_guard(&self) -> Result<(), CoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(CoreError::Host("읽기 실패".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TicketHost for FakeHost {
    async fn metadata(&self) -> Result<AppMetadata, CoreError> {
        self.read_guard()?;
        Ok(AppMetadata::default())
    }

    async fn account_context(&self) -> Result<AccountContext, CoreError> {
        self.read_guard()?;
        Ok(AccountContext {
            subdomain: "acme".to_string(),
        })
    }

    async fn ticket_id(&self) -> Result<Option<TicketId>, CoreError> {
        self.read_guard()?;
        Ok(Some(42))
    }

    async fn requester_email(&self) -> Result<Option<String>, CoreError> {
        self.read_guard()?;
        Ok(None)
    }

    async fn user_locale(&self) -> Result<String, CoreError> {
        Ok("de".to_string())
    }

    async fn comment_text(&self) -> Result<String, CoreError> {
        self.read_guard()?;
        Ok(self.draft.lock().clone())
    }

    async fn set_comment_text(&self, html: &str) -> Result<(), CoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::Host("초안 쓰기 실패".to_string()));
        }
        *self.draft.lock() = html.to_string();
        self.drafts_written.lock().push(html.to_string());
        Ok(())
    }

    async fn conversation(&self) -> Result<Vec<ConversationMessage>, CoreError> {
        self.read_guard()?;
        Ok(self.conversation.lock().clone())
    }
}

/// 닫힘 플래그를 공유하는 가짜 인증 창
pub struct FakeWindow {
    closed: Arc<AtomicBool>,
}

impl AuthWindow for FakeWindow {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct FakeOpener {
    pub blocked: AtomicBool,
    pub closed: Arc<AtomicBool>,
    pub opened: Mutex<Vec<(String, AuthWindowSpec)>>,
}

impl FakeOpener {
    pub fn close_window(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

impl AuthWindowOpener for FakeOpener {
    fn open(&self, url: &str, spec: &AuthWindowSpec) -> Option<Box<dyn AuthWindow>> {
        if self.blocked.load(Ordering::SeqCst) {
            return None;
        }
        self.opened.lock().push((url.to_string(), spec.clone()));
        Some(Box::new(FakeWindow {
            closed: Arc::clone(&self.closed),
        }))
    }
}
