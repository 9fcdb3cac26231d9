//! 고정 값 기반 호스트 어댑터.
//!
//! 호스트 플랫폼 밖(CLI, 통합 테스트)에서 티켓 워크스페이스를 흉내 낸다.
//! 초안과 대화는 메모리에 보관한다.

use async_trait::async_trait;
use moni_core::error::CoreError;
use moni_core::models::oauth::AuthWindowSpec;
use moni_core::models::suggestion::TicketId;
use moni_core::models::ticket::{
    AccountContext, AppMetadata, AuthorRole, ConversationMessage, HostSettings, MessageAuthor,
};
use moni_core::ports::auth_window::{AuthWindow, AuthWindowOpener};
use moni_core::ports::host::TicketHost;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 고정 티켓 호스트
pub struct StaticTicketHost {
    settings: HostSettings,
    subdomain: String,
    ticket_id: Option<TicketId>,
    requester_email: Option<String>,
    locale: String,
    draft: Mutex<String>,
    conversation: Mutex<Vec<ConversationMessage>>,
}

impl StaticTicketHost {
    /// 두 기능 모두 켜진 호스트
    pub fn new(subdomain: impl Into<String>, ticket_id: Option<TicketId>) -> Self {
        Self {
            settings: HostSettings {
                token: None,
                ai_agent_enabled: Some(true),
                shipment_history_enabled: Some(true),
            },
            subdomain: subdomain.into(),
            ticket_id,
            requester_email: None,
            locale: "de".to_string(),
            draft: Mutex::new(String::new()),
            conversation: Mutex::new(Vec::new()),
        }
    }

    pub fn with_features(mut self, ai_agent: bool, shipment_history: bool) -> Self {
        self.settings.ai_agent_enabled = Some(ai_agent);
        self.settings.shipment_history_enabled = Some(shipment_history);
        self
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.requester_email = email;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// 현재 초안 (HTML)
    pub fn draft(&self) -> String {
        self.draft.lock().clone()
    }

    /// 상담원이 편집기에서 초안을 고친 것처럼 덮어쓰기
    pub fn edit_draft(&self, html: impl Into<String>) {
        *self.draft.lock() = html.into();
    }

    /// 대화에 메시지 추가
    pub fn push_message(&self, role: AuthorRole, value: impl Into<String>) {
        self.conversation.lock().push(ConversationMessage {
            author: Some(MessageAuthor { role: Some(role) }),
            value: value.into(),
        });
    }
}

#[async_trait]
impl TicketHost for StaticTicketHost {
    async fn metadata(&self) -> Result<AppMetadata, CoreError> {
        Ok(AppMetadata {
            settings: self.settings.clone(),
        })
    }

    async fn account_context(&self) -> Result<AccountContext, CoreError> {
        Ok(AccountContext {
            subdomain: self.subdomain.clone(),
        })
    }

    async fn ticket_id(&self) -> Result<Option<TicketId>, CoreError> {
        Ok(self.ticket_id)
    }

    async fn requester_email(&self) -> Result<Option<String>, CoreError> {
        Ok(self.requester_email.clone())
    }

    async fn user_locale(&self) -> Result<String, CoreError> {
        Ok(self.locale.clone())
    }

    async fn comment_text(&self) -> Result<String, CoreError> {
        Ok(self.draft())
    }

    async fn set_comment_text(&self, html: &str) -> Result<(), CoreError> {
        debug!("초안 설정 ({}자)", html.chars().count());
        self.edit_draft(html);
        Ok(())
    }

    async fn conversation(&self) -> Result<Vec<ConversationMessage>, CoreError> {
        Ok(self.conversation.lock().clone())
    }
}

/// 콘솔 인증 창
///
/// 인증 URL을 출력하고, 표준 입력에서 한 줄을 읽으면 닫힌 것으로 본다.
pub struct ConsoleAuthOpener;

struct ConsoleWindow {
    closed: Arc<AtomicBool>,
}

impl AuthWindow for ConsoleWindow {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl AuthWindowOpener for ConsoleAuthOpener {
    fn open(&self, url: &str, spec: &AuthWindowSpec) -> Option<Box<dyn AuthWindow>> {
        println!();
        println!("브라우저에서 아래 주소를 열어 계정을 연결하세요 ({}):", spec.name);
        println!("  {url}");
        println!("완료되면 Enter를 누르세요.");

        let closed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&closed);
        let spawned = std::thread::Builder::new()
            .name("moni-auth-stdin".to_string())
            .spawn(move || {
                let mut line = String::new();
                if let Err(e) = std::io::stdin().read_line(&mut line) {
                    warn!("표준 입력 읽기 실패: {e}");
                }
                flag.store(true, Ordering::SeqCst);
            });

        match spawned {
            Ok(_) => {
                info!("콘솔 인증 대기 시작");
                Some(Box::new(ConsoleWindow { closed }))
            }
            Err(e) => {
                warn!("입력 대기 스레드 생성 실패: {e}");
                None
            }
        }
    }
}

/// 창을 열 수 없는 환경용 (항상 차단)
pub struct HeadlessAuthOpener;

impl AuthWindowOpener for HeadlessAuthOpener {
    fn open(&self, url: &str, _spec: &AuthWindowSpec) -> Option<Box<dyn AuthWindow>> {
        debug!("인증 창 미지원 환경, 열기 거부: {url}");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_host_roundtrip() {
        let host = StaticTicketHost::new("acme", Some(42))
            .with_features(true, false)
            .with_email(Some("erika@example.com".to_string()))
            .with_locale("en-US");

        let meta = host.metadata().await.unwrap();
        assert_eq!(meta.settings.ai_agent_enabled, Some(true));
        assert_eq!(meta.settings.shipment_history_enabled, Some(false));
        assert_eq!(host.account_context().await.unwrap().subdomain, "acme");
        assert_eq!(host.ticket_id().await.unwrap(), Some(42));
        assert_eq!(host.user_locale().await.unwrap(), "en-US");

        host.set_comment_text("Hallo<br>Welt").await.unwrap();
        assert_eq!(host.comment_text().await.unwrap(), "Hallo<br>Welt");

        host.push_message(AuthorRole::EndUser, "Hi");
        let conv = host.conversation().await.unwrap();
        assert!(conv[0].is_from_end_user());
    }

    #[test]
    fn headless_opener_blocks() {
        let spec = AuthWindowSpec {
            name: "paqato_oauth".to_string(),
            width: 600,
            height: 700,
        };
        assert!(HeadlessAuthOpener.open("https://auth.example", &spec).is_none());
    }
}
