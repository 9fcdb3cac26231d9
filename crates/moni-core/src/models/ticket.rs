//! 호스트 티켓 워크스페이스 모델.
//!
//! 대화 메시지, 라이프사이클 이벤트, 계정 컨텍스트, 앱 메타데이터.

use serde::{Deserialize, Serialize};

/// 메시지 작성자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorRole {
    /// 고객
    EndUser,
    /// 상담원
    Agent,
    /// 관리자
    Admin,
    /// 알 수 없는 역할
    #[serde(other)]
    Other,
}

/// 메시지 작성자
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAuthor {
    #[serde(default)]
    pub role: Option<AuthorRole>,
}

/// 티켓 대화 메시지
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    #[serde(default)]
    pub author: Option<MessageAuthor>,
    #[serde(default)]
    pub value: String,
}

impl ConversationMessage {
    /// 작성자 역할 (없으면 None)
    pub fn author_role(&self) -> Option<AuthorRole> {
        self.author.as_ref().and_then(|a| a.role)
    }

    /// 고객이 작성한 메시지인지
    pub fn is_from_end_user(&self) -> bool {
        self.author_role() == Some(AuthorRole::EndUser)
    }
}

/// 호스트 라이프사이클 이벤트
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    /// 초안 저장 직전
    DraftSave,
    /// 티켓 제출 완료
    SubmitComplete,
    /// 대화 변경 (새 메시지)
    ConversationChanged,
}

impl HostEvent {
    /// 호스트 이벤트 이름
    pub fn host_name(&self) -> &'static str {
        match self {
            HostEvent::DraftSave => "ticket.save",
            HostEvent::SubmitComplete => "ticket.submit.done",
            HostEvent::ConversationChanged => "ticket.conversation.changed",
        }
    }

    /// 호스트 이벤트 이름 → 이벤트 (구독하지 않는 이름은 None)
    pub fn from_host_name(name: &str) -> Option<Self> {
        match name {
            "ticket.save" => Some(HostEvent::DraftSave),
            "ticket.submit.done" => Some(HostEvent::SubmitComplete),
            "ticket.conversation.changed" => Some(HostEvent::ConversationChanged),
            _ => None,
        }
    }

    /// 구독 대상 전체
    pub const ALL: [HostEvent; 3] = [
        HostEvent::DraftSave,
        HostEvent::SubmitComplete,
        HostEvent::ConversationChanged,
    ];
}

impl std::fmt::Display for HostEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.host_name())
    }
}

/// 계정 컨텍스트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountContext {
    /// 테넌트 서브도메인
    pub subdomain: String,
}

/// 호스트 앱 설정 (메타데이터)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSettings {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, rename = "paqato_ai_agent_enabled")]
    pub ai_agent_enabled: Option<bool>,
    #[serde(default, rename = "paqato_shipment_history_enabled")]
    pub shipment_history_enabled: Option<bool>,
}

/// 호스트 앱 메타데이터
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub settings: HostSettings,
}
