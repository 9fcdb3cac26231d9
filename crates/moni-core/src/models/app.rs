//! 앱 전체 상태 모델.

use serde::{Deserialize, Serialize};

use super::ticket::HostSettings;

/// 기능 활성화 설정
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub ai_agent_enabled: bool,
    pub shipment_history_enabled: bool,
}

impl AppSettings {
    /// 활성화된 기능 수
    pub fn enabled_features_count(&self) -> usize {
        usize::from(self.ai_agent_enabled) + usize::from(self.shipment_history_enabled)
    }

    /// 두 기능 모두 활성화 → 분할 패널
    pub fn is_split_panel(&self) -> bool {
        self.enabled_features_count() == 2
    }
}

impl From<&HostSettings> for AppSettings {
    fn from(settings: &HostSettings) -> Self {
        Self {
            ai_agent_enabled: settings.ai_agent_enabled.unwrap_or(false),
            shipment_history_enabled: settings.shipment_history_enabled.unwrap_or(false),
        }
    }
}

/// 앱 부트스트랩 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    Loading,
    Error(String),
    FeatureDisabled,
    FeatureNotLicensed,
    ApiKeyInvalid,
    Ready,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_panel_needs_both_features() {
        let both = AppSettings {
            ai_agent_enabled: true,
            shipment_history_enabled: true,
        };
        assert_eq!(both.enabled_features_count(), 2);
        assert!(both.is_split_panel());

        let one = AppSettings {
            ai_agent_enabled: true,
            shipment_history_enabled: false,
        };
        assert_eq!(one.enabled_features_count(), 1);
        assert!(!one.is_split_panel());
    }
}
