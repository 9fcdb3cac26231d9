//! 지원 로케일.

use serde::{Deserialize, Serialize};

/// 번역이 제공되는 로케일
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLocale {
    #[default]
    De,
    En,
}

impl SupportedLocale {
    /// 호스트 로케일 문자열 매핑 (`de-CH` → `De`, 그 외 → `En`)
    pub fn from_host_locale(locale: &str) -> Self {
        let lang = locale
            .split('-')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if lang == "de" {
            SupportedLocale::De
        } else {
            SupportedLocale::En
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedLocale::De => "de",
            SupportedLocale::En => "en",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_regional_variants() {
        assert_eq!(SupportedLocale::from_host_locale("de-CH"), SupportedLocale::De);
        assert_eq!(SupportedLocale::from_host_locale("DE"), SupportedLocale::De);
        assert_eq!(SupportedLocale::from_host_locale("en-US"), SupportedLocale::En);
        assert_eq!(SupportedLocale::from_host_locale("fr"), SupportedLocale::En);
    }
}
