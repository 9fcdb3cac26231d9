//! 제안 프레젠터.
//!
//! Suggestion → 목록 표시용 데이터 변환.

use chrono::{DateTime, Utc};
use moni_core::models::suggestion::{ConfidenceLevel, Suggestion, SuggestionId};
use moni_core::text::truncate_text;

/// 미리보기 최대 글자 수
const PREVIEW_LENGTH: usize = 120;

/// 생성 후 경과 시간 (각 단위의 누적값)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAgo {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl TimeAgo {
    /// 두 시각 사이 경과 시간 (미래 시각은 0)
    pub fn between(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let minutes = (now - created_at).num_minutes().max(0);
        let hours = minutes / 60;
        Self {
            days: hours / 24,
            hours,
            minutes,
        }
    }

    /// 짧은 상대 시간 텍스트
    pub fn label(&self) -> String {
        if self.days > 0 {
            format!("{}일 전", self.days)
        } else if self.hours > 0 {
            format!("{}시간 전", self.hours)
        } else if self.minutes > 0 {
            format!("{}분 전", self.minutes)
        } else {
            "방금 전".to_string()
        }
    }
}

/// 목록 표시용 제안 데이터
#[derive(Debug, Clone)]
pub struct SuggestionView {
    pub id: SuggestionId,
    /// 본문 전체
    pub body: String,
    /// 목록 미리보기
    pub preview: String,
    pub confidence_level: ConfidenceLevel,
    /// 신뢰도 텍스트 (`87%`)
    pub confidence_text: String,
    pub time_ago: TimeAgo,
    /// 평가 별점 (미평가 None)
    pub rating_stars: Option<u8>,
    pub edited: bool,
    /// 생성 실패 시 사유
    pub failure: Option<String>,
}

/// Suggestion → SuggestionView 변환
pub fn present(suggestion: &Suggestion) -> SuggestionView {
    present_at(suggestion, Utc::now())
}

/// 기준 시각을 지정한 변환
pub fn present_at(suggestion: &Suggestion, now: DateTime<Utc>) -> SuggestionView {
    let failure = if suggestion.is_success {
        None
    } else {
        Some(
            suggestion
                .error
                .clone()
                .unwrap_or_else(|| "생성 실패".to_string()),
        )
    };

    SuggestionView {
        id: suggestion.id,
        body: suggestion.text.clone(),
        preview: truncate_text(&suggestion.text, PREVIEW_LENGTH),
        confidence_level: suggestion.confidence_level(),
        confidence_text: format!("{:.0}%", suggestion.confidence * 100.0),
        time_ago: TimeAgo::between(suggestion.created_at, now),
        rating_stars: suggestion.rating.as_ref().map(|r| r.stars),
        edited: suggestion.edited,
        failure,
    }
}

/// 여러 제안 일괄 변환
pub fn present_all(suggestions: &[Suggestion]) -> Vec<SuggestionView> {
    let now = Utc::now();
    suggestions.iter().map(|s| present_at(s, now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::suggestion;
    use chrono::Duration;
    use moni_core::models::suggestion::SuggestionRating;

    #[test]
    fn present_suggestion() {
        let mut s = suggestion(5, "Vielen Dank für Ihre Nachricht.");
        s.confidence = 0.87;
        s.rating = Some(SuggestionRating {
            stars: 4,
            feedback: None,
        });
        let now = s.created_at + Duration::minutes(125);

        let view = present_at(&s, now);
        assert_eq!(view.id, 5);
        assert_eq!(view.confidence_text, "87%");
        assert_eq!(view.confidence_level, ConfidenceLevel::High);
        assert_eq!(view.rating_stars, Some(4));
        assert_eq!(
            view.time_ago,
            TimeAgo {
                days: 0,
                hours: 2,
                minutes: 125
            }
        );
        assert_eq!(view.time_ago.label(), "2시간 전");
        assert!(view.failure.is_none());
    }

    #[test]
    fn failed_suggestion_has_reason() {
        let mut s = suggestion(1, "");
        s.is_success = false;
        let view = present_at(&s, s.created_at);
        assert_eq!(view.failure.as_deref(), Some("생성 실패"));

        s.error = Some("quota".to_string());
        let view = present_at(&s, s.created_at);
        assert_eq!(view.failure.as_deref(), Some("quota"));
    }

    #[test]
    fn long_text_preview_truncated() {
        let s = suggestion(1, &"a".repeat(300));
        let view = present_at(&s, s.created_at);
        assert_eq!(view.preview.chars().count(), PREVIEW_LENGTH);
        assert!(view.preview.ends_with("..."));
        assert_eq!(view.body.len(), 300);
    }

    #[test]
    fn time_ago_parts() {
        let base = suggestion(1, "x").created_at;
        let ago = TimeAgo::between(base, base + Duration::days(3) + Duration::minutes(61));
        assert_eq!(ago.days, 3);
        assert_eq!(ago.hours, 73);
        assert_eq!(ago.minutes, 3 * 24 * 60 + 61);
        assert_eq!(ago.label(), "3일 전");

        // 시계 오차로 미래 시각이면 0
        let future = TimeAgo::between(base + Duration::minutes(5), base);
        assert_eq!(future.label(), "방금 전");
    }

    #[test]
    fn present_all_suggestions() {
        let views = present_all(&[suggestion(1, "a"), suggestion(2, "b")]);
        assert_eq!(views.len(), 2);
        assert_eq!(views[1].id, 2);
    }
}
