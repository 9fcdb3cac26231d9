//! 추적 이벤트 표시 포맷.

use chrono::DateTime;
use moni_core::models::shipment::ShipmentState;

/// 운송사가 위치를 모를 때 보내는 값
const UNKNOWN_LOCATION: &str = "Standort nicht bekannt";

/// 운송사가 이벤트가 없을 때 보내는 값 (대소문자 무시)
const NO_EVENT: &str = "kein ereignis";

const EMPTY: &str = "-";

/// 스캔 날짜/시각 표시값
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanDateTime {
    /// `dd.mm.yyyy`
    pub date: String,
    /// `hh:mm`
    pub time: String,
}

/// 위치 · 도시 · 국가 (`, ` 구분, 없으면 `-`)
pub fn format_state_location(state: &ShipmentState) -> String {
    let parts: Vec<&str> = [
        state
            .location
            .as_deref()
            .filter(|l| *l != UNKNOWN_LOCATION),
        state.city.as_deref(),
        state.country.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|p| !p.is_empty())
    .collect();

    join_or_dash(&parts, ", ")
}

/// 상태 · 이벤트 (` - ` 구분, 없으면 `-`)
pub fn format_state_info(state: &ShipmentState) -> String {
    let parts: Vec<&str> = [
        state.state.as_deref(),
        state
            .event
            .as_deref()
            .filter(|e| !e.eq_ignore_ascii_case(NO_EVENT)),
    ]
    .into_iter()
    .flatten()
    .filter(|p| !p.is_empty())
    .collect();

    join_or_dash(&parts, " - ")
}

/// RFC 3339 스캔 시각 → 날짜/시각
///
/// 타임스탬프에 담긴 오프셋 기준으로 표시한다.
/// 비어 있거나 해석할 수 없으면 날짜 `-`, 시각은 빈 문자열.
pub fn format_scan_date_time(scan_time: &str) -> ScanDateTime {
    match DateTime::parse_from_rfc3339(scan_time.trim()) {
        Ok(dt) => ScanDateTime {
            date: dt.format("%d.%m.%Y").to_string(),
            time: dt.format("%H:%M").to_string(),
        },
        Err(_) => ScanDateTime {
            date: EMPTY.to_string(),
            time: String::new(),
        },
    }
}

fn join_or_dash(parts: &[&str], sep: &str) -> String {
    if parts.is_empty() {
        EMPTY.to_string()
    } else {
        parts.join(sep)
    }
}
