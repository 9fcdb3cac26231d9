//! 배송 모델.
//!
//! 요청자 이메일로 검색하는 배송 추적 레코드와 문서 다운로드 페이로드.

use serde::{Deserialize, Serialize};

use super::suggestion::Pagination;

/// 배송 ID
pub type ShipmentId = String;

/// 배송 추적 이벤트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentState {
    pub scan_time: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// 예상 배송 시간대
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedDelivery {
    pub date: String,
    pub time_from: String,
    pub time_to: String,
}

/// 주문 품목
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub line_item_number: Option<String>,
    #[serde(default)]
    pub article_number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub total_price: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// 주문 상세
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub order_number: String,
    pub order_date: String,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    pub paqato_order_link: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// 배송 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: ShipmentId,
    pub tracking_code: String,
    pub order: String,
    pub name: String,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub state: String,
    #[serde(default)]
    pub states: Vec<ShipmentState>,
    #[serde(default)]
    pub tracking_link: Option<String>,
    pub paqato_link: String,
    pub carrier_name: String,
    pub carrier_logo: String,
    #[serde(default)]
    pub portal_link: Option<String>,
    #[serde(default)]
    pub shop_token: Option<String>,
    #[serde(default)]
    pub has_proof_of_delivery: bool,
    #[serde(default)]
    pub signature_ids: Vec<u64>,
    #[serde(default)]
    pub estimated_delivery: Option<EstimatedDelivery>,
    #[serde(default)]
    pub order_details: Option<OrderDetails>,
}

/// 검색 응답 메타
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentsMeta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// `GET /v3/shipments/search` 응답
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentsPage {
    #[serde(default)]
    pub data: Vec<Shipment>,
    #[serde(default)]
    pub meta: Option<ShipmentsMeta>,
}

impl ShipmentsPage {
    pub fn pagination(&self) -> Option<Pagination> {
        self.meta.as_ref().and_then(|m| m.pagination)
    }
}

/// 문서 다운로드 응답 (base64 페이로드)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDownload {
    pub data: String,
    pub content_type: String,
    pub filename: String,
}
