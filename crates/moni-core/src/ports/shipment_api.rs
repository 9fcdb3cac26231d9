//! 배송 API 포트.
//!
//! 구현: `moni-network::shipment_client::ShipmentApiClient`

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::shipment::{FileDownload, ShipmentsPage};

/// 배송 검색 + 문서 다운로드
#[async_trait]
pub trait ShipmentApi: Send + Sync {
    /// 요청자 이메일로 배송 검색
    async fn search_shipments(
        &self,
        email: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ShipmentsPage, CoreError>;

    /// 배송 완료 증빙 다운로드
    async fn proof_of_delivery(&self, shipment_id: &str) -> Result<FileDownload, CoreError>;

    /// 수령 서명 다운로드
    async fn signature(
        &self,
        shipment_id: &str,
        signature_id: u64,
    ) -> Result<FileDownload, CoreError>;
}
