//! 테스트용 인메모리 배송 API.

use async_trait::async_trait;
use moni_core::error::CoreError;
use moni_core::models::shipment::{FileDownload, Shipment, ShipmentsMeta, ShipmentsPage};
use moni_core::models::suggestion::Pagination;
use moni_core::ports::shipment_api::ShipmentApi;
use parking_lot::Mutex;

pub fn shipment(id: &str) -> Shipment {
    Shipment {
        id: id.to_string(),
        tracking_code: format!("TRK-{id}"),
        order: "1001".to_string(),
        name: "Erika Mustermann".to_string(),
        street: None,
        zip_code: None,
        city: Some("Hamburg".to_string()),
        country: Some("DE".to_string()),
        state: "in_transit".to_string(),
        states: Vec::new(),
        tracking_link: None,
        paqato_link: format!("https://track.example/{id}"),
        carrier_name: "DHL".to_string(),
        carrier_logo: "dhl.svg".to_string(),
        portal_link: None,
        shop_token: None,
        has_proof_of_delivery: false,
        signature_ids: Vec::new(),
        estimated_delivery: None,
        order_details: None,
    }
}

pub fn shipments_page(ids: &[&str], current_page: u32, max_page: u32) -> ShipmentsPage {
    ShipmentsPage {
        data: ids.iter().map(|id| shipment(id)).collect(),
        meta: Some(ShipmentsMeta {
            pagination: Some(Pagination {
                current_page,
                max_page,
                per_page: 5,
                total: u64::from(max_page) * 5,
            }),
        }),
    }
}

#[derive(Default)]
pub struct FakeShipmentApi {
    pub page: Mutex<ShipmentsPage>,
    pub fail_status: Mutex<Option<u16>>,
    pub searches: Mutex<Vec<(String, u32, u32)>>,
    pub file: Mutex<Option<FileDownload>>,
    pub downloads: Mutex<Vec<(String, Option<u64>)>>,
}

impl FakeShipmentApi {
    fn fail(&self) -> Result<(), CoreError> {
        match *self.fail_status.lock() {
            Some(status) => Err(CoreError::from_status(status, "scripted")),
            None => Ok(()),
        }
    }

    fn file(&self) -> Result<FileDownload, CoreError> {
        self.file.lock().clone().ok_or_else(|| CoreError::NotFound {
            resource_type: "document".to_string(),
            id: "scripted".to_string(),
        })
    }
}

#[async_trait]
impl ShipmentApi for FakeShipmentApi {
    async fn search_shipments(
        &self,
        email: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ShipmentsPage, CoreError> {
        self.searches
            .lock()
            .push((email.to_string(), page, page_size));
        self.fail()?;
        Ok(self.page.lock().clone())
    }

    async fn proof_of_delivery(&self, shipment_id: &str) -> Result<FileDownload, CoreError> {
        self.downloads.lock().push((shipment_id.to_string(), None));
        self.fail()?;
        self.file()
    }

    async fn signature(
        &self,
        shipment_id: &str,
        signature_id: u64,
    ) -> Result<FileDownload, CoreError> {
        self.downloads
            .lock()
            .push((shipment_id.to_string(), Some(signature_id)));
        self.fail()?;
        self.file()
    }
}
