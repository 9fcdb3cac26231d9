//! 배송 증빙 문서 다운로드.
//!
//! 배송 API가 base64로 내려주는 문서를 바이트로 디코딩한다.

use base64::Engine;
use moni_core::error::CoreError;
use moni_core::models::shipment::FileDownload;
use moni_core::ports::shipment_api::ShipmentApi;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// 디코딩된 문서
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedDocument {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}

impl DownloadedDocument {
    /// 디렉터리에 파일로 저장 (파일명의 경로 구성요소는 제거)
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, CoreError> {
        let name = Path::new(&self.filename)
            .file_name()
            .ok_or_else(|| CoreError::Validation {
                field: "filename".to_string(),
                message: format!("파일명으로 쓸 수 없음: {:?}", self.filename),
            })?;

        let path = dir.join(name);
        std::fs::write(&path, &self.bytes)?;
        info!("문서 저장: {}", path.display());
        Ok(path)
    }
}

/// 배송 문서 다운로더
pub struct DocumentDownloader {
    api: Arc<dyn ShipmentApi>,
}

impl DocumentDownloader {
    pub fn new(api: Arc<dyn ShipmentApi>) -> Self {
        Self { api }
    }

    /// 배송 완료 증빙
    pub async fn download_proof_of_delivery(
        &self,
        shipment_id: &str,
    ) -> Result<DownloadedDocument, CoreError> {
        let file = self.api.proof_of_delivery(shipment_id).await?;
        decode(file)
    }

    /// 수령 서명
    pub async fn download_signature(
        &self,
        shipment_id: &str,
        signature_id: u64,
    ) -> Result<DownloadedDocument, CoreError> {
        let file = self.api.signature(shipment_id, signature_id).await?;
        decode(file)
    }
}

fn decode(file: FileDownload) -> Result<DownloadedDocument, CoreError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(file.data.trim())
        .map_err(|e| CoreError::Decode(format!("{}: {e}", file.filename)))?;

    debug!("문서 디코딩: {} ({} bytes)", file.filename, bytes.len());
    Ok(DownloadedDocument {
        bytes,
        content_type: file.content_type,
        filename: file.filename,
    })
}
