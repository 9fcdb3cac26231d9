//! 배송 이력 브라우저.
//!
//! 요청자 이메일로 배송을 페이지 단위(기본 5건)로 검색하고,
//! 이전/다음 페이지 이동과 추적 이벤트 모달 선택을 관리한다.

use moni_core::error::ApiErrorKind;
use moni_core::models::shipment::{Shipment, ShipmentId};
use moni_core::models::suggestion::Pagination;
use moni_core::ports::shipment_api::ShipmentApi;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
struct BrowserState {
    email: Option<String>,
    shipments: Vec<Shipment>,
    pagination: Option<Pagination>,
    current_page: u32,
    is_loading: bool,
    not_licensed: bool,
    api_key_invalid: bool,
    selected: Option<ShipmentId>,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            email: None,
            shipments: Vec::new(),
            pagination: None,
            current_page: 1,
            is_loading: false,
            not_licensed: false,
            api_key_invalid: false,
            selected: None,
        }
    }
}

/// 배송 이력 브라우저
pub struct ShipmentBrowser {
    api: Arc<dyn ShipmentApi>,
    page_size: u32,
    state: Mutex<BrowserState>,
}

impl ShipmentBrowser {
    pub fn new(api: Arc<dyn ShipmentApi>, page_size: u32) -> Self {
        Self {
            api,
            page_size,
            state: Mutex::new(BrowserState::default()),
        }
    }

    /// 요청자 이메일 설정
    pub fn initialize(&self, email: Option<String>) {
        debug!("배송 브라우저 초기화 (이메일 {})", if email.is_some() { "있음" } else { "없음" });
        self.state.lock().email = email.filter(|e| !e.trim().is_empty());
    }

    /// 전체 상태 초기화
    pub fn cleanup(&self) {
        *self.state.lock() = BrowserState::default();
    }

    /// 배송 페이지 조회
    pub async fn load(&self, page: u32) {
        let email = {
            let mut state = self.state.lock();
            let Some(email) = state.email.clone() else {
                state.shipments.clear();
                debug!("요청자 이메일 없음 — 배송 조회 생략");
                return;
            };
            state.is_loading = true;
            state.current_page = page;
            email
        };

        let result = self.api.search_shipments(&email, page, self.page_size).await;

        let mut state = self.state.lock();
        state.is_loading = false;
        match result {
            Ok(resp) => {
                state.pagination = resp.pagination();
                state.shipments = resp.data;
                state.not_licensed = false;
                state.api_key_invalid = false;
                info!("배송 {}건 표시 (page={page})", state.shipments.len());
            }
            Err(e) => {
                state.shipments.clear();
                match e.kind() {
                    ApiErrorKind::AuthInvalid => {
                        warn!("배송 API 키 오류: {e}");
                        state.api_key_invalid = true;
                    }
                    ApiErrorKind::NotLicensed => {
                        warn!("배송 기능 미계약: {e}");
                        state.not_licensed = true;
                    }
                    ApiErrorKind::Unclassified => error!("배송 조회 실패: {e}"),
                }
            }
        }
    }

    /// 현재 페이지 다시 조회
    pub async fn refresh(&self) {
        let page = self.current_page();
        self.load(page).await;
    }

    pub async fn go_to_previous_page(&self) {
        if self.can_go_previous() {
            let page = self.current_page() - 1;
            self.load(page).await;
        }
    }

    pub async fn go_to_next_page(&self) {
        if self.can_go_next() {
            let page = self.current_page() + 1;
            self.load(page).await;
        }
    }

    pub fn can_go_previous(&self) -> bool {
        self.state.lock().current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        let state = self.state.lock();
        state
            .pagination
            .is_some_and(|p| state.current_page < p.max_page)
    }

    /// 페이지 이동 UI 필요 여부
    pub fn has_pagination(&self) -> bool {
        self.state.lock().pagination.is_some_and(|p| p.max_page > 1)
    }

    // ── 추적 이벤트 모달 ──────────────────────────────────

    pub fn open_states_modal(&self, shipment_id: impl Into<ShipmentId>) {
        self.state.lock().selected = Some(shipment_id.into());
    }

    pub fn close_states_modal(&self) {
        self.state.lock().selected = None;
    }

    /// 모달에서 선택한 배송 (현재 목록에 없으면 None)
    pub fn selected_shipment(&self) -> Option<Shipment> {
        let state = self.state.lock();
        let id = state.selected.as_ref()?;
        state.shipments.iter().find(|s| &s.id == id).cloned()
    }

    // ── 읽기 ──────────────────────────────────────────────

    pub fn shipments(&self) -> Vec<Shipment> {
        self.state.lock().shipments.clone()
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.state.lock().pagination
    }

    pub fn current_page(&self) -> u32 {
        self.state.lock().current_page
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    pub fn is_not_licensed(&self) -> bool {
        self.state.lock().not_licensed
    }

    pub fn is_api_key_invalid(&self) -> bool {
        self.state.lock().api_key_invalid
    }

    pub fn email(&self) -> Option<String> {
        self.state.lock().email.clone()
    }
}
