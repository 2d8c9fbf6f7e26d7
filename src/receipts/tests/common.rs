use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::receipts::domain::{Item, Receipt, ReceiptId};
use crate::receipts::store::{InMemoryReceiptStore, ReceiptStore, StoreError};
use crate::receipts::{receipt_router, ReceiptService};

pub(super) fn target_receipt() -> Receipt {
    Receipt {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-01".to_string(),
        purchase_time: "13:01".to_string(),
        items: vec![Item::new("Mountain Dew 12PK", "6.49")],
        total: "35.35".to_string(),
    }
}

pub(super) fn walmart_receipt() -> Receipt {
    Receipt {
        retailer: "Walmart".to_string(),
        purchase_date: "2023-12-25".to_string(),
        purchase_time: "15:30".to_string(),
        items: vec![Item::new("Pepsi", "2.00")],
        total: "2.00".to_string(),
    }
}

pub(super) fn build_service() -> (ReceiptService<InMemoryReceiptStore>, Arc<InMemoryReceiptStore>) {
    let store = Arc::new(InMemoryReceiptStore::new());
    let service = ReceiptService::new(store.clone());
    (service, store)
}

pub(super) fn router_with_service(service: ReceiptService<InMemoryReceiptStore>) -> axum::Router {
    receipt_router(Arc::new(service))
}

/// Store whose backend is permanently down.
pub(super) struct UnavailableStore;

impl ReceiptStore for UnavailableStore {
    fn put(&self, _points: u64) -> Result<ReceiptId, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn get(&self, _id: &ReceiptId) -> Result<Option<u64>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

pub(super) fn json_post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request builds")
}

pub(super) fn receipt_body(receipt: &Receipt) -> Body {
    Body::from(serde_json::to_vec(receipt).expect("receipt serializes"))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
