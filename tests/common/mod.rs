//! In-process stand-in for the remote product service.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use inventory_admin::{dtos::product::ProductPayload, models::product::Product};
use serde_json::json;
use tokio::net::TcpListener;

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub path_barcode: Option<String>,
    pub body: Option<ProductPayload>,
}

#[derive(Clone, Default)]
pub struct StubApi {
    pub products: Arc<Mutex<Vec<Product>>>,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
    /// When set, every call answers 500 with this optional message.
    pub broken: Arc<Mutex<Option<Option<String>>>>,
    /// Delays for the next list calls, in arrival order.
    pub list_delays: Arc<Mutex<VecDeque<Duration>>>,
}

impl StubApi {
    pub fn with_products(products: Vec<Product>) -> Self {
        let stub = Self::default();
        *stub.products.lock().unwrap() = products;
        stub
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn break_with(&self, message: Option<&str>) {
        *self.broken.lock().unwrap() = Some(message.map(str::to_string));
    }

    /// The next list calls read the catalog on arrival, then answer after
    /// the given delays.
    pub fn delay_lists(&self, delays: &[Duration]) {
        self.list_delays.lock().unwrap().extend(delays.iter().copied());
    }

    pub fn add(&self, product: Product) {
        self.products.lock().unwrap().push(product);
    }

    fn record(&self, method: &'static str, path_barcode: Option<String>, body: Option<ProductPayload>) {
        self.requests.lock().unwrap().push(Recorded { method, path_barcode, body });
    }

    fn failure(&self) -> Option<Response> {
        self.broken.lock().unwrap().clone().map(|message| match message {
            Some(m) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": m }))).into_response(),
            None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        })
    }

    /// Binds an ephemeral port and returns the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/products", get(list).post(create))
            .route("/product/{barcode}", put(update).delete(remove))
            .with_state(self.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

pub fn product(barcode: &str, name: &str, quantity: i64, minimum_stock: i64) -> Product {
    Product {
        barcode: barcode.into(),
        product_name: name.into(),
        cost_price: 70.0,
        selling_price: 100.0,
        quantity,
        minimum_stock,
    }
}

async fn list(State(stub): State<StubApi>) -> Response {
    stub.record("GET", None, None);
    if let Some(failure) = stub.failure() {
        return failure;
    }
    let products = stub.products.lock().unwrap().clone();
    let delay = stub.list_delays.lock().unwrap().pop_front();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    Json(products).into_response()
}

async fn create(State(stub): State<StubApi>, Json(payload): Json<ProductPayload>) -> Response {
    stub.record("POST", None, Some(payload.clone()));
    if let Some(failure) = stub.failure() {
        return failure;
    }
    let mut products = stub.products.lock().unwrap();
    if products.iter().any(|p| p.barcode == payload.barcode) {
        return (StatusCode::CONFLICT, Json(json!({ "message": "Barcode already exists" }))).into_response();
    }
    products.push(payload.into());
    (StatusCode::CREATED, Json(json!({ "message": "Product created" }))).into_response()
}

async fn update(
    State(stub): State<StubApi>,
    Path(barcode): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> Response {
    stub.record("PUT", Some(barcode.clone()), Some(payload.clone()));
    if let Some(failure) = stub.failure() {
        return failure;
    }
    let mut products = stub.products.lock().unwrap();
    match products.iter_mut().find(|p| p.barcode == barcode) {
        Some(slot) => {
            *slot = payload.into();
            // empty body: the client falls back to its own message
            StatusCode::OK.into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Product not found" }))).into_response(),
    }
}

async fn remove(State(stub): State<StubApi>, Path(barcode): Path<String>) -> Response {
    stub.record("DELETE", Some(barcode.clone()), None);
    if let Some(failure) = stub.failure() {
        return failure;
    }
    let mut products = stub.products.lock().unwrap();
    let before = products.len();
    products.retain(|p| p.barcode != barcode);
    if products.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({ "message": "Product deleted" })).into_response()
}
