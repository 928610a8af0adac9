//! In-memory stand-in for the remote product service.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::dtos::product::ProductPayload;
use crate::error::{ServiceError, ServiceResult};
use crate::models::product::Product;
use crate::services::product_service::ProductService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    List,
    Create,
    Update,
    Delete,
}

/// What an update does when the body carries a different barcode than the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodePolicy {
    /// The record moves to the new barcode.
    Rekey,
    /// The path barcode stays the key; the body barcode is ignored.
    Immutable,
}

pub fn product(barcode: &str, name: &str, quantity: i64, minimum_stock: i64) -> Product {
    Product {
        barcode: barcode.to_string(),
        product_name: name.to_string(),
        cost_price: 70.0,
        selling_price: 100.0,
        quantity,
        minimum_stock,
    }
}

pub struct InMemoryProductService {
    products: Mutex<Vec<Product>>,
    calls: Mutex<Vec<Op>>,
    updates: Mutex<Vec<(String, ProductPayload)>>,
    failure: Mutex<Option<(Op, Option<String>)>>,
    success_message: Mutex<Option<String>>,
    policy: BarcodePolicy,
}

impl InMemoryProductService {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self::with_policy(products, BarcodePolicy::Rekey)
    }

    pub fn with_policy(products: Vec<Product>, policy: BarcodePolicy) -> Self {
        Self {
            products: Mutex::new(products),
            calls: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            success_message: Mutex::new(None),
            policy,
        }
    }

    /// The next call of kind `op` fails with a 4xx carrying `message`.
    pub fn fail_next(&self, op: Op, message: Option<&str>) {
        *self.failure.lock().unwrap() = Some((op, message.map(str::to_string)));
    }

    pub fn set_success_message(&self, message: Option<&str>) {
        *self.success_message.lock().unwrap() = message.map(str::to_string);
    }

    pub fn calls(&self) -> Vec<Op> {
        self.calls.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(String, ProductPayload)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn snapshot(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }

    fn enter(&self, op: Op) -> ServiceResult<()> {
        self.calls.lock().unwrap().push(op.clone());
        let mut failure = self.failure.lock().unwrap();
        if failure.as_ref().is_some_and(|(failing, _)| *failing == op) {
            let (_, message) = failure.take().unwrap();
            return Err(ServiceError::Server { status: http::StatusCode::BAD_REQUEST, message });
        }
        Ok(())
    }

    fn reply(&self) -> Option<String> {
        self.success_message.lock().unwrap().clone()
    }

    fn not_found() -> ServiceError {
        ServiceError::Server {
            status: http::StatusCode::NOT_FOUND,
            message: Some("Product not found".into()),
        }
    }
}

#[async_trait]
impl ProductService for InMemoryProductService {
    async fn list(&self) -> ServiceResult<Vec<Product>> {
        self.enter(Op::List)?;
        Ok(self.snapshot())
    }

    async fn create(&self, payload: &ProductPayload) -> ServiceResult<Option<String>> {
        self.enter(Op::Create)?;
        let mut products = self.products.lock().unwrap();
        if products.iter().any(|p| p.barcode == payload.barcode) {
            return Err(ServiceError::Server {
                status: http::StatusCode::CONFLICT,
                message: Some("Barcode already exists".into()),
            });
        }
        products.push(payload.clone().into());
        Ok(self.reply())
    }

    async fn update(&self, barcode: &str, payload: &ProductPayload) -> ServiceResult<Option<String>> {
        self.enter(Op::Update)?;
        self.updates.lock().unwrap().push((barcode.to_string(), payload.clone()));
        let mut products = self.products.lock().unwrap();
        let slot = products
            .iter_mut()
            .find(|p| p.barcode == barcode)
            .ok_or_else(Self::not_found)?;
        let mut updated: Product = payload.clone().into();
        if self.policy == BarcodePolicy::Immutable {
            updated.barcode = barcode.to_string();
        }
        *slot = updated;
        Ok(self.reply())
    }

    async fn delete(&self, barcode: &str) -> ServiceResult<Option<String>> {
        self.enter(Op::Delete)?;
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.barcode != barcode);
        if products.len() == before {
            return Err(Self::not_found());
        }
        Ok(self.reply())
    }
}
