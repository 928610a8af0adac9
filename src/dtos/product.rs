// src/dtos/product.rs
use serde::{Deserialize, Serialize};

use crate::models::product::{format_price, Product, StockLevel};

/// Body of the create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub barcode: String,
    pub product_name: String,
    pub cost_price: f64,
    pub selling_price: f64,
    pub quantity: i64,
    pub minimum_stock: i64,
}

/// `{ "message": ... }` envelope used by every mutating call, success or not.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// One table row, already formatted for display.
#[derive(Debug, Serialize)]
pub struct ProductRow {
    pub barcode: String,
    /// Barcode percent-encoded for use as a path segment.
    pub barcode_path: String,
    pub product_name: String,
    pub cost_price: String,
    pub selling_price: String,
    pub quantity: i64,
    pub stock_level: StockLevel,
    pub out_of_stock: bool,
    pub low_stock: bool,
    pub bar_percent: String,
}

impl From<ProductPayload> for Product {
    fn from(payload: ProductPayload) -> Self {
        Self {
            barcode: payload.barcode,
            product_name: payload.product_name,
            cost_price: payload.cost_price,
            selling_price: payload.selling_price,
            quantity: payload.quantity,
            minimum_stock: payload.minimum_stock,
        }
    }
}

// Convert from Model to display row
impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        let stock_level = product.stock_level();
        Self {
            barcode: product.barcode.clone(),
            barcode_path: urlencoding::encode(&product.barcode).into_owned(),
            product_name: product.product_name.clone(),
            cost_price: format_price(product.cost_price),
            selling_price: format_price(product.selling_price),
            quantity: product.quantity,
            stock_level,
            out_of_stock: stock_level == StockLevel::OutOfStock,
            low_stock: stock_level == StockLevel::Low,
            bar_percent: format!("{:.0}", product.stock_bar_percent()),
        }
    }
}
