// src/models/product.rs
use serde::{Deserialize, Deserializer, Serialize};

/// Quantity at which the inventory bar is drawn full.
pub const FULL_BAR_QUANTITY: f64 = 50.0;

/// Reorder threshold a new product starts with.
pub const DEFAULT_MINIMUM_STOCK: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub barcode: String,
    pub product_name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub cost_price: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub selling_price: f64,
    pub quantity: i64,
    pub minimum_stock: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Low,
    Healthy,
}

impl StockLevel {
    pub fn classify(quantity: i64, minimum_stock: i64) -> Self {
        if quantity == 0 {
            StockLevel::OutOfStock
        } else if quantity <= minimum_stock {
            StockLevel::Low
        } else {
            StockLevel::Healthy
        }
    }
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.quantity, self.minimum_stock)
    }

    /// Width of the inventory bar in percent, capped at 100.
    pub fn stock_bar_percent(&self) -> f64 {
        ((self.quantity as f64 / FULL_BAR_QUANTITY) * 100.0).clamp(0.0, 100.0)
    }

    /// Case-insensitive on the name, exact on the barcode.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        self.product_name.to_lowercase().contains(&term.to_lowercase())
            || self.barcode.contains(term)
    }
}

pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

// Decimal columns are frequently sent as strings ("12.50").
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid price {s:?}: {e}"))),
    }
}
