// src/view_model/product_list.rs
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::ServiceResult;
use crate::models::product::{Product, StockLevel};
use crate::notifications::Notifier;
use crate::services::product_service::ProductService;

pub const FETCH_FAILED: &str = "Failed to fetch products.";
pub const DELETE_SUCCEEDED: &str = "Product deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete product.";

/// Issued when a reload starts; only the newest ticket may replace the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StockCounts {
    pub low: usize,
    pub out: usize,
    pub healthy: usize,
}

impl StockCounts {
    pub fn total(&self) -> usize {
        self.low + self.out + self.healthy
    }
}

#[derive(Debug)]
pub struct ProductListViewModel {
    products: Vec<Product>,
    loading: bool,
    search_term: String,
    latest_issued: u64,
}

impl Default for ProductListViewModel {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            loading: true,
            search_term: String::new(),
            latest_issued: 0,
        }
    }
}

impl ProductListViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, barcode: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.barcode == barcode)
    }

    /// True until the first load attempt has finished.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_issued += 1;
        LoadTicket(self.latest_issued)
    }

    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: ServiceResult<Vec<Product>>,
        notifier: &mut Notifier,
    ) -> LoadOutcome {
        if ticket.0 < self.latest_issued {
            debug!(ticket = ticket.0, latest = self.latest_issued, "Discarding stale product list");
            return LoadOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(products) => {
                self.products = products;
                LoadOutcome::Applied
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch products");
                notifier.error(FETCH_FAILED);
                LoadOutcome::Failed
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn load(&mut self, service: &dyn ProductService, notifier: &mut Notifier) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = service.list().await;
        self.apply_load(ticket, result, notifier)
    }

    /// Products matching `term`, in list order.
    pub fn filter(&self, term: &str) -> Vec<&Product> {
        self.products.iter().filter(|p| p.matches(term)).collect()
    }

    /// Products matching the current search term.
    pub fn visible(&self) -> Vec<&Product> {
        self.filter(&self.search_term)
    }

    pub fn counts(&self) -> StockCounts {
        self.products
            .iter()
            .fold(StockCounts::default(), |mut counts, p| {
                match p.stock_level() {
                    StockLevel::OutOfStock => counts.out += 1,
                    StockLevel::Low => counts.low += 1,
                    StockLevel::Healthy => counts.healthy += 1,
                }
                counts
            })
    }

    pub fn low_stock_count(&self) -> usize {
        self.counts().low
    }

    pub fn out_of_stock_count(&self) -> usize {
        self.counts().out
    }

    /// Posts the toast for a finished delete. True when the list has to be
    /// reloaded; the local list is never patched.
    pub fn finish_remove(
        &self,
        barcode: &str,
        result: ServiceResult<Option<String>>,
        notifier: &mut Notifier,
    ) -> bool {
        match result {
            Ok(message) => {
                info!(barcode, "Product deleted");
                notifier.success(or_default(message, DELETE_SUCCEEDED));
                true
            }
            Err(e) => {
                warn!(barcode, error = %e, "Failed to delete product");
                notifier.error(e.user_message(DELETE_FAILED));
                false
            }
        }
    }

    /// Deletes remotely, then reloads.
    #[instrument(skip(self, service, notifier))]
    pub async fn remove(
        &mut self,
        barcode: &str,
        service: &dyn ProductService,
        notifier: &mut Notifier,
    ) -> bool {
        let result = service.delete(barcode).await;
        let removed = self.finish_remove(barcode, result, notifier);
        if removed {
            self.load(service, notifier).await;
        }
        removed
    }
}

/// Service message if it sent a non-blank one, `default` otherwise.
pub(crate) fn or_default(message: Option<String>, default: &str) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
