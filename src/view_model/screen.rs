// src/view_model/screen.rs
//! Shared handle to the [`ProductManager`].
//!
//! The manager is locked only while its state changes. Remote calls run with
//! the lock released, so a slow service never stalls other interactions and
//! overlapping reloads are settled by their load tickets.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument};

use crate::error::FormError;
use crate::services::product_service::ProductService;
use crate::view_model::manager::ProductManager;
use crate::view_model::product_form::{FormValues, SubmitOutcome, SubmitStep};
use crate::view_model::product_list::{LoadOutcome, LoadTicket};

#[derive(Clone)]
pub struct Screen {
    manager: Arc<Mutex<ProductManager>>,
}

impl Screen {
    pub fn new(manager: ProductManager) -> Self {
        Self { manager: Arc::new(Mutex::new(manager)) }
    }

    /// Direct access for state-only changes. Do not await a service call
    /// while holding the guard.
    pub async fn lock(&self) -> MutexGuard<'_, ProductManager> {
        self.manager.lock().await
    }

    /// Loads the list the first time the screen is shown.
    pub async fn activate(&self) {
        let started = {
            let mut manager = self.manager.lock().await;
            manager.begin_activation().map(|ticket| (ticket, manager.service()))
        };
        if let Some((ticket, service)) = started {
            self.fetch(ticket, service).await;
        }
    }

    #[instrument(skip(self))]
    pub async fn reload(&self) -> LoadOutcome {
        let (ticket, service) = {
            let mut manager = self.manager.lock().await;
            (manager.begin_reload(), manager.service())
        };
        self.fetch(ticket, service).await
    }

    async fn fetch(&self, ticket: LoadTicket, service: Arc<dyn ProductService>) -> LoadOutcome {
        let result = service.list().await;
        let outcome = self.manager.lock().await.apply_reload(ticket, result);
        debug!(?outcome, "Product list fetched");
        outcome
    }

    /// Submits the modal; a successful save reloads the list.
    #[instrument(skip_all)]
    pub async fn save(&self, values: FormValues) -> Result<SubmitOutcome, FormError> {
        let (request, service) = {
            let mut manager = self.manager.lock().await;
            match manager.begin_save(values)? {
                SubmitStep::Send(request) => (request, manager.service()),
                SubmitStep::Invalid(e) => return Ok(SubmitOutcome::Invalid(e)),
            }
        };

        let result = request.send(service.as_ref()).await;
        let outcome = self.manager.lock().await.finish_save(&request, result);
        if outcome == SubmitOutcome::Saved {
            self.reload().await;
        }
        Ok(outcome)
    }

    /// Deletes remotely and reloads on success.
    #[instrument(skip(self))]
    pub async fn delete(&self, barcode: &str) -> bool {
        let service = self.manager.lock().await.service();
        let result = service.delete(barcode).await;
        let removed = self.manager.lock().await.finish_delete(barcode, result);
        if removed {
            self.reload().await;
        }
        removed
    }
}
