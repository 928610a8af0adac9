// src/view_model/manager.rs
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::dtos::product::ProductRow;
use crate::error::{FormError, ServiceResult};
use crate::models::product::Product;
use crate::notifications::{Notification, Notifier};
use crate::services::product_service::ProductService;
use crate::view_model::product_form::{
    FocusRequest, FormMode, FormState, FormValues, ProductForm, SubmitOutcome, SubmitRequest,
    SubmitStep,
};
use crate::view_model::product_list::{LoadOutcome, LoadTicket, ProductListViewModel, StockCounts};

/// The inventory screen: product list, edit modal and toast queue.
///
/// Every method here is synchronous. Remote calls are driven by
/// [`Screen`](crate::view_model::screen::Screen), which starts an operation,
/// releases the screen, awaits the service and then applies the result.
pub struct ProductManager {
    service: Arc<dyn ProductService>,
    list: ProductListViewModel,
    form: ProductForm,
    notifier: Notifier,
    activated: bool,
    focus: Option<FocusRequest>,
}

/// Everything needed to draw the screen once.
#[derive(Debug, Serialize)]
pub struct ScreenSnapshot {
    pub loading: bool,
    pub search_term: String,
    pub rows: Vec<ProductRow>,
    pub counts: StockCounts,
    pub total: usize,
    pub notifications: Vec<Notification>,
    pub modal: Option<ModalSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct ModalSnapshot {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub editing: bool,
    pub original_barcode: Option<String>,
    pub submitting: bool,
    pub values: FormValues,
    pub invalid: Option<String>,
    pub focus_field: &'static str,
    pub focus_delay_ms: u64,
}

impl ProductManager {
    pub fn new(service: Arc<dyn ProductService>, focus_delay: Duration) -> Self {
        Self {
            service,
            list: ProductListViewModel::new(),
            form: ProductForm::new(focus_delay),
            notifier: Notifier::new(),
            activated: false,
            focus: None,
        }
    }

    pub fn list(&self) -> &ProductListViewModel {
        &self.list
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn service(&self) -> Arc<dyn ProductService> {
        Arc::clone(&self.service)
    }

    /// Ticket for the first load, or `None` once the screen was activated.
    pub fn begin_activation(&mut self) -> Option<LoadTicket> {
        if self.activated {
            return None;
        }
        self.activated = true;
        Some(self.list.begin_load())
    }

    pub fn begin_reload(&mut self) -> LoadTicket {
        self.list.begin_load()
    }

    pub fn apply_reload(&mut self, ticket: LoadTicket, result: ServiceResult<Vec<Product>>) -> LoadOutcome {
        self.list.apply_load(ticket, result, &mut self.notifier)
    }

    pub fn search(&mut self, term: impl Into<String>) {
        self.list.set_search_term(term);
    }

    pub fn open_add(&mut self) -> FocusRequest {
        let focus = self.form.open(None);
        self.focus = Some(focus);
        focus
    }

    /// Opens the modal on the loaded copy of `barcode`, if there is one.
    pub fn open_edit(&mut self, barcode: &str) -> Option<FocusRequest> {
        let product = self.list.find(barcode)?.clone();
        let focus = self.form.open(Some(product));
        self.focus = Some(focus);
        Some(focus)
    }

    pub fn close_modal(&mut self) {
        self.form.cancel();
        self.focus = None;
    }

    pub fn begin_save(&mut self, values: FormValues) -> Result<SubmitStep, FormError> {
        self.form.begin_submit(values)
    }

    pub fn finish_save(
        &mut self,
        request: &SubmitRequest,
        result: ServiceResult<Option<String>>,
    ) -> SubmitOutcome {
        let outcome = self.form.finish_submit(request, result, &mut self.notifier);
        if !self.form.is_open() {
            self.focus = None;
        }
        outcome
    }

    /// True when the delete went through and the list needs a reload.
    pub fn finish_delete(&mut self, barcode: &str, result: ServiceResult<Option<String>>) -> bool {
        self.list.finish_remove(barcode, result, &mut self.notifier)
    }

    /// Builds a render-ready view and hands over pending notifications.
    pub fn snapshot(&mut self) -> ScreenSnapshot {
        let rows: Vec<ProductRow> = self.list.visible().into_iter().map(ProductRow::from).collect();
        let modal = self.form.is_open().then(|| {
            let focus = self.focus.take();
            ModalSnapshot {
                title: self.form.title(),
                submit_label: self.form.submit_label(),
                editing: matches!(self.form.mode(), FormMode::Edit(_)),
                original_barcode: match self.form.mode() {
                    FormMode::Edit(p) => Some(p.barcode.clone()),
                    FormMode::Add => None,
                },
                submitting: self.form.state() == FormState::Submitting,
                values: self.form.values().clone(),
                invalid: self.form.invalid().map(ToString::to_string),
                focus_field: focus.map_or("", |f| f.field.input_name()),
                focus_delay_ms: focus.map_or(0, |f| f.delay.as_millis() as u64),
            }
        });

        ScreenSnapshot {
            loading: self.list.is_loading(),
            search_term: self.list.search_term().to_string(),
            rows,
            counts: self.list.counts(),
            total: self.list.products().len(),
            notifications: self.notifier.drain(),
            modal,
        }
    }
}
