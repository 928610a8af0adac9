// src/view_model/product_form.rs
//! The add/edit modal.
//!
//! `Closed -> Open(Add|Edit) -> Submitting -> Closed` on success,
//! `Submitting -> Open` on a service failure (entered values kept), and
//! `Open -> Closed` on discard.
//!
//! A save runs in three steps so the caller can release the form while the
//! remote call is in flight: [`ProductForm::begin_submit`] validates and hands
//! out a [`SubmitRequest`], [`SubmitRequest::send`] talks to the service, and
//! [`ProductForm::finish_submit`] applies the reply.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::dtos::product::ProductPayload;
use crate::error::{FormError, ServiceResult};
use crate::models::product::{Product, DEFAULT_MINIMUM_STOCK};
use crate::notifications::Notifier;
use crate::services::product_service::ProductService;
use crate::view_model::product_list::or_default;

/// Share of the entered cost price that is stored.
pub const COST_PRICE_FACTOR: f64 = 0.7;

pub const ADD_SUCCEEDED: &str = "Product added successfully!";
pub const ADD_FAILED: &str = "Failed to add product.";
pub const UPDATE_SUCCEEDED: &str = "Product updated successfully!";
pub const UPDATE_FAILED: &str = "Failed to update product.";

pub const DEFAULT_FOCUS_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormField {
    Barcode,
    Name,
    CostPrice,
    SellingPrice,
    Stock,
    MinStock,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Barcode => "Barcode / SKU",
            FormField::Name => "Product Name",
            FormField::CostPrice => "Cost Price",
            FormField::SellingPrice => "Selling Price",
            FormField::Stock => "Stock Qty",
            FormField::MinStock => "Minimum Stock",
        }
    }

    /// Name of the matching input in the submitted form.
    pub fn input_name(&self) -> &'static str {
        match self {
            FormField::Barcode => "sku",
            FormField::Name => "name",
            FormField::CostPrice => "costPrice",
            FormField::SellingPrice => "sellingPrice",
            FormField::Stock => "stock",
            FormField::MinStock => "minStock",
        }
    }
}

/// Raw input values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValues {
    pub sku: String,
    pub name: String,
    pub cost_price: String,
    pub selling_price: String,
    pub stock: String,
    pub min_stock: String,
}

impl FormValues {
    pub fn blank() -> Self {
        Self {
            stock: "0".into(),
            min_stock: DEFAULT_MINIMUM_STOCK.to_string(),
            ..Self::default()
        }
    }

    pub fn from_product(product: &Product) -> Self {
        Self {
            sku: product.barcode.clone(),
            name: product.product_name.clone(),
            cost_price: product.cost_price.to_string(),
            selling_price: product.selling_price.to_string(),
            stock: product.quantity.to_string(),
            min_stock: product.minimum_stock.to_string(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Barcode => &self.sku,
            FormField::Name => &self.name,
            FormField::CostPrice => &self.cost_price,
            FormField::SellingPrice => &self.selling_price,
            FormField::Stock => &self.stock,
            FormField::MinStock => &self.min_stock,
        }
    }

    /// Builds the request body, or names the first field that blocks submission.
    pub fn to_payload(&self) -> Result<ProductPayload, FormError> {
        let barcode = required(self, FormField::Barcode)?;
        let product_name = required(self, FormField::Name)?;
        let cost_price = parse_price(self, FormField::CostPrice)?;
        let selling_price = parse_price(self, FormField::SellingPrice)?;
        let quantity = parse_count(self, FormField::Stock)?;
        let minimum_stock = parse_count(self, FormField::MinStock)?;

        Ok(ProductPayload {
            barcode: barcode.to_string(),
            product_name: product_name.to_string(),
            cost_price: cost_price * COST_PRICE_FACTOR,
            selling_price,
            quantity,
            minimum_stock,
        })
    }
}

/// Same rule as an HTML `required` input: only an empty value is missing.
/// Text is sent exactly as typed.
fn required(values: &FormValues, field: FormField) -> Result<&str, FormError> {
    let value = values.get(field);
    if value.is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(value)
}

fn parse_price(values: &FormValues, field: FormField) -> Result<f64, FormError> {
    required(values, field)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(FormError::InvalidNumber(field))
}

fn parse_count(values: &FormValues, field: FormField) -> Result<i64, FormError> {
    let count = required(values, field)?
        .trim()
        .parse::<i64>()
        .map_err(|_| FormError::InvalidNumber(field))?;
    if count < 0 {
        return Err(FormError::Negative(field));
    }
    Ok(count)
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Add,
    /// Holds the product as it was loaded; its barcode keys the update call.
    Edit(Product),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    Closed,
    Open,
    Submitting,
}

/// Asks the view to focus `field` once `delay` has passed, so scanners that
/// type into the focused input land in the barcode field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub field: FormField,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved,
    Invalid(FormError),
    Failed,
}

/// A validated save taken out of the form, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    /// Form session the request came from; bumped on every open and close.
    session: u64,
    original_barcode: Option<String>,
    payload: ProductPayload,
}

impl SubmitRequest {
    pub fn payload(&self) -> &ProductPayload {
        &self.payload
    }

    /// Barcode the product was loaded with, in Edit mode.
    pub fn original_barcode(&self) -> Option<&str> {
        self.original_barcode.as_deref()
    }

    /// Creates in Add mode, updates under the original barcode in Edit mode.
    pub async fn send(&self, service: &dyn ProductService) -> ServiceResult<Option<String>> {
        match &self.original_barcode {
            None => service.create(&self.payload).await,
            Some(barcode) => service.update(barcode, &self.payload).await,
        }
    }

    fn defaults(&self) -> (&'static str, &'static str) {
        match self.original_barcode {
            None => (ADD_SUCCEEDED, ADD_FAILED),
            Some(_) => (UPDATE_SUCCEEDED, UPDATE_FAILED),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStep {
    Send(SubmitRequest),
    Invalid(FormError),
}

#[derive(Debug)]
pub struct ProductForm {
    state: FormState,
    mode: FormMode,
    values: FormValues,
    invalid: Option<FormError>,
    focus_delay: Duration,
    session: u64,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_DELAY)
    }
}

impl ProductForm {
    pub fn new(focus_delay: Duration) -> Self {
        Self {
            state: FormState::Closed,
            mode: FormMode::Add,
            values: FormValues::blank(),
            invalid: None,
            focus_delay,
            session: 0,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != FormState::Closed
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn invalid(&self) -> Option<&FormError> {
        self.invalid.as_ref()
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add Item",
            FormMode::Edit(_) => "Edit Item",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Confirm & Add",
            FormMode::Edit(_) => "Save Changes",
        }
    }

    /// Opens in Add mode for `None`, Edit mode otherwise.
    pub fn open(&mut self, product: Option<Product>) -> FocusRequest {
        self.values = match &product {
            Some(p) => FormValues::from_product(p),
            None => FormValues::blank(),
        };
        self.mode = product.map_or(FormMode::Add, FormMode::Edit);
        self.state = FormState::Open;
        self.invalid = None;
        self.session += 1;

        FocusRequest { field: FormField::Barcode, delay: self.focus_delay }
    }

    /// Discards whatever was entered.
    pub fn cancel(&mut self) {
        self.state = FormState::Closed;
        self.mode = FormMode::Add;
        self.values = FormValues::blank();
        self.invalid = None;
        self.session += 1;
    }

    /// Takes the typed values and, if they are complete, moves to
    /// `Submitting` and returns the request to send.
    pub fn begin_submit(&mut self, values: FormValues) -> Result<SubmitStep, FormError> {
        match self.state {
            FormState::Open => {}
            FormState::Submitting => return Err(FormError::Busy),
            FormState::Closed => return Err(FormError::NotOpen),
        }

        self.values = values;
        let payload = match self.values.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.invalid = Some(e.clone());
                return Ok(SubmitStep::Invalid(e));
            }
        };
        self.invalid = None;
        self.state = FormState::Submitting;

        Ok(SubmitStep::Send(SubmitRequest {
            session: self.session,
            original_barcode: match &self.mode {
                FormMode::Add => None,
                FormMode::Edit(original) => Some(original.barcode.clone()),
            },
            payload,
        }))
    }

    /// Posts the toast for a finished save. The modal only changes if it is
    /// still the session the request came from.
    pub fn finish_submit(
        &mut self,
        request: &SubmitRequest,
        result: ServiceResult<Option<String>>,
        notifier: &mut Notifier,
    ) -> SubmitOutcome {
        let (succeeded, failed) = request.defaults();
        let current = request.session == self.session;
        if !current {
            warn!(barcode = %request.payload.barcode, "Save finished after the modal was closed");
        }

        match result {
            Ok(message) => {
                info!(barcode = %request.payload.barcode, "Product saved");
                notifier.success(or_default(message, succeeded));
                if current {
                    self.cancel();
                }
                SubmitOutcome::Saved
            }
            Err(e) => {
                notifier.error(e.user_message(failed));
                if current {
                    self.state = FormState::Open;
                }
                SubmitOutcome::Failed
            }
        }
    }

    #[instrument(skip_all, fields(mode = self.title()))]
    pub async fn submit(
        &mut self,
        values: FormValues,
        service: &dyn ProductService,
        notifier: &mut Notifier,
    ) -> Result<SubmitOutcome, FormError> {
        let request = match self.begin_submit(values)? {
            SubmitStep::Send(request) => request,
            SubmitStep::Invalid(e) => return Ok(SubmitOutcome::Invalid(e)),
        };
        let result = request.send(service).await;
        Ok(self.finish_submit(&request, result, notifier))
    }
}
