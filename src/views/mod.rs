//! Handlebars rendering of the inventory screen.

use handlebars::Handlebars;
use tracing::debug;

use crate::error::AppError;
use crate::view_model::manager::ScreenSnapshot;

const SCREEN: &str = "products_manager";

/// Renders [`ScreenSnapshot`]s into the full HTML page.
pub struct ScreenRenderer {
    handlebars: Handlebars<'static>,
}

impl ScreenRenderer {
    pub fn new() -> Result<Self, AppError> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string(SCREEN, PRODUCTS_MANAGER_TEMPLATE)
            .map_err(|e| AppError::Internal(format!("Failed to register {SCREEN}: {e}")))?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, snapshot: &ScreenSnapshot) -> Result<String, AppError> {
        debug!(rows = snapshot.rows.len(), modal = snapshot.modal.is_some(), "Rendering inventory screen");
        Ok(self.handlebars.render(SCREEN, snapshot)?)
    }
}

const PRODUCTS_MANAGER_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Inventory</title>
<style>
body{font-family:system-ui,sans-serif;background:#F8FAFC;margin:0;padding:2rem;color:#1e293b}
.toasts{position:fixed;top:1rem;left:50%;transform:translateX(-50%);z-index:60}
.toast{padding:.6rem 1rem;margin-bottom:.5rem;border-radius:.75rem;background:#fff;box-shadow:0 2px 8px #0002}
.toast.success{border-left:4px solid #10b981}.toast.error{border-left:4px solid #ef4444}
.counters{display:flex;gap:1rem}.counter{padding:.5rem 1rem;border-radius:.75rem}
.low{background:#fff7ed;color:#c2410c}.out{background:#fef2f2;color:#b91c1c}
table{width:100%;border-collapse:collapse;background:#fff}th,td{padding:1rem 2rem;text-align:left}
.bar{display:inline-block;width:4rem;height:.4rem;background:#f1f5f9;border-radius:1rem;overflow:hidden}
.bar span{display:block;height:100%}.bar .warn{background:#f97316}.bar .ok{background:#10b981}
.badge{padding:.2rem .7rem;border-radius:1rem;background:#fee2e2;color:#dc2626;font-size:.7rem;font-weight:900;text-transform:uppercase}
.modal{position:fixed;inset:0;background:#0f172a66;display:flex;align-items:center;justify-content:center;z-index:50}
.dialog{background:#fff;border-radius:2rem;padding:2rem;width:100%;max-width:32rem}
.invalid{color:#b91c1c}
</style>
</head>
<body>
<div class="toasts">
{{#each notifications}}<div class="toast {{kind}}">{{message}}</div>
{{/each}}
</div>
{{#if loading}}
<div class="spinner" role="status">Loading products...</div>
{{else}}
<header>
  <h1>Inventory</h1>
  <p>Real-time stock management and control.</p>
  <div class="counters">
    <div class="counter low"><small>Low Stock</small><strong>{{counts.low}}</strong></div>
    <div class="counter out"><small>Out of Stock</small><strong>{{counts.out}}</strong></div>
  </div>
</header>
<form method="get" action="/productsManager" class="search">
  <input type="text" name="q" value="{{search_term}}" placeholder="Search products or scan..."{{#unless modal}} autofocus{{/unless}}>
</form>
<a href="/productsManager/new" class="add">+ Add New Product</a>
<form method="post" action="/productsManager/reload"><button type="submit">Refresh</button></form>
<table>
  <thead>
    <tr><th>Product</th><th>Barcode</th><th>Cost Price</th><th>Selling Price</th><th>Inventory Level</th><th>Actions</th></tr>
  </thead>
  <tbody>
  {{#each rows}}
    <tr>
      <td>{{product_name}}</td>
      <td><code>{{barcode}}</code></td>
      <td>{{cost_price}}</td>
      <td>{{selling_price}}</td>
      <td>
        {{#if out_of_stock}}<span class="badge">Out of Stock</span>
        {{else}}<span class="bar"><span class="{{#if low_stock}}warn{{else}}ok{{/if}}" style="width:{{bar_percent}}%"></span></span> <strong>{{quantity}}</strong>{{/if}}
      </td>
      <td>
        <a href="/productsManager/edit/{{barcode_path}}">Edit</a>
        <form method="post" action="/productsManager/delete/{{barcode_path}}" style="display:inline"><button type="submit">Delete</button></form>
      </td>
    </tr>
  {{/each}}
  </tbody>
</table>
{{/if}}
{{#if modal}}
<div class="modal">
  <div class="dialog">
    <h2>{{modal.title}}</h2>
    {{#if modal.invalid}}<p class="invalid">{{modal.invalid}}</p>{{/if}}
    <form method="post" action="/productsManager/save">
      <label>Barcode / SKU <input required name="sku" value="{{modal.values.sku}}" placeholder="Scan now..."></label>
      <label>Product Name <input required name="name" value="{{modal.values.name}}"></label>
      <label>Cost Price (RS) <input required type="number" step="0.01" name="costPrice" value="{{modal.values.costPrice}}"></label>
      <label>Selling Price ($) <input required type="number" step="0.01" name="sellingPrice" value="{{modal.values.sellingPrice}}"></label>
      <label>Stock Qty <input required type="number" min="0" name="stock" value="{{modal.values.stock}}"></label>
      <label>Minimum Stock Alert <input required type="number" min="0" name="minStock" value="{{modal.values.minStock}}"></label>
      <button type="submit" formaction="/productsManager/discard" formnovalidate>Discard</button>
      <button type="submit">{{modal.submit_label}}</button>
    </form>
  </div>
</div>
{{#if modal.focus_field}}
<script>setTimeout(function(){var el=document.querySelector('[name="{{modal.focus_field}}"]');if(el){el.focus();}},{{modal.focus_delay_ms}});</script>
{{/if}}
{{/if}}
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::product::ProductRow;
    use crate::models::product::Product;
    use crate::view_model::manager::ScreenSnapshot;
    use crate::view_model::product_list::StockCounts;

    fn empty_snapshot() -> ScreenSnapshot {
        ScreenSnapshot {
            loading: false,
            search_term: String::new(),
            rows: Vec::new(),
            counts: StockCounts::default(),
            total: 0,
            notifications: Vec::new(),
            modal: None,
        }
    }

    fn row(barcode: &str, name: &str, quantity: i64) -> ProductRow {
        ProductRow::from(&Product {
            barcode: barcode.into(),
            product_name: name.into(),
            cost_price: 7.0,
            selling_price: 15.0,
            quantity,
            minimum_stock: 5,
        })
    }

    #[test]
    fn renders_rows_escaped() {
        let renderer = ScreenRenderer::new().unwrap();
        let mut snapshot = empty_snapshot();
        snapshot.rows = vec![row("A/1", "<Milk>", 0), row("B2", "Butter", 3)];

        let html = renderer.render(&snapshot).unwrap();
        assert!(html.contains("&lt;Milk&gt;"));
        assert!(html.contains("/productsManager/edit/A%2F1"));
        assert!(html.contains("Out of Stock</span>"));
        assert!(html.contains("$7.00"));
        assert!(html.contains(r#"class="warn""#));
    }

    #[test]
    fn shows_spinner_while_loading() {
        let renderer = ScreenRenderer::new().unwrap();
        let mut snapshot = empty_snapshot();
        snapshot.loading = true;

        let html = renderer.render(&snapshot).unwrap();
        assert!(html.contains("Loading products..."));
        assert!(!html.contains("<table>"));
    }
}
