//! # Products Page
//!
//! Inventory list with search and the "Novo Produto" form.

use tracing::debug;

use cellparts_core::badge::{stock_badge, Badge};
use cellparts_core::filter::filter_products;
use cellparts_core::validation::ProductForm;
use cellparts_core::{FormErrors, Product};

use crate::error::{AppError, AppResult};
use crate::hooks::{use_create_product, use_products, CreateProduct};
use crate::pages::{list_view, ListView};
use crate::state::{AppContext, QueryState};

/// One product row, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub price: String,
    pub stock: i64,
    /// Stock shown in the warning color.
    pub stock_highlighted: bool,
    pub badge: Option<Badge>,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        ProductRow {
            name: product.name.clone(),
            sku: product.sku.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            stock: product.stock,
            stock_highlighted: product.is_stock_highlighted(),
            badge: stock_badge(&product.status),
        }
    }
}

#[derive(Debug)]
pub struct ProductsPage {
    ctx: AppContext,
    query: QueryState<Product>,
    search: String,
    form_open: bool,
    pub form: ProductForm,
    errors: FormErrors,
    create: CreateProduct,
}

impl ProductsPage {
    /// A page that has not fetched yet.
    pub fn new(ctx: &AppContext) -> Self {
        ProductsPage {
            ctx: ctx.clone(),
            query: QueryState::loading(),
            search: String::new(),
            form_open: false,
            form: ProductForm::default(),
            errors: FormErrors::new(),
            create: use_create_product(ctx),
        }
    }

    /// Builds the page and runs the first fetch.
    pub async fn open(ctx: &AppContext) -> Self {
        let mut page = ProductsPage::new(ctx);
        page.refresh().await;
        page
    }

    /// Re-reads the product list (from cache when fresh).
    pub async fn refresh(&mut self) {
        self.query = use_products(&self.ctx).await;
    }

    pub fn query(&self) -> &QueryState<Product> {
        &self.query
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Products matching the search, in server order.
    pub fn visible(&self) -> Vec<&Product> {
        filter_products(self.query.items(), &self.search)
    }

    pub fn view(&self) -> ListView<'_, Product> {
        list_view(&self.query, self.visible())
    }

    pub fn rows(&self) -> Vec<ProductRow> {
        self.visible().into_iter().map(ProductRow::from).collect()
    }

    // =========================================================================
    // Create Form
    // =========================================================================

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn toggle_form(&mut self) {
        self.form_open = !self.form_open;
    }

    /// Label of the button that opens and closes the form.
    pub fn form_toggle_label(&self) -> &'static str {
        if self.form_open {
            "Fechar formulário"
        } else {
            "Novo Produto"
        }
    }

    /// Inline message under `field`, if the last submit rejected it.
    pub fn field_error(&self, field: &str) -> Option<String> {
        self.errors.message(field)
    }

    pub fn form_errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.create.is_pending()
    }

    /// Validates the form and, when it passes, creates the product.
    ///
    /// ## Returns
    /// * `Ok(product)` - stored; form reset and closed, list refetched
    /// * `Err(AppError::Form)` - nothing sent; field errors recorded
    /// * `Err(_)` - the request failed; form stays open with its values
    pub async fn submit(&mut self) -> AppResult<Product> {
        let input = match self.form.validate() {
            Ok(input) => input,
            Err(errors) => {
                debug!(fields = errors.len(), "Product form rejected");
                self.errors = errors.clone();
                return Err(AppError::Form(errors));
            }
        };
        self.errors = FormErrors::new();

        let product = self.create.mutate(input).await?;
        self.form = ProductForm::default();
        self.form_open = false;
        self.refresh().await;
        Ok(product)
    }
}
