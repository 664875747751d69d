//! # Orders Page
//!
//! Delivery and pickup orders: summary counters, the "Novo Pedido" form and
//! per-row status updates.
//!
//! ```text
//! row status select ──pick──► Selections (local only)
//!        │
//!   "Atualizar" ──► UpdateOrderStatus ──ok──► clear pick, refetch list
//!                                    └─err──► pick kept, toast shown
//! ```

use tracing::debug;

use cellparts_core::badge::{order_status_badge, order_type_badge, Badge};
use cellparts_core::filter::filter_orders;
use cellparts_core::validation::OrderForm;
use cellparts_core::{FormErrors, Order, OrderStatus, OrderStatusUpdate, OrderType};

use crate::error::{AppError, AppResult};
use crate::hooks::{
    use_create_order, use_orders, use_update_order_status, CreateOrder, UpdateOrderStatus,
};
use crate::pages::{list_view, ListView, Selections};
use crate::state::{AppContext, QueryState};

/// Counters shown above the order list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderSummary {
    /// Open delivery orders.
    pub for_delivery: usize,
    /// Open pickup orders.
    pub for_pickup: usize,
    pub completed: usize,
}

impl OrderSummary {
    pub fn from_orders(orders: &[Order]) -> Self {
        orders.iter().fold(OrderSummary::default(), |mut acc, order| {
            match (&order.status, order.order_type) {
                (OrderStatus::Completed, _) => acc.completed += 1,
                (_, OrderType::Delivery) => acc.for_delivery += 1,
                (_, OrderType::Pickup) => acc.for_pickup += 1,
            }
            acc
        })
    }
}

/// One order row, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: String,
    pub customer: String,
    pub items: String,
    pub total: String,
    pub address: String,
    pub date: String,
    pub status_badge: Badge,
    pub type_badge: Badge,
    /// Value of the status select.
    pub selected_status: OrderStatus,
    pub dirty: bool,
}

#[derive(Debug)]
pub struct OrdersPage {
    ctx: AppContext,
    query: QueryState<Order>,
    search: String,
    form_open: bool,
    pub form: OrderForm,
    errors: FormErrors,
    selections: Selections<OrderStatus>,
    create: CreateOrder,
    update: UpdateOrderStatus,
}

impl OrdersPage {
    pub fn new(ctx: &AppContext) -> Self {
        OrdersPage {
            ctx: ctx.clone(),
            query: QueryState::loading(),
            search: String::new(),
            form_open: false,
            form: OrderForm::default(),
            errors: FormErrors::new(),
            selections: Selections::new(),
            create: use_create_order(ctx),
            update: use_update_order_status(ctx),
        }
    }

    pub async fn open(ctx: &AppContext) -> Self {
        let mut page = OrdersPage::new(ctx);
        page.refresh().await;
        page
    }

    pub async fn refresh(&mut self) {
        self.query = use_orders(&self.ctx).await;
    }

    pub fn query(&self) -> &QueryState<Order> {
        &self.query
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn visible(&self) -> Vec<&Order> {
        filter_orders(self.query.items(), &self.search)
    }

    pub fn view(&self) -> ListView<'_, Order> {
        list_view(&self.query, self.visible())
    }

    /// Counters over every loaded order, ignoring the search.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_orders(self.query.items())
    }

    pub fn rows(&self) -> Vec<OrderRow> {
        self.visible()
            .into_iter()
            .map(|order| OrderRow {
                id: order.id.clone(),
                customer: order.customer.clone(),
                items: order.items.clone(),
                total: order.total.to_string(),
                address: order.address.clone(),
                date: order.date.clone(),
                status_badge: order_status_badge(&order.status),
                type_badge: order_type_badge(order.order_type),
                selected_status: self.selections.current(&order.id, &order.status),
                dirty: self.selections.is_dirty(&order.id, &order.status),
            })
            .collect()
    }

    fn find(&self, id: &str) -> Option<&Order> {
        self.query.items().iter().find(|order| order.id == id)
    }

    // =========================================================================
    // Status Updates
    // =========================================================================

    /// Status the select for `id` shows.
    pub fn selected_status(&self, id: &str) -> Option<OrderStatus> {
        self.find(id)
            .map(|order| self.selections.current(id, &order.status))
            .or_else(|| self.selections.get(id).cloned())
    }

    pub fn select_status(&mut self, id: &str, status: OrderStatus) {
        self.selections.pick(id, status);
    }

    pub fn is_updating(&self) -> bool {
        self.update.is_pending()
    }

    /// Saves the selected status of `id`.
    pub async fn apply_status(&mut self, id: &str) -> AppResult<Order> {
        let status = self
            .selected_status(id)
            .ok_or_else(|| AppError::Unavailable(format!("Pedido {} não encontrado", id)))?;

        let updated = self
            .update
            .mutate(OrderStatusUpdate {
                id: id.to_string(),
                status,
            })
            .await?;
        self.selections.clear(id);
        self.refresh().await;
        Ok(updated)
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

    pub fn form_toggle_label(&self) -> &'static str {
        if self.form_open {
            "Fechar formulário"
        } else {
            "Novo Pedido"
        }
    }

    pub fn field_error(&self, field: &str) -> Option<String> {
        self.errors.message(field)
    }

    pub fn is_submitting(&self) -> bool {
        self.create.is_pending()
    }

    pub async fn submit(&mut self) -> AppResult<Order> {
        let input = match self.form.validate() {
            Ok(input) => input,
            Err(errors) => {
                debug!(fields = errors.len(), "Order form rejected");
                self.errors = errors.clone();
                return Err(AppError::Form(errors));
            }
        };
        self.errors = FormErrors::new();

        let order = self.create.mutate(input).await?;
        self.form = OrderForm::default();
        self.form_open = false;
        self.refresh().await;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellparts_core::Money;

    fn order(id: &str, order_type: OrderType, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            customer: "Cliente".to_string(),
            items: "1 produto".to_string(),
            total: Money::from_cents(1000),
            order_type,
            status,
            address: "Retirada na loja".to_string(),
            date: "10/11/2025".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_summary_counts_open_orders_by_type() {
        let orders = vec![
            order("#1", OrderType::Delivery, OrderStatus::Pending),
            order("#2", OrderType::Delivery, OrderStatus::InTransit),
            order("#3", OrderType::Pickup, OrderStatus::Ready),
            order("#4", OrderType::Pickup, OrderStatus::Completed),
        ];
        assert_eq!(
            OrderSummary::from_orders(&orders),
            OrderSummary {
                for_delivery: 2,
                for_pickup: 1,
                completed: 1,
            }
        );
    }
}
