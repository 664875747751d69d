//! # Service Orders Page
//!
//! Repair tickets ("Ordens de Serviço"): counters, the "Nova OS" form and
//! per-row status and priority updates.

use tracing::debug;

use cellparts_core::badge::{priority_badge, service_status_badge, Badge};
use cellparts_core::filter::filter_service_orders;
use cellparts_core::validation::ServiceOrderForm;
use cellparts_core::{FormErrors, Priority, ServiceOrder, ServiceOrderStatusUpdate, ServiceStatus};

use crate::error::{AppError, AppResult};
use crate::hooks::{
    use_create_service_order, use_service_orders, use_update_service_order_status,
    CreateServiceOrder, UpdateServiceOrderStatus,
};
use crate::pages::{list_view, ListView, Selections};
use crate::state::{AppContext, QueryState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceSummary {
    pub in_progress: usize,
    pub waiting: usize,
    pub completed: usize,
}

impl ServiceSummary {
    pub fn from_tickets(tickets: &[ServiceOrder]) -> Self {
        tickets.iter().fold(ServiceSummary::default(), |mut acc, ticket| {
            match ticket.status {
                ServiceStatus::InProgress => acc.in_progress += 1,
                ServiceStatus::Waiting => acc.waiting += 1,
                ServiceStatus::Completed => acc.completed += 1,
                ServiceStatus::Other(_) => {}
            }
            acc
        })
    }
}

/// One ticket row, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOrderRow {
    pub id: String,
    pub customer: String,
    pub device: String,
    pub issue: String,
    pub date: String,
    pub status_badge: Badge,
    pub priority_badge: Option<Badge>,
    pub selected_status: ServiceStatus,
    pub selected_priority: Priority,
    pub dirty: bool,
}

#[derive(Debug)]
pub struct ServiceOrdersPage {
    ctx: AppContext,
    query: QueryState<ServiceOrder>,
    search: String,
    form_open: bool,
    pub form: ServiceOrderForm,
    errors: FormErrors,
    statuses: Selections<ServiceStatus>,
    priorities: Selections<Priority>,
    create: CreateServiceOrder,
    update: UpdateServiceOrderStatus,
}

impl ServiceOrdersPage {
    pub fn new(ctx: &AppContext) -> Self {
        ServiceOrdersPage {
            ctx: ctx.clone(),
            query: QueryState::loading(),
            search: String::new(),
            form_open: false,
            form: ServiceOrderForm::default(),
            errors: FormErrors::new(),
            statuses: Selections::new(),
            priorities: Selections::new(),
            create: use_create_service_order(ctx),
            update: use_update_service_order_status(ctx),
        }
    }

    pub async fn open(ctx: &AppContext) -> Self {
        let mut page = ServiceOrdersPage::new(ctx);
        page.refresh().await;
        page
    }

    pub async fn refresh(&mut self) {
        self.query = use_service_orders(&self.ctx).await;
    }

    pub fn query(&self) -> &QueryState<ServiceOrder> {
        &self.query
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn visible(&self) -> Vec<&ServiceOrder> {
        filter_service_orders(self.query.items(), &self.search)
    }

    pub fn view(&self) -> ListView<'_, ServiceOrder> {
        list_view(&self.query, self.visible())
    }

    pub fn summary(&self) -> ServiceSummary {
        ServiceSummary::from_tickets(self.query.items())
    }

    pub fn rows(&self) -> Vec<ServiceOrderRow> {
        self.visible()
            .into_iter()
            .map(|ticket| ServiceOrderRow {
                id: ticket.id.clone(),
                customer: ticket.customer.clone(),
                device: ticket.device.clone(),
                issue: ticket.issue.clone(),
                date: ticket.date.clone(),
                status_badge: service_status_badge(&ticket.status),
                priority_badge: priority_badge(&ticket.priority),
                selected_status: self.statuses.current(&ticket.id, &ticket.status),
                selected_priority: self.priorities.current(&ticket.id, &ticket.priority),
                dirty: self.statuses.is_dirty(&ticket.id, &ticket.status)
                    || self.priorities.is_dirty(&ticket.id, &ticket.priority),
            })
            .collect()
    }

    fn find(&self, id: &str) -> Option<&ServiceOrder> {
        self.query.items().iter().find(|ticket| ticket.id == id)
    }

    // =========================================================================
    // Status Updates
    // =========================================================================

    pub fn select_status(&mut self, id: &str, status: ServiceStatus) {
        self.statuses.pick(id, status);
    }

    pub fn select_priority(&mut self, id: &str, priority: Priority) {
        self.priorities.pick(id, priority);
    }

    pub fn is_updating(&self) -> bool {
        self.update.is_pending()
    }

    /// Saves the selected status of `id`. Priority is sent only when the
    /// staff changed it.
    pub async fn apply_status(&mut self, id: &str) -> AppResult<ServiceOrder> {
        let update = {
            let not_found = || AppError::Unavailable(format!("Ordem {} não encontrada", id));
            match self.find(id) {
                Some(ticket) => ServiceOrderStatusUpdate {
                    id: id.to_string(),
                    status: self.statuses.current(id, &ticket.status),
                    priority: self
                        .priorities
                        .is_dirty(id, &ticket.priority)
                        .then(|| self.priorities.current(id, &ticket.priority)),
                },
                None => ServiceOrderStatusUpdate {
                    id: id.to_string(),
                    status: self.statuses.get(id).cloned().ok_or_else(not_found)?,
                    priority: self.priorities.get(id).cloned(),
                },
            }
        };

        let updated = self.update.mutate(update).await?;
        self.statuses.clear(id);
        self.priorities.clear(id);
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
            "Nova OS"
        }
    }

    pub fn field_error(&self, field: &str) -> Option<String> {
        self.errors.message(field)
    }

    pub fn is_submitting(&self) -> bool {
        self.create.is_pending()
    }

    pub async fn submit(&mut self) -> AppResult<ServiceOrder> {
        let input = match self.form.validate() {
            Ok(input) => input,
            Err(errors) => {
                debug!(fields = errors.len(), "Service order form rejected");
                self.errors = errors.clone();
                return Err(AppError::Form(errors));
            }
        };
        self.errors = FormErrors::new();

        let ticket = self.create.mutate(input).await?;
        self.form = ServiceOrderForm::default();
        self.form_open = false;
        self.refresh().await;
        Ok(ticket)
    }
}
