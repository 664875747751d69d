//! # Service Order Repository
//!
//! Table operations for repair tickets.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use cellparts_core::{NewServiceOrder, Priority, ServiceOrder, ServiceOrderStatusUpdate, ServiceStatus};

use super::{fetch_all, insert, update};
use crate::backend::{OrderBy, TableApi};
use crate::error::DataResult;

#[derive(Serialize)]
struct StatusPatch<'a> {
    status: &'a ServiceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<&'a Priority>,
}

/// Repository for the `service_orders` table.
#[derive(Debug, Clone)]
pub struct ServiceOrderRepository {
    api: Arc<dyn TableApi>,
}

impl ServiceOrderRepository {
    /// Creates a new ServiceOrderRepository.
    pub fn new(api: Arc<dyn TableApi>) -> Self {
        ServiceOrderRepository { api }
    }

    /// All tickets, newest first.
    pub async fn fetch_service_orders(&self) -> DataResult<Vec<ServiceOrder>> {
        debug!("Fetching service orders");
        fetch_all(self.api.as_ref(), OrderBy::desc("created_at")).await
    }

    /// Opens a ticket exactly as given.
    pub async fn create_service_order(&self, ticket: NewServiceOrder) -> DataResult<ServiceOrder> {
        let payload = serde_json::to_value(&ticket)?;
        let created: ServiceOrder = insert(self.api.as_ref(), payload).await?;
        info!(id = %created.id, priority = %created.priority, "Service order opened");
        Ok(created)
    }

    /// Replaces the status and, when given, the priority of one ticket.
    ///
    /// ## Patch Body
    /// ```text
    /// priority: Some(high) → {"status": "in_progress", "priority": "high"}
    /// priority: None       → {"status": "in_progress"}
    /// ```
    pub async fn update_service_order_status(
        &self,
        change: ServiceOrderStatusUpdate,
    ) -> DataResult<ServiceOrder> {
        let patch = StatusPatch {
            status: &change.status,
            priority: change.priority.as_ref(),
        };
        let updated: ServiceOrder = update(self.api.as_ref(), &change.id, &patch).await?;
        info!(id = %updated.id, status = %updated.status, "Service order updated");
        Ok(updated)
    }
}
