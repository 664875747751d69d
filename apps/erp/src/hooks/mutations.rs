//! # Mutation Hooks
//!
//! Create and update actions with their cache and toast side effects.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  hook.mutate(input)                         state: Idle → Pending       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repository write (exactly one request)                                 │
//! │       │                                                                 │
//! │       ├──ok──► invalidate query key                                     │
//! │       │        push success toast            state: Success             │
//! │       │        return stored entity                                     │
//! │       │                                                                 │
//! │       └──err─► push destructive toast (server message or fallback)      │
//! │                return error                  state: Error               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is applied optimistically, so a failure needs no rollback, and
//! nothing is retried.

use std::future::Future;

use tracing::{info, warn};

use cellparts_core::{
    EntityKind, NewOrder, NewProduct, NewServiceOrder, Order, OrderStatusUpdate, Product,
    ServiceOrder, ServiceOrderStatusUpdate, Toast,
};
use cellparts_data::DataError;

use crate::error::{AppError, AppResult};
use crate::state::AppContext;

// =============================================================================
// Mutation State
// =============================================================================

/// Progress of the most recent call on one hook instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Title and generic description of a hook's error toast.
struct FailureText {
    title: &'static str,
    fallback: &'static str,
}

#[derive(Debug)]
struct MutationHook {
    ctx: AppContext,
    state: MutationState,
    last_error: Option<String>,
}

impl MutationHook {
    fn new(ctx: AppContext) -> Self {
        MutationHook {
            ctx,
            state: MutationState::Idle,
            last_error: None,
        }
    }

    async fn run<O, Fut>(
        &mut self,
        kind: EntityKind,
        failure: FailureText,
        request: Fut,
        success: impl FnOnce(&O) -> Toast,
    ) -> AppResult<O>
    where
        Fut: Future<Output = Result<O, DataError>>,
    {
        self.state = MutationState::Pending;
        self.last_error = None;

        match request.await {
            Ok(value) => {
                self.ctx.queries.invalidate(kind.query_key());
                self.ctx.toasts.push(success(&value));
                self.state = MutationState::Success;
                Ok(value)
            }
            Err(err) => {
                let err = AppError::from(err);
                let description = err
                    .user_message()
                    .unwrap_or_else(|| failure.fallback.to_string());
                warn!(table = kind.table(), error = %err, "Mutation failed");

                self.ctx
                    .toasts
                    .push(Toast::destructive(failure.title, description.clone()));
                self.state = MutationState::Error;
                self.last_error = Some(description);
                Err(err)
            }
        }
    }
}

/// Defines a hook type with its constructor and state accessors.
macro_rules! mutation_hook {
    ($(#[$meta:meta])* $name:ident, $ctor:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            hook: MutationHook,
        }

        #[doc = concat!("Creates a [`", stringify!($name), "`] hook instance.")]
        pub fn $ctor(ctx: &AppContext) -> $name {
            $name {
                hook: MutationHook::new(ctx.clone()),
            }
        }

        impl $name {
            /// State of the most recent call.
            pub fn state(&self) -> MutationState {
                self.hook.state
            }

            /// True while a request is in flight.
            pub fn is_pending(&self) -> bool {
                self.hook.state == MutationState::Pending
            }

            /// Message shown for the most recent failure.
            pub fn error(&self) -> Option<&str> {
                self.hook.last_error.as_deref()
            }

            /// Back to `Idle`.
            pub fn reset(&mut self) {
                self.hook.state = MutationState::Idle;
                self.hook.last_error = None;
            }
        }
    };
}

// =============================================================================
// Products
// =============================================================================

mutation_hook!(
    /// Registers a product.
    CreateProduct,
    use_create_product
);

impl CreateProduct {
    pub async fn mutate(&mut self, input: NewProduct) -> AppResult<Product> {
        let repo = self.hook.ctx.store.products();
        self.hook
            .run(
                EntityKind::Products,
                FailureText {
                    title: "Erro ao salvar",
                    fallback: "Não foi possível salvar o produto.",
                },
                repo.create_product(input),
                |product: &Product| {
                    info!(sku = %product.sku, "Product created from form");
                    Toast::success(
                        "Produto cadastrado",
                        format!("{} foi adicionado ao estoque.", product.name),
                    )
                },
            )
            .await
    }
}

// =============================================================================
// Orders
// =============================================================================

mutation_hook!(
    /// Creates an order.
    CreateOrder,
    use_create_order
);

impl CreateOrder {
    pub async fn mutate(&mut self, input: NewOrder) -> AppResult<Order> {
        let repo = self.hook.ctx.store.orders();
        self.hook
            .run(
                EntityKind::Orders,
                FailureText {
                    title: "Erro ao criar pedido",
                    fallback: "Falha na criação do pedido.",
                },
                repo.create_order(input),
                |order: &Order| {
                    Toast::success(
                        "Pedido criado",
                        format!("{} cadastrado com tipo {}.", order.id, order.order_type),
                    )
                },
            )
            .await
    }
}

mutation_hook!(
    /// Replaces an order's status.
    UpdateOrderStatus,
    use_update_order_status
);

impl UpdateOrderStatus {
    pub async fn mutate(&mut self, input: OrderStatusUpdate) -> AppResult<Order> {
        let repo = self.hook.ctx.store.orders();
        self.hook
            .run(
                EntityKind::Orders,
                FailureText {
                    title: "Falha ao atualizar",
                    fallback: "Não foi possível atualizar o pedido.",
                },
                repo.update_order_status(input),
                |order: &Order| {
                    Toast::success(
                        "Pedido atualizado",
                        format!("{} agora está {}.", order.id, order.status),
                    )
                },
            )
            .await
    }
}

// =============================================================================
// Service Orders
// =============================================================================

mutation_hook!(
    /// Opens a repair ticket.
    CreateServiceOrder,
    use_create_service_order
);

impl CreateServiceOrder {
    pub async fn mutate(&mut self, input: NewServiceOrder) -> AppResult<ServiceOrder> {
        let repo = self.hook.ctx.store.service_orders();
        self.hook
            .run(
                EntityKind::ServiceOrders,
                FailureText {
                    title: "Erro ao criar ordem",
                    fallback: "Falha na criação da ordem.",
                },
                repo.create_service_order(input),
                |ticket: &ServiceOrder| {
                    Toast::success(
                        "Ordem criada",
                        format!("{} registrada com prioridade {}.", ticket.id, ticket.priority),
                    )
                },
            )
            .await
    }
}

mutation_hook!(
    /// Replaces a ticket's status (and optionally its priority).
    UpdateServiceOrderStatus,
    use_update_service_order_status
);

impl UpdateServiceOrderStatus {
    pub async fn mutate(&mut self, input: ServiceOrderStatusUpdate) -> AppResult<ServiceOrder> {
        let repo = self.hook.ctx.store.service_orders();
        self.hook
            .run(
                EntityKind::ServiceOrders,
                FailureText {
                    title: "Falha ao atualizar",
                    fallback: "Não foi possível atualizar a ordem.",
                },
                repo.update_service_order_status(input),
                |ticket: &ServiceOrder| {
                    Toast::success(
                        "Ordem atualizada",
                        format!("{} agora está {}.", ticket.id, ticket.status),
                    )
                },
            )
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cellparts_core::{Money, OrderStatus, OrderType, Priority, ServiceStatus, ToastVariant};
    use cellparts_data::MemoryTableApi;
    use std::sync::Arc;

    fn new_order() -> NewOrder {
        NewOrder {
            id: "#2001".to_string(),
            customer: "Ana Oliveira".to_string(),
            items: "2 produtos".to_string(),
            total: Money::from_cents(12500),
            order_type: OrderType::Pickup,
            status: OrderStatus::Pending,
            address: "Retirada na loja".to_string(),
            date: "11/11/2025".to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_invalidates_and_toasts() {
        let ctx = AppContext::with_api(Arc::new(MemoryTableApi::new()));
        ctx.queries.set::<Order>("orders", Arc::new(Vec::new()));
        assert!(!ctx.queries.is_stale("orders"));

        let mut hook = use_create_order(&ctx);
        let order = hook.mutate(new_order()).await.unwrap();

        assert_eq!(order.id, "#2001");
        assert_eq!(hook.state(), MutationState::Success);
        assert!(ctx.queries.is_stale("orders"));

        let toast = ctx.toasts.last().unwrap();
        assert_eq!(toast.title, "Pedido criado");
        assert_eq!(
            toast.description.as_deref(),
            Some("#2001 cadastrado com tipo pickup.")
        );
    }

    #[tokio::test]
    async fn test_failure_toasts_server_message_and_keeps_cache() {
        let memory = Arc::new(MemoryTableApi::new());
        let ctx = AppContext::with_api(memory.clone());
        ctx.queries.set::<Order>("orders", Arc::new(Vec::new()));
        memory.fail_next_request(409, "duplicate key value violates unique constraint");

        let mut hook = use_create_order(&ctx);
        assert!(hook.mutate(new_order()).await.is_err());

        assert_eq!(hook.state(), MutationState::Error);
        assert!(!ctx.queries.is_stale("orders"));
        let toast = ctx.toasts.last().unwrap();
        assert_eq!(toast.variant, ToastVariant::Destructive);
        assert_eq!(toast.title, "Erro ao criar pedido");
        assert_eq!(
            toast.description.as_deref(),
            Some("duplicate key value violates unique constraint")
        );
        assert_eq!(memory.request_count(), 1);
    }

    #[tokio::test]
    async fn test_update_of_missing_order_reports_failure() {
        let ctx = AppContext::with_api(Arc::new(MemoryTableApi::new()));
        let mut hook = use_update_order_status(&ctx);

        let result = hook
            .mutate(OrderStatusUpdate {
                id: "#404".to_string(),
                status: OrderStatus::Ready,
            })
            .await;

        assert!(result.is_err());
        assert_eq!(ctx.toasts.last().unwrap().title, "Falha ao atualizar");
        assert!(hook.error().is_some());
        hook.reset();
        assert_eq!(hook.state(), MutationState::Idle);
    }

    fn new_product() -> NewProduct {
        NewProduct {
            name: "Cabo Lightning".to_string(),
            sku: "CAB-LIG-007".to_string(),
            price: Money::from_cents(4990),
            stock: 30,
            category: "Cabos".to_string(),
            status: None,
            description: None,
        }
    }

    fn new_ticket() -> NewServiceOrder {
        NewServiceOrder {
            id: "OS-006".to_string(),
            customer: "Lucas Pereira".to_string(),
            device: "iPhone 11".to_string(),
            issue: "Tela trincada".to_string(),
            status: ServiceStatus::Waiting,
            priority: Priority::High,
            date: "11/11/2025".to_string(),
        }
    }

    fn destructive_toast(ctx: &AppContext) -> (String, Option<String>) {
        let toast = ctx.toasts.last().unwrap();
        assert_eq!(toast.variant, ToastVariant::Destructive);
        (toast.title, toast.description)
    }

    #[tokio::test]
    async fn test_create_product_toasts() {
        let memory = Arc::new(MemoryTableApi::new());
        let ctx = AppContext::with_api(memory.clone());
        let mut hook = use_create_product(&ctx);

        hook.mutate(new_product()).await.unwrap();
        let toast = ctx.toasts.last().unwrap();
        assert_eq!(toast.variant, ToastVariant::Success);
        assert_eq!(toast.title, "Produto cadastrado");
        assert_eq!(
            toast.description.as_deref(),
            Some("Cabo Lightning foi adicionado ao estoque.")
        );

        memory.fail_next_request(500, "");
        assert!(hook.mutate(new_product()).await.is_err());
        let (title, description) = destructive_toast(&ctx);
        assert_eq!(title, "Erro ao salvar");
        assert_eq!(description.as_deref(), Some("Não foi possível salvar o produto."));
        assert_eq!(hook.error(), Some("Não foi possível salvar o produto."));
    }

    #[tokio::test]
    async fn test_create_service_order_toasts() {
        let memory = Arc::new(MemoryTableApi::new());
        let ctx = AppContext::with_api(memory.clone());
        let mut hook = use_create_service_order(&ctx);

        let ticket = hook.mutate(new_ticket()).await.unwrap();
        assert_eq!(ticket.id, "OS-006");
        let toast = ctx.toasts.last().unwrap();
        assert_eq!(toast.title, "Ordem criada");
        assert_eq!(
            toast.description.as_deref(),
            Some("OS-006 registrada com prioridade high.")
        );

        memory.fail_next_request(503, "");
        assert!(hook.mutate(new_ticket()).await.is_err());
        let (title, description) = destructive_toast(&ctx);
        assert_eq!(title, "Erro ao criar ordem");
        assert_eq!(description.as_deref(), Some("Falha na criação da ordem."));
    }

    #[tokio::test]
    async fn test_update_service_order_toasts() {
        let memory = Arc::new(MemoryTableApi::new());
        let ctx = AppContext::with_api(memory.clone());
        use_create_service_order(&ctx).mutate(new_ticket()).await.unwrap();

        let mut hook = use_update_service_order_status(&ctx);
        let update = ServiceOrderStatusUpdate {
            id: "OS-006".to_string(),
            status: ServiceStatus::InProgress,
            priority: None,
        };
        hook.mutate(update.clone()).await.unwrap();
        let toast = ctx.toasts.last().unwrap();
        assert_eq!(toast.title, "Ordem atualizada");
        assert_eq!(
            toast.description.as_deref(),
            Some("OS-006 agora está in_progress.")
        );

        memory.fail_next_request(500, "");
        assert!(hook.mutate(update).await.is_err());
        let (title, description) = destructive_toast(&ctx);
        assert_eq!(title, "Falha ao atualizar");
        assert_eq!(description.as_deref(), Some("Não foi possível atualizar a ordem."));
        assert_eq!(hook.state(), MutationState::Error);
    }
}
