//! # CellParts ERP Application Library
//!
//! Back-office application layer: the query cache, the mutation hooks and
//! the page view-models a renderer draws from.
//!
//! ## Module Organization
//! ```text
//! cellparts_erp/
//! ├── lib.rs            ◄─── You are here (logging, startup)
//! ├── state/
//! │   ├── mod.rs        ◄─── AppContext
//! │   ├── query_client.rs ◄─ Keyed cache with a 60 s staleness window
//! │   └── toast.rs      ◄─── Toast log
//! ├── hooks/
//! │   ├── queries.rs    ◄─── use_products / use_orders / use_service_orders
//! │   └── mutations.rs  ◄─── create / update hooks
//! ├── pages/            ◄─── Products, Orders, ServiceOrders, Sales,
//! │                          Dashboard, Delivery hub
//! ├── seed.rs           ◄─── Demo rows for the memory backend
//! └── error.rs          ◄─── AppError
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing
//! 2. Load `erp.toml` and environment overrides
//! 3. Connect the configured backend (seed it when it is the memory store)
//! 4. Read the three collections through the query hooks
//! 5. Log a snapshot of what the pages would show

pub mod error;
pub mod hooks;
pub mod pages;
pub mod seed;
pub mod state;

pub use error::{AppError, AppResult};
pub use state::AppContext;

use std::path::PathBuf;

use tracing::{info, warn, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use cellparts_data::{DataConfig, Store};

use pages::dashboard::Dashboard;
use pages::orders::OrdersPage;
use pages::products::ProductsPage;
use pages::service_orders::ServiceOrdersPage;
use pages::ListView;

/// Boots the stack and logs a store snapshot.
///
/// ## Arguments
/// * `config_path` - explicit `erp.toml`; `None` uses the platform config dir
pub async fn run(config_path: Option<PathBuf>) -> AppResult<()> {
    let config = DataConfig::load(config_path)?;
    info!(backend = %config.backend, "Starting CellParts ERP");

    let (store, memory) = Store::connect(&config).await?;
    if let Some(memory) = memory {
        seed::seed_memory(&memory).await?;
    }

    let ctx = AppContext::new(store);
    log_snapshot(&ctx).await;
    Ok(())
}

async fn log_snapshot(ctx: &AppContext) {
    let dashboard = Dashboard::sample();
    for metric in &dashboard.metrics {
        info!(metric = metric.title, value = metric.value, "Dashboard");
    }

    let products = ProductsPage::open(ctx).await;
    match products.view() {
        ListView::Error(message) => warn!(error = message, "Products unavailable"),
        _ => {
            let highlighted = products.rows().iter().filter(|row| row.stock_highlighted).count();
            info!(
                count = products.query().items().len(),
                low_stock = highlighted,
                "Products loaded"
            );
        }
    }

    let orders = OrdersPage::open(ctx).await;
    match orders.view() {
        ListView::Error(message) => warn!(error = message, "Orders unavailable"),
        _ => {
            let summary = orders.summary();
            info!(
                for_delivery = summary.for_delivery,
                for_pickup = summary.for_pickup,
                completed = summary.completed,
                "Orders loaded"
            );
        }
    }

    let tickets = ServiceOrdersPage::open(ctx).await;
    match tickets.view() {
        ListView::Error(message) => warn!(error = message, "Service orders unavailable"),
        _ => {
            let summary = tickets.summary();
            info!(
                in_progress = summary.in_progress,
                waiting = summary.waiting,
                completed = summary.completed,
                "Service orders loaded"
            );
        }
    }
}

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,cellparts=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cellparts_data=trace` - Trace for the data layer only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

// The filter is the only level control; a max-level setting here would
// replace it.
fn log_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt().with_env_filter(filter).finish()
}
