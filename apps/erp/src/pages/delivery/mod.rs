//! # Delivery Hub
//!
//! Entry screen of the delivery preview and its three role views. Everything
//! here is sample data plus local state; nothing touches the table API.
//!
//! ```text
//!                 /delivery
//!        ┌────────────┼─────────────┐
//!        ▼            ▼             ▼
//!   /customer      /store        /driver
//!   Cliente        Lojista       Motoboy
//! ```

pub mod customer;
pub mod driver;
pub mod store_owner;

use serde::Serialize;

/// A profile card on the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
    pub title: &'static str,
    pub description: &'static str,
    pub route: &'static str,
}

/// The three profile cards, in display order.
pub fn hub_cards() -> [ProfileCard; 3] {
    [
        ProfileCard {
            title: "Cliente",
            description: "Faça seus pedidos e acompanhe suas entregas em tempo real",
            route: "/delivery/customer",
        },
        ProfileCard {
            title: "Lojista",
            description: "Gerencie pedidos, produtos e acompanhe suas vendas",
            route: "/delivery/store",
        },
        ProfileCard {
            title: "Motoboy",
            description: "Visualize entregas disponíveis e gerencie suas rotas",
            route: "/delivery/driver",
        },
    ]
}
