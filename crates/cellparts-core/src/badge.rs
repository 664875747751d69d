//! # Badge Descriptors
//!
//! Maps entity values to the label and tone a renderer draws next to a row.
//!
//! ## Badge Tables
//! ```text
//! ┌──────────────────┬────────────────────┬──────────────┐
//! │ Value            │ Label              │ Tone         │
//! ├──────────────────┼────────────────────┼──────────────┤
//! │ stock active     │ Em Estoque         │ Success      │
//! │ stock low        │ Estoque Baixo      │ Warning      │
//! │ stock critical   │ Crítico            │ Destructive  │
//! │ order pending    │ Pendente           │ Warning      │
//! │ order ready      │ Pronto             │ Info         │
//! │ order in_transit │ Em Trânsito        │ Primary      │
//! │ order completed  │ Concluído          │ Success      │
//! │ os in_progress   │ Em Reparo          │ Info         │
//! │ os waiting       │ Aguardando         │ Warning      │
//! │ os completed     │ Concluído          │ Success      │
//! │ priority high    │ Alta               │ Destructive  │
//! │ priority medium  │ Média              │ Warning      │
//! │ priority low     │ Baixa              │ Secondary    │
//! └──────────────────┴────────────────────┴──────────────┘
//! ```
//! Unknown stock and priority values get no badge. Unknown order statuses
//! read "Desconhecido"; unknown service statuses fall back to "Pendente".

use serde::{Deserialize, Serialize};

use crate::types::{OrderStatus, OrderType, Priority, ProductStatus, ServiceStatus};

/// Color family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Warning,
    Destructive,
    Info,
    Primary,
    Secondary,
    Muted,
}

/// A label plus the tone to draw it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub tone: Tone,
}

impl Badge {
    pub const fn new(label: &'static str, tone: Tone) -> Self {
        Badge { label, tone }
    }
}

/// Stock status badge. `None` for values outside the known set.
pub fn stock_badge(status: &ProductStatus) -> Option<Badge> {
    match status {
        ProductStatus::Active => Some(Badge::new("Em Estoque", Tone::Success)),
        ProductStatus::Low => Some(Badge::new("Estoque Baixo", Tone::Warning)),
        ProductStatus::Critical => Some(Badge::new("Crítico", Tone::Destructive)),
        ProductStatus::Other(_) => None,
    }
}

pub fn order_status_badge(status: &OrderStatus) -> Badge {
    match status {
        OrderStatus::Pending => Badge::new("Pendente", Tone::Warning),
        OrderStatus::Ready => Badge::new("Pronto", Tone::Info),
        OrderStatus::InTransit => Badge::new("Em Trânsito", Tone::Primary),
        OrderStatus::Completed => Badge::new("Concluído", Tone::Success),
        OrderStatus::Other(_) => Badge::new("Desconhecido", Tone::Muted),
    }
}

pub fn order_type_badge(order_type: OrderType) -> Badge {
    match order_type {
        OrderType::Delivery => Badge::new("Entrega", Tone::Primary),
        OrderType::Pickup => Badge::new("Retirada", Tone::Secondary),
    }
}

pub fn service_status_badge(status: &ServiceStatus) -> Badge {
    match status {
        ServiceStatus::InProgress => Badge::new("Em Reparo", Tone::Info),
        ServiceStatus::Waiting => Badge::new("Aguardando", Tone::Warning),
        ServiceStatus::Completed => Badge::new("Concluído", Tone::Success),
        ServiceStatus::Other(_) => Badge::new("Pendente", Tone::Muted),
    }
}

/// Priority badge. `None` for values outside the known set.
pub fn priority_badge(priority: &Priority) -> Option<Badge> {
    match priority {
        Priority::High => Some(Badge::new("Alta", Tone::Destructive)),
        Priority::Medium => Some(Badge::new("Média", Tone::Warning)),
        Priority::Low => Some(Badge::new("Baixa", Tone::Secondary)),
        Priority::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_badges() {
        assert_eq!(stock_badge(&ProductStatus::Low).map(|b| b.label), Some("Estoque Baixo"));
        assert_eq!(stock_badge(&ProductStatus::from("discontinued")), None);
    }

    #[test]
    fn test_status_badges_follow_value() {
        assert_eq!(order_status_badge(&OrderStatus::InTransit).label, "Em Trânsito");
        assert_eq!(order_status_badge(&OrderStatus::from("lost")).tone, Tone::Muted);
        assert_eq!(service_status_badge(&ServiceStatus::from("on_hold")).label, "Pendente");
        assert_eq!(service_status_badge(&ServiceStatus::InProgress).label, "Em Reparo");
    }

    #[test]
    fn test_priority_and_type_badges() {
        assert_eq!(priority_badge(&Priority::High).map(|b| b.tone), Some(Tone::Destructive));
        assert_eq!(priority_badge(&Priority::from("urgent")), None);
        assert_eq!(order_type_badge(OrderType::Pickup).label, "Retirada");
    }
}
