//! Store owner view: incoming orders, metrics and quick actions.

use cellparts_core::badge::{Badge, Tone};
use cellparts_core::Money;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingOrder {
    pub id: &'static str,
    pub customer: &'static str,
    pub items: &'static str,
    pub total: Money,
    /// How long ago it arrived, e.g. "5 min atrás".
    pub received: &'static str,
    pub eta: &'static str,
}

impl IncomingOrder {
    pub fn badge(&self) -> Badge {
        Badge::new("Aguardando", Tone::Warning)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreMetric {
    pub label: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    pub open: bool,
    pub prep_time: &'static str,
    pub next_shift: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesSlice {
    pub label: &'static str,
    pub value: &'static str,
    pub share: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub description: &'static str,
    pub cta: &'static str,
}

#[derive(Debug, Clone)]
pub struct StoreOwnerPage {
    pub pending_orders: Vec<IncomingOrder>,
    pub metrics: Vec<StoreMetric>,
    pub status: StoreStatus,
    pub sales_breakdown: Vec<SalesSlice>,
    pub quick_actions: Vec<QuickAction>,
}

impl Default for StoreOwnerPage {
    fn default() -> Self {
        StoreOwnerPage::new()
    }
}

impl StoreOwnerPage {
    pub fn new() -> Self {
        let pending_orders = vec![
            IncomingOrder {
                id: "#1234",
                customer: "João Silva",
                items: "3 produtos",
                total: Money::from_cents(23480),
                received: "5 min atrás",
                eta: "14:55",
            },
            IncomingOrder {
                id: "#1235",
                customer: "Maria Santos",
                items: "2 produtos",
                total: Money::from_cents(12500),
                received: "12 min atrás",
                eta: "15:02",
            },
            IncomingOrder {
                id: "#1236",
                customer: "Pedro Costa",
                items: "1 produto",
                total: Money::from_cents(8990),
                received: "18 min atrás",
                eta: "15:10",
            },
        ];

        let metrics = [
            ("Pedidos Hoje", "28", "+12%"),
            ("Em Preparo", "5", "3 novos"),
            ("Entregues", "23", "+8%"),
            ("Faturamento", "R$ 2.4k", "+15%"),
        ]
        .into_iter()
        .map(|(label, value, change)| StoreMetric { label, value, change })
        .collect();

        let sales_breakdown = [
            ("Delivery", "R$ 1.5k", "63%"),
            ("Retirada", "R$ 900", "37%"),
            ("Cartão", "R$ 1.1k", "46%"),
        ]
        .into_iter()
        .map(|(label, value, share)| SalesSlice { label, value, share })
        .collect();

        let quick_actions = [
            ("Criar cupom de 10%", "Ative promoção relâmpago", "Gerar"),
            ("Pausar entregas", "Liberar apenas retirada", "Pausar"),
            ("Abrir chat com motoboys", "Enviar briefing rápido", "Enviar"),
        ]
        .into_iter()
        .map(|(label, description, cta)| QuickAction {
            label,
            description,
            cta,
        })
        .collect();

        StoreOwnerPage {
            pending_orders,
            metrics,
            status: StoreStatus {
                open: true,
                prep_time: "25 min",
                next_shift: "Rhodes - 18:00",
            },
            sales_breakdown,
            quick_actions,
        }
    }

    /// Text of the badge next to "Pedidos Pendentes".
    pub fn pending_label(&self) -> String {
        format!("{} novos", self.pending_orders.len())
    }

    /// Sum of the pending orders.
    pub fn pending_total(&self) -> Money {
        self.pending_orders.iter().map(|order| order.total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_summary() {
        let page = StoreOwnerPage::new();
        assert_eq!(page.pending_label(), "3 novos");
        assert_eq!(page.pending_total(), Money::from_cents(23480 + 12500 + 8990));
        assert!(page.status.open);
    }
}
