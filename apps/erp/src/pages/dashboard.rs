//! # Dashboard
//!
//! The landing screen: headline metrics, the repair queue at a glance and the
//! latest counter sales. Figures are fixed sample values.

use serde::Serialize;

/// Direction a metric moved, used to color its change line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub trend: Trend,
}

/// One line of the "Assistência Técnica" card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairQueueLine {
    pub label: &'static str,
    pub detail: &'static str,
    pub count: u32,
}

/// One entry of "Últimas Vendas".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentSale {
    pub id: &'static str,
    pub product: &'static str,
    pub value: &'static str,
    /// "Entrega" or "Retirada".
    pub fulfillment: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub metrics: Vec<MetricCard>,
    pub repair_queue: Vec<RepairQueueLine>,
    pub recent_sales: Vec<RecentSale>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Dashboard::sample()
    }
}

impl Dashboard {
    pub fn sample() -> Self {
        let metrics = vec![
            MetricCard {
                title: "Vendas Hoje",
                value: "R$ 5.430",
                change: "+12% vs ontem",
                trend: Trend::Positive,
            },
            MetricCard {
                title: "Pedidos Pendentes",
                value: "18",
                change: "3 para entrega",
                trend: Trend::Neutral,
            },
            MetricCard {
                title: "Produtos em Estoque",
                value: "234",
                change: "12 abaixo do mínimo",
                trend: Trend::Negative,
            },
            MetricCard {
                title: "Ticket Médio",
                value: "R$ 285",
                change: "+8% este mês",
                trend: Trend::Positive,
            },
        ];

        let repair_queue = vec![
            RepairQueueLine {
                label: "Em Aguardo",
                detail: "Aguardando peças",
                count: 5,
            },
            RepairQueueLine {
                label: "Em Reparo",
                detail: "Sendo consertados",
                count: 8,
            },
            RepairQueueLine {
                label: "Concluídos",
                detail: "Prontos para retirada",
                count: 12,
            },
        ];

        let recent_sales = [
            ("#1234", "Capinha iPhone 14", "R$ 89,90", "Entrega"),
            ("#1233", "Carregador Tipo-C", "R$ 45,00", "Retirada"),
            ("#1232", "Película Xiaomi", "R$ 35,00", "Entrega"),
            ("#1231", "Fone Bluetooth", "R$ 159,90", "Retirada"),
        ]
        .into_iter()
        .map(|(id, product, value, fulfillment)| RecentSale {
            id,
            product,
            value,
            fulfillment,
        })
        .collect();

        Dashboard {
            metrics,
            repair_queue,
            recent_sales,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_has_four_metrics() {
        let dashboard = Dashboard::sample();
        let titles: Vec<_> = dashboard.metrics.iter().map(|m| m.title).collect();
        assert_eq!(
            titles,
            ["Vendas Hoje", "Pedidos Pendentes", "Produtos em Estoque", "Ticket Médio"]
        );
        assert_eq!(dashboard.recent_sales.len(), 4);
    }
}
