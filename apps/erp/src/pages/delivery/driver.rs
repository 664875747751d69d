//! Driver view: available runs, the run in progress and today's stats.

use cellparts_core::{Money, Toast, ToastVariant};

use crate::state::ToastLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverTab {
    #[default]
    Available,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRun {
    pub id: &'static str,
    pub store: &'static str,
    pub customer: &'static str,
    pub address: &'static str,
    pub distance: &'static str,
    /// What the driver earns for the run.
    pub payment: Money,
    pub items: &'static str,
    pub phone: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverStat {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug)]
pub struct DriverPage {
    toasts: ToastLog,
    tab: DriverTab,
    available: Vec<DeliveryRun>,
    active: DeliveryRun,
    stats: Vec<DriverStat>,
}

impl DriverPage {
    pub fn new(toasts: ToastLog) -> Self {
        let available = vec![
            DeliveryRun {
                id: "#1234",
                store: "TechCell Centro",
                customer: "João Silva",
                address: "Rua das Flores, 123",
                distance: "2.5 km",
                payment: Money::from_cents(1250),
                items: "3 produtos",
                phone: None,
            },
            DeliveryRun {
                id: "#1235",
                store: "TechCell Shopping",
                customer: "Maria Santos",
                address: "Av. Principal, 456",
                distance: "1.8 km",
                payment: Money::from_cents(900),
                items: "2 produtos",
                phone: None,
            },
        ];
        let active = DeliveryRun {
            id: "#1233",
            store: "TechCell Centro",
            customer: "Pedro Costa",
            address: "Rua Esperança, 789 - Apto 301",
            distance: "3.2 km",
            payment: Money::from_cents(1500),
            items: "1 produto",
            phone: Some("(11) 98765-4321"),
        };
        let stats = vec![
            DriverStat {
                label: "Entregas Hoje",
                value: "12",
            },
            DriverStat {
                label: "Ganhos Hoje",
                value: "R$ 156",
            },
            DriverStat {
                label: "Tempo Online",
                value: "4h 30m",
            },
        ];

        DriverPage {
            toasts,
            tab: DriverTab::default(),
            available,
            active,
            stats,
        }
    }

    pub fn tab(&self) -> DriverTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: DriverTab) {
        self.tab = tab;
    }

    pub fn available(&self) -> &[DeliveryRun] {
        &self.available
    }

    pub fn active(&self) -> &DeliveryRun {
        &self.active
    }

    pub fn stats(&self) -> &[DriverStat] {
        &self.stats
    }

    /// "Aceitar" on an available run. Returns false for an unknown id.
    pub fn accept(&self, run_id: &str) -> bool {
        let found = self.available.iter().any(|run| run.id == run_id);
        if found {
            self.toasts.push(Toast::new(
                format!("Entrega {} aceita!", run_id),
                ToastVariant::Success,
            ));
        }
        found
    }
}
