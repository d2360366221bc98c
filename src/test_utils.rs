//! Test utilities for fleet-ticket
//!
//! Common fixtures shared by the unit tests: an isolated in-memory
//! environment with seeded catalogs, one actor per role, and helpers to
//! walk a ticket along the lifecycle.

#![cfg(test)]

use crate::core::{Actor, BusPreset, NewVendor, Priority, Role, ServiceType, Ticket, Vendor};
use crate::engine::{
    BusSelection, InvoiceInput, NewTicketInput, QuotationInput, RepairInput, TicketEngine,
};
use crate::events::{CollectingNotifier, Notifier};
use crate::storage::MemoryStorage;
use std::sync::Arc;

/// An engine over isolated in-memory stores with seeded reference data
pub struct TestEnv {
    pub storage: Arc<MemoryStorage>,
    /// Wired as the engine's notifier in [`TestEnv::new`]
    pub collector: Arc<CollectingNotifier>,
    pub engine: TicketEngine,
    pub creator: Actor,
    pub supervisor: Actor,
    pub vendor_actor: Actor,
    pub purchase: Actor,
    /// The catalogued vendor matching bus 123's manufacturer
    pub vendor: Vendor,
}

/// A catalog preset in the shape the original fleet uses
pub fn sample_preset(bus_number: &str) -> BusPreset {
    BusPreset {
        bus_number: bus_number.to_string(),
        fleet_number: format!("F{bus_number}"),
        chassis_number: format!("C{bus_number}"),
        registration_number: format!("R{bus_number}"),
        model: "ABC Model".to_string(),
        manufacturer: "ABC Manufacturer".to_string(),
        year: "2018".to_string(),
        engine_service_interval: 5000,
        tyre_service_interval: 10000,
        ac_service_interval: 2000,
        transmission_service_interval: 15000,
        brake_pad_service_interval: 7000,
    }
}

pub fn quotation(amount: f64) -> QuotationInput {
    QuotationInput {
        amount,
        description: "Parts and labour".to_string(),
    }
}

pub fn invoice(amount: f64) -> InvoiceInput {
    InvoiceInput {
        amount,
        description: "Work done as quoted".to_string(),
    }
}

pub fn repair(description: &str, estimated_cost: f64) -> RepairInput {
    RepairInput {
        description: description.to_string(),
        estimated_cost,
    }
}

impl TestEnv {
    /// Fresh environment with a collecting notifier
    pub fn new() -> Self {
        let collector = Arc::new(CollectingNotifier::new());
        Self::build(collector.clone(), collector)
    }

    /// Fresh environment with a caller-supplied notifier; the `collector`
    /// field is left unwired
    pub fn with_notifier(notifier: Arc<dyn Notifier>) -> Self {
        Self::build(notifier, Arc::new(CollectingNotifier::new()))
    }

    fn build(notifier: Arc<dyn Notifier>, collector: Arc<CollectingNotifier>) -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let engine = TicketEngine::new(
            storage.clone(),
            storage.clone(),
            storage.clone(),
            notifier,
        );

        let vendor = engine
            .add_vendor(NewVendor {
                name: "ABC Manufacturer Service Centre".to_string(),
                email: "vendor@example.com".to_string(),
                contact_person: None,
                phone: None,
            })
            .expect("Failed to seed vendor");

        for bus_number in ["123", "456"] {
            engine
                .add_bus_preset(&sample_preset(bus_number))
                .expect("Failed to seed bus preset");
        }

        Self {
            storage,
            collector,
            engine,
            creator: Actor::new("creator@example.com", Role::Creator),
            supervisor: Actor::new("supervisor@example.com", Role::Supervisor),
            vendor_actor: Actor::new("vendor@example.com", Role::Vendor),
            purchase: Actor::new("purchase@example.com", Role::Purchase),
            vendor,
        }
    }

    /// File a minor-service ticket for bus 123; it lands in `pending`
    pub fn create_pending_ticket(&self) -> Ticket {
        self.engine
            .create_ticket(
                &self.creator,
                NewTicketInput {
                    title: "Engine maintenance".to_string(),
                    service_type: ServiceType::Minor,
                    priority: Priority::Medium,
                    bus: BusSelection::Preset {
                        bus_number: "123".to_string(),
                    },
                    description: None,
                    issue: None,
                    repair_category: None,
                    vendor: Some(self.vendor.email.clone()),
                    estimated_cost: None,
                },
            )
            .expect("Failed to create ticket")
    }

    /// A ticket walked to `acknowledged`
    pub fn acknowledged_ticket(&self) -> Ticket {
        let ticket = self.create_pending_ticket();
        self.engine
            .approve_ticket(&self.supervisor, &ticket.id)
            .expect("Failed to approve");
        self.engine
            .acknowledge_ticket(&self.vendor_actor, &ticket.id)
            .expect("Failed to acknowledge")
    }

    /// A ticket walked to `completed`, invoiced at 275.0
    pub fn completed_ticket(&self) -> Ticket {
        let ticket = self.acknowledged_ticket();
        self.engine
            .submit_invoice(&self.vendor_actor, &ticket.id, invoice(275.0))
            .expect("Failed to invoice");
        self.engine
            .complete_ticket(&self.supervisor, &ticket.id)
            .expect("Failed to complete")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TicketStatus;

    #[test]
    fn test_env_seeds_catalogs() {
        let env = TestEnv::new();
        assert_eq!(env.engine.bus_presets().unwrap().len(), 2);
        assert_eq!(env.engine.vendors().unwrap().len(), 1);
    }

    #[test]
    fn test_lifecycle_walkers() {
        let env = TestEnv::new();
        assert_eq!(env.create_pending_ticket().status, TicketStatus::Pending);
        assert_eq!(env.acknowledged_ticket().status, TicketStatus::Acknowledged);
        assert_eq!(env.completed_ticket().status, TicketStatus::Completed);
    }
}
