//! Integration tests for the ticket lifecycle over real storage
//!
//! These walk the full workflow through the public engine API with the
//! file backend in a temporary directory, the way the CLI wires it up.

use fleet_ticket::core::{
    Actor, BusPreset, NewVendor, Priority, Role, ServiceType, TicketStatus,
};
use fleet_ticket::engine::{
    BusSelection, InvoiceInput, NewTicketInput, QuotationInput, RepairInput, TicketEngine,
};
use fleet_ticket::error::FleetTicketError;
use fleet_ticket::events::NullNotifier;
use fleet_ticket::storage::{FileStorage, MemoryStorage, TicketRepository};
use std::sync::Arc;
use tempfile::TempDir;

fn preset(bus_number: &str) -> BusPreset {
    BusPreset {
        bus_number: bus_number.to_string(),
        fleet_number: format!("F{bus_number}"),
        chassis_number: format!("C{bus_number}"),
        registration_number: format!("R{bus_number}"),
        model: "XYZ Model".to_string(),
        manufacturer: "XYZ Manufacturer".to_string(),
        year: "2020".to_string(),
        engine_service_interval: 5000,
        tyre_service_interval: 10000,
        ac_service_interval: 2000,
        transmission_service_interval: 15000,
        brake_pad_service_interval: 7000,
    }
}

struct Fixture {
    _temp_dir: TempDir,
    storage: Arc<FileStorage>,
    engine: TicketEngine,
    creator: Actor,
    supervisor: Actor,
    vendor: Actor,
    purchase: Actor,
}

impl Fixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = Arc::new(FileStorage::new(temp_dir.path().join(".fleet-ticket")));
        storage.init().expect("Failed to init storage");

        let engine = TicketEngine::new(
            storage.clone(),
            storage.clone(),
            storage.clone(),
            Arc::new(NullNotifier),
        );

        engine
            .add_vendor(NewVendor {
                name: "XYZ Manufacturer Workshop".to_string(),
                email: "vendor@example.com".to_string(),
                contact_person: Some("Jordan".to_string()),
                phone: None,
            })
            .expect("Failed to register vendor");
        assert!(engine.add_bus_preset(&preset("456")).unwrap());

        Self {
            _temp_dir: temp_dir,
            storage,
            engine,
            creator: Actor::new("creator@example.com", Role::Creator),
            supervisor: Actor::new("supervisor@example.com", Role::Supervisor),
            vendor: Actor::new("vendor@example.com", Role::Vendor),
            purchase: Actor::new("purchase@example.com", Role::Purchase),
        }
    }

    fn file_ticket(&self) -> fleet_ticket::core::Ticket {
        self.engine
            .create_ticket(
                &self.creator,
                NewTicketInput {
                    title: "Engine is making strange noises".to_string(),
                    service_type: ServiceType::Major,
                    priority: Priority::Medium,
                    bus: BusSelection::Preset {
                        bus_number: "456".to_string(),
                    },
                    description: None,
                    issue: None,
                    repair_category: None,
                    vendor: None,
                    estimated_cost: Some(375.0),
                },
            )
            .expect("Failed to create ticket")
    }
}

#[test]
fn full_workflow_persists_through_file_storage() {
    let f = Fixture::new();
    let ticket = f.file_ticket();
    let id = ticket.id.clone();

    // The vendor was auto-derived from the manufacturer
    assert_eq!(ticket.assigned_vendor, "vendor@example.com");
    assert_eq!(ticket.description, "major service for bus 456");

    f.engine.approve_ticket(&f.supervisor, &id).unwrap();
    f.engine.acknowledge_ticket(&f.vendor, &id).unwrap();
    f.engine
        .submit_quotation(
            &f.vendor,
            &id,
            QuotationInput {
                amount: 375.0,
                description: "Engine maintenance and labour".to_string(),
            },
        )
        .unwrap();
    f.engine.approve_quotation(&f.supervisor, &id).unwrap();
    f.engine.start_service(&f.vendor, &id).unwrap();
    f.engine
        .submit_invoice(
            &f.vendor,
            &id,
            InvoiceInput {
                amount: 390.0,
                description: "Engine maintenance, parts included".to_string(),
            },
        )
        .unwrap();
    let done = f.engine.complete_ticket(&f.supervisor, &id).unwrap();

    assert_eq!(done.status, TicketStatus::Completed);
    assert_eq!(done.final_cost, Some(390.0));
    assert!(done.approved_at.is_some());
    assert!(done.acknowledged_at.is_some());
    assert!(done.under_service_at.is_some());
    assert!(done.completed_at.is_some());
    assert!(done.invoice.as_ref().unwrap().paid_at.is_some());

    // Everything above went through disk; a fresh load sees the same state
    let reloaded = f.storage.load(&id).unwrap();
    assert_eq!(reloaded, done);
    assert_eq!(reloaded.bus.model, "XYZ Model");
    assert_eq!(reloaded.created_at, done.created_at);
}

#[test]
fn repair_approval_spawns_follow_up_ticket() {
    let f = Fixture::new();
    let ticket = f.file_ticket();
    let id = ticket.id.clone();

    f.engine.approve_ticket(&f.supervisor, &id).unwrap();
    f.engine.acknowledge_ticket(&f.vendor, &id).unwrap();
    let with_request = f
        .engine
        .request_repair(
            &f.vendor,
            &id,
            RepairInput {
                description: "Radiator hose perished".to_string(),
                estimated_cost: 85.0,
            },
        )
        .unwrap();
    assert_eq!(with_request.status, TicketStatus::RepairRequested);

    let repair_id = with_request.repair_requests[0].id.clone();
    let approval = f
        .engine
        .approve_repair(&f.supervisor, &id, &repair_id)
        .unwrap();

    assert_eq!(approval.updated.status, TicketStatus::Acknowledged);
    assert!(approval.updated.repair_request(&repair_id).unwrap().approved);

    let spawned = approval.spawned;
    assert_eq!(spawned.status, TicketStatus::Pending);
    assert_eq!(spawned.service_type, ServiceType::Repair);
    assert_eq!(spawned.title, "Repair for Engine is making strange noises");
    assert_eq!(spawned.estimated_cost, Some(85.0));
    assert_eq!(spawned.bus, approval.updated.bus);
    assert_eq!(spawned.created_by, f.supervisor.email);

    // Both tickets exist on disk
    assert_eq!(f.storage.load_all().unwrap().len(), 2);
}

#[test]
fn visibility_per_role() {
    let f = Fixture::new();

    // pending, approved, completed - all assigned to the same vendor
    let pending = f.file_ticket();
    let approved = f.file_ticket();
    f.engine.approve_ticket(&f.supervisor, &approved.id).unwrap();
    let completed = f.file_ticket();
    f.engine.approve_ticket(&f.supervisor, &completed.id).unwrap();
    f.engine.acknowledge_ticket(&f.vendor, &completed.id).unwrap();
    f.engine
        .submit_invoice(
            &f.vendor,
            &completed.id,
            InvoiceInput {
                amount: 120.0,
                description: "done".to_string(),
            },
        )
        .unwrap();
    f.engine.complete_ticket(&f.vendor, &completed.id).unwrap();

    // Vendor sees the released two of three
    let visible = f.engine.relevant_tickets(&f.vendor).unwrap();
    assert_eq!(visible.len(), 2);
    assert!(!visible.iter().any(|t| t.id == pending.id));

    // Creator sees all three; purchase only the settled one; guests none
    assert_eq!(f.engine.relevant_tickets(&f.creator).unwrap().len(), 3);
    let purchase_view = f.engine.relevant_tickets(&f.purchase).unwrap();
    assert_eq!(purchase_view.len(), 1);
    assert_eq!(purchase_view[0].id, completed.id);
    let guest = Actor::new("anon@example.com", Role::Guest);
    assert!(f.engine.relevant_tickets(&guest).unwrap().is_empty());
}

#[test]
fn wrong_role_and_wrong_state_leave_storage_untouched() {
    let f = Fixture::new();
    let ticket = f.file_ticket();
    let before = f.storage.load(&ticket.id).unwrap();

    // Vendor cannot approve
    let err = f.engine.approve_ticket(&f.vendor, &ticket.id).unwrap_err();
    assert!(matches!(err, FleetTicketError::PermissionDenied { .. }));

    // Acknowledging a pending ticket is out of order
    let err = f.engine.acknowledge_ticket(&f.vendor, &ticket.id).unwrap_err();
    assert!(matches!(err, FleetTicketError::InvalidTransition { .. }));

    // A stranger vendor is turned away even in the right state
    f.engine.approve_ticket(&f.supervisor, &ticket.id).unwrap();
    let stranger = Actor::new("other-vendor@example.com", Role::Vendor);
    let err = f.engine.acknowledge_ticket(&stranger, &ticket.id).unwrap_err();
    assert!(matches!(err, FleetTicketError::PermissionDenied { .. }));

    let after = f.storage.load(&ticket.id).unwrap();
    // Only the legitimate approval changed anything
    assert_eq!(after.status, TicketStatus::Approved);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.acknowledged_at.is_none());
}

#[test]
fn creation_validation_enumerates_missing_fields() {
    let f = Fixture::new();

    let err = f
        .engine
        .create_ticket(
            &f.creator,
            NewTicketInput {
                title: "AC is not cooling".to_string(),
                service_type: ServiceType::Repair,
                priority: Priority::Low,
                bus: BusSelection::Preset {
                    bus_number: "456".to_string(),
                },
                description: None,
                issue: None,
                repair_category: None,
                vendor: Some("vendor@example.com".to_string()),
                estimated_cost: None,
            },
        )
        .unwrap_err();

    match err {
        FleetTicketError::Validation { fields } => {
            assert!(fields.contains(&"description".to_string()));
            assert!(fields.contains(&"issue".to_string()));
            assert!(fields.contains(&"repair_category".to_string()));
        },
        other => panic!("expected Validation, got {other:?}"),
    }

    // Nothing was persisted
    assert!(f.storage.load_all().unwrap().is_empty());
}

#[test]
fn duplicate_preset_is_refused_without_altering_catalog() {
    let f = Fixture::new();
    let mut dup = preset("456");
    dup.model = "Imposter Model".to_string();

    assert!(!f.engine.add_bus_preset(&dup).unwrap());

    let catalog = f.engine.bus_presets().unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].model, "XYZ Model");
}

#[test]
fn bus_snapshot_survives_catalog_divergence() {
    // The ticket's bus block is a deep copy taken at creation; nothing the
    // catalog does afterwards reaches it.
    let storage = Arc::new(MemoryStorage::new());
    let engine = TicketEngine::new(
        storage.clone(),
        storage.clone(),
        storage,
        Arc::new(NullNotifier),
    );
    engine
        .add_vendor(NewVendor {
            name: "XYZ Manufacturer Workshop".to_string(),
            email: "vendor@example.com".to_string(),
            contact_person: None,
            phone: None,
        })
        .unwrap();
    assert!(engine.add_bus_preset(&preset("900")).unwrap());

    let creator = Actor::new("creator@example.com", Role::Creator);
    let ticket = engine
        .create_ticket(
            &creator,
            NewTicketInput {
                title: "Scheduled minor service".to_string(),
                service_type: ServiceType::Minor,
                priority: Priority::Low,
                bus: BusSelection::Preset {
                    bus_number: "900".to_string(),
                },
                description: None,
                issue: None,
                repair_category: None,
                vendor: None,
                estimated_cost: None,
            },
        )
        .unwrap();
    assert_eq!(ticket.bus.model, "XYZ Model");

    // The catalog refuses in-place edits (append-only, unique bus number),
    // so divergence can only come from the snapshot itself - which is ours
    let mut evolved = preset("900");
    evolved.model = "XYZ Model Mk2".to_string();
    assert!(!engine.add_bus_preset(&evolved).unwrap());

    let reloaded = engine.ticket(&ticket.id).unwrap().unwrap();
    assert_eq!(reloaded.bus.model, "XYZ Model");
    assert_eq!(
        engine.bus_presets().unwrap()[0].model,
        "XYZ Model"
    );
}

#[test]
fn date_and_bus_queries() {
    let f = Fixture::new();
    let ticket = f.file_ticket();

    let day = chrono::Utc::now() - chrono::Duration::hours(1);
    let later = chrono::Utc::now() + chrono::Duration::hours(1);
    assert_eq!(f.engine.tickets_by_date(day, later).unwrap().len(), 1);
    assert!(
        f.engine
            .tickets_by_date(later, later + chrono::Duration::hours(1))
            .unwrap()
            .is_empty()
    );

    assert_eq!(f.engine.tickets_by_bus("456").unwrap()[0].id, ticket.id);
    assert_eq!(
        f.engine
            .tickets_by_vendor("vendor@example.com")
            .unwrap()
            .len(),
        1
    );
}
