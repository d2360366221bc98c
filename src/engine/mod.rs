//! Lifecycle engine
//!
//! [`TicketEngine`] owns the workflow: creation validation, the role-gated
//! state machine, per-role visibility, vendor auto-assignment, and the
//! catalog/query operations. It holds the storage repositories and a
//! [`Notifier`] as injected capabilities, so callers (the CLI, tests,
//! embedding applications) decide where state lives and where notification
//! intents go.
//!
//! Every operation is synchronous: it reads the stored snapshot, computes a
//! full replacement, and writes it back as one unit. A failed role check or
//! state precondition returns a typed error and leaves the store untouched.

mod assignment;
mod create;
mod lifecycle;
mod summary;
mod visibility;

pub use assignment::select_vendor;
pub use create::{BusSelection, NewTicketInput};
pub use lifecycle::RepairApproval;
pub use summary::RoleSummary;
pub use visibility::visible_to;

use crate::core::{Actor, BusPreset, NewVendor, Role, Ticket, TicketId, Vendor};
use crate::error::{FleetTicketError, Result};
use crate::events::Notifier;
use crate::storage::{BusPresetRepository, TicketRepository, VendorRepository};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Payload for `submit_quotation`
#[derive(Debug, Clone)]
pub struct QuotationInput {
    pub amount: f64,
    pub description: String,
}

/// Payload for `submit_invoice`
#[derive(Debug, Clone)]
pub struct InvoiceInput {
    pub amount: f64,
    pub description: String,
}

/// Payload for `request_repair`
#[derive(Debug, Clone)]
pub struct RepairInput {
    pub description: String,
    pub estimated_cost: f64,
}

/// The workflow engine over injected repositories
pub struct TicketEngine {
    tickets: Arc<dyn TicketRepository>,
    buses: Arc<dyn BusPresetRepository>,
    vendors: Arc<dyn VendorRepository>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for TicketEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketEngine").finish_non_exhaustive()
    }
}

impl TicketEngine {
    /// Assemble an engine from its capabilities
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        buses: Arc<dyn BusPresetRepository>,
        vendors: Arc<dyn VendorRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            tickets,
            buses,
            vendors,
            notifier,
        }
    }

    pub(crate) fn ticket_store(&self) -> &dyn TicketRepository {
        self.tickets.as_ref()
    }

    pub(crate) fn bus_store(&self) -> &dyn BusPresetRepository {
        self.buses.as_ref()
    }

    pub(crate) fn vendor_store(&self) -> &dyn VendorRepository {
        self.vendors.as_ref()
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Load a ticket that must exist
    pub(crate) fn load(&self, id: &TicketId) -> Result<Ticket> {
        self.tickets.load(id)
    }

    /// Bump the concurrency token and persist the snapshot
    pub(crate) fn store(&self, mut ticket: Ticket) -> Result<Ticket> {
        ticket.touch();
        self.tickets.save(&ticket)?;
        Ok(ticket)
    }

    /// Look up a ticket; `None` if it does not exist
    pub fn ticket(&self, id: &TicketId) -> Result<Option<Ticket>> {
        match self.tickets.load(id) {
            Ok(ticket) => Ok(Some(ticket)),
            Err(FleetTicketError::TicketNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// All tickets created within the inclusive date range
    pub fn tickets_by_date(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Ticket>> {
        self.tickets
            .find(&|t| t.created_at >= start && t.created_at <= end)
    }

    /// All tickets assigned to the given vendor email
    pub fn tickets_by_vendor(&self, vendor_email: &str) -> Result<Vec<Ticket>> {
        self.tickets.find(&|t| t.assigned_vendor == vendor_email)
    }

    /// All tickets filed against the given bus number
    pub fn tickets_by_bus(&self, bus_number: &str) -> Result<Vec<Ticket>> {
        self.tickets.find(&|t| t.bus.bus_number == bus_number)
    }

    /// Add a bus preset to the catalog
    ///
    /// Returns `Ok(false)` when the bus number is already catalogued; the
    /// catalog is left unchanged in that case.
    pub fn add_bus_preset(&self, preset: &BusPreset) -> Result<bool> {
        match self.buses.add(preset) {
            Ok(()) => Ok(true),
            Err(FleetTicketError::DuplicateBusNumber { bus_number }) => {
                tracing::debug!("Rejected duplicate bus preset {bus_number}");
                Ok(false)
            },
            Err(e) => Err(e),
        }
    }

    /// The whole bus preset catalog
    pub fn bus_presets(&self) -> Result<Vec<BusPreset>> {
        self.buses.list()
    }

    /// Register a vendor; name and email are required
    pub fn add_vendor(&self, input: NewVendor) -> Result<Vendor> {
        let mut missing = Vec::new();
        if input.name.trim().is_empty() {
            missing.push("name".to_string());
        }
        if input.email.trim().is_empty() {
            missing.push("email".to_string());
        }
        if !missing.is_empty() {
            return Err(FleetTicketError::Validation { fields: missing });
        }

        let vendor = Vendor::from_input(input);
        self.vendors.add(&vendor)?;
        tracing::info!("Registered vendor {} <{}>", vendor.name, vendor.email);
        Ok(vendor)
    }

    /// All registered vendors
    pub fn vendors(&self) -> Result<Vec<Vendor>> {
        self.vendors.list()
    }

    /// Permission check: the actor must hold `role`
    pub(crate) fn require_role(
        actor: &Actor,
        role: Role,
        operation: &'static str,
    ) -> Result<()> {
        if actor.role == role {
            Ok(())
        } else {
            Err(FleetTicketError::PermissionDenied {
                operation,
                reason: format!("requires the {role} role, actor is {}", actor.role),
            })
        }
    }

    /// Permission check: the actor must be the ticket's assigned vendor
    pub(crate) fn require_assigned_vendor(
        actor: &Actor,
        ticket: &Ticket,
        operation: &'static str,
    ) -> Result<()> {
        Self::require_role(actor, Role::Vendor, operation)?;
        if ticket.assigned_vendor == actor.email {
            Ok(())
        } else {
            Err(FleetTicketError::PermissionDenied {
                operation,
                reason: format!(
                    "ticket is assigned to {}, not {}",
                    ticket.assigned_vendor, actor.email
                ),
            })
        }
    }
}
