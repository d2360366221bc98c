use super::{
    BusDetails, Priority, RepairCategory, ServiceType, Ticket, TicketId, TicketStatus,
};
use chrono::{DateTime, Utc};

/// Builder for creating Ticket instances
///
/// Used by the engine's creation and repair-spawn paths and by tests.
/// Creation-time validation lives in the engine, not here.
#[derive(Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    title: Option<String>,
    description: Option<String>,
    status: Option<TicketStatus>,
    service_type: Option<ServiceType>,
    repair_category: Option<RepairCategory>,
    priority: Option<Priority>,
    created_by: Option<String>,
    assigned_vendor: Option<String>,
    bus: Option<BusDetails>,
    estimated_cost: Option<f64>,
    created_at: Option<DateTime<Utc>>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket ID
    #[must_use]
    pub fn id(mut self, id: TicketId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the service type
    #[must_use]
    pub const fn service_type(mut self, service_type: ServiceType) -> Self {
        self.service_type = Some(service_type);
        self
    }

    /// Set the repair category
    #[must_use]
    pub const fn repair_category(mut self, category: Option<RepairCategory>) -> Self {
        self.repair_category = category;
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the creator identity
    #[must_use]
    pub fn created_by(mut self, email: impl Into<String>) -> Self {
        self.created_by = Some(email.into());
        self
    }

    /// Set the assigned vendor
    #[must_use]
    pub fn assigned_vendor(mut self, email: impl Into<String>) -> Self {
        self.assigned_vendor = Some(email.into());
        self
    }

    /// Set the bus snapshot
    #[must_use]
    pub fn bus(mut self, bus: BusDetails) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Set the estimated cost
    #[must_use]
    pub const fn estimated_cost(mut self, cost: Option<f64>) -> Self {
        self.estimated_cost = cost;
        self
    }

    /// Set `created_at` timestamp
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the ticket
    ///
    /// Fresh tickets start `pending` with no attached entities.
    pub fn build(self) -> Ticket {
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        Ticket {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or(TicketStatus::Pending),
            service_type: self.service_type.unwrap_or(ServiceType::Minor),
            repair_category: self.repair_category,
            priority: self.priority.unwrap_or_default(),
            created_by: self.created_by.unwrap_or_default(),
            assigned_vendor: self.assigned_vendor.unwrap_or_default(),
            bus: self.bus.unwrap_or_default(),
            created_at,
            updated_at: created_at,
            approved_at: None,
            acknowledged_at: None,
            under_service_at: None,
            completed_at: None,
            quotation: None,
            repair_requests: Vec::new(),
            invoice: None,
            estimated_cost: self.estimated_cost,
            final_cost: None,
            notes: Vec::new(),
            rejected_reason: None,
        }
    }
}
