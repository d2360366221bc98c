//! The lifecycle state machine
//!
//! One method per workflow operation. Every method follows the same shape:
//! load the snapshot, check the actor's role (and vendor identity where the
//! operation belongs to the assigned vendor), check the current status
//! against the operation's allowed From set, apply the side effects, persist
//! the replacement snapshot, then emit notification intents. A failure at
//! any check returns before anything is written.

use super::{InvoiceInput, QuotationInput, RepairInput, TicketEngine};
use crate::core::{
    Actor, Invoice, Quotation, RepairRequest, RepairRequestId, Role, ServiceType, Ticket,
    TicketBuilder, TicketId, TicketStatus,
};
use crate::error::{FleetTicketError, Result};
use crate::events::{NotificationKind, Recipient};

/// Result of approving a repair request: the reverted original plus the
/// freshly spawned follow-up ticket
#[derive(Debug, Clone)]
pub struct RepairApproval {
    pub updated: Ticket,
    pub spawned: Ticket,
}

fn require_status(
    ticket: &Ticket,
    allowed: &[TicketStatus],
    operation: &'static str,
) -> Result<()> {
    if allowed.contains(&ticket.status) {
        Ok(())
    } else {
        Err(FleetTicketError::InvalidTransition {
            operation,
            status: ticket.status,
        })
    }
}

impl TicketEngine {
    /// Supervisor approves a pending ticket, releasing it to the vendor
    pub fn approve_ticket(&self, actor: &Actor, id: &TicketId) -> Result<Ticket> {
        const OP: &str = "approve_ticket";
        let mut ticket = self.load(id)?;
        Self::require_role(actor, Role::Supervisor, OP)?;
        require_status(&ticket, &[TicketStatus::Pending], OP)?;

        ticket.status = TicketStatus::Approved;
        ticket.approved_at = Some(chrono::Utc::now());
        let ticket = self.store(ticket)?;

        tracing::info!("Ticket {} approved by {}", ticket.id.short(), actor.email);
        Ok(ticket)
    }

    /// Supervisor rejects a pending ticket back to its creator
    pub fn reject_ticket(&self, actor: &Actor, id: &TicketId, reason: &str) -> Result<Ticket> {
        const OP: &str = "reject_ticket";
        let mut ticket = self.load(id)?;
        Self::require_role(actor, Role::Supervisor, OP)?;
        require_status(&ticket, &[TicketStatus::Pending], OP)?;

        ticket.status = TicketStatus::Rejected;
        ticket.rejected_reason = Some(reason.to_string());
        let ticket = self.store(ticket)?;

        tracing::info!("Ticket {} rejected: {reason}", ticket.id.short());
        Ok(ticket)
    }

    /// Assigned vendor acknowledges an approved ticket
    pub fn acknowledge_ticket(&self, actor: &Actor, id: &TicketId) -> Result<Ticket> {
        const OP: &str = "acknowledge_ticket";
        let mut ticket = self.load(id)?;
        Self::require_assigned_vendor(actor, &ticket, OP)?;
        require_status(&ticket, &[TicketStatus::Approved], OP)?;

        ticket.status = TicketStatus::Acknowledged;
        ticket.acknowledged_at = Some(chrono::Utc::now());
        let ticket = self.store(ticket)?;

        self.notifier().notify(
            Recipient::User(ticket.created_by.clone()),
            NotificationKind::TicketAcknowledged,
            ticket.id.clone(),
        );
        self.notifier().notify(
            Recipient::Role(Role::Supervisor),
            NotificationKind::TicketAcknowledged,
            ticket.id.clone(),
        );
        Ok(ticket)
    }

    /// Assigned vendor submits a quotation for an acknowledged ticket
    pub fn submit_quotation(
        &self,
        actor: &Actor,
        id: &TicketId,
        input: QuotationInput,
    ) -> Result<Ticket> {
        const OP: &str = "submit_quotation";
        let mut ticket = self.load(id)?;
        Self::require_assigned_vendor(actor, &ticket, OP)?;
        require_status(&ticket, &[TicketStatus::Acknowledged], OP)?;

        ticket.quotation = Some(Quotation::new(input.amount, input.description));
        ticket.status = TicketStatus::Quoted;
        let ticket = self.store(ticket)?;

        tracing::info!("Quotation submitted for ticket {}", ticket.id.short());
        Ok(ticket)
    }

    /// Supervisor approves the submitted quotation
    pub fn approve_quotation(&self, actor: &Actor, id: &TicketId) -> Result<Ticket> {
        const OP: &str = "approve_quotation";
        let mut ticket = self.load(id)?;
        Self::require_role(actor, Role::Supervisor, OP)?;
        require_status(&ticket, &[TicketStatus::Quoted], OP)?;

        let quotation = ticket
            .quotation
            .as_mut()
            .ok_or_else(|| FleetTicketError::custom("quoted ticket has no quotation"))?;
        quotation.approve(actor.email.clone());
        ticket.status = TicketStatus::QuoteApproved;
        let ticket = self.store(ticket)?;

        self.notifier().notify(
            Recipient::User(ticket.assigned_vendor.clone()),
            NotificationKind::QuotationApproved,
            ticket.id.clone(),
        );
        Ok(ticket)
    }

    /// Supervisor rejects the submitted quotation
    pub fn reject_quotation(&self, actor: &Actor, id: &TicketId, reason: &str) -> Result<Ticket> {
        const OP: &str = "reject_quotation";
        let mut ticket = self.load(id)?;
        Self::require_role(actor, Role::Supervisor, OP)?;
        require_status(&ticket, &[TicketStatus::Quoted], OP)?;

        let quotation = ticket
            .quotation
            .as_mut()
            .ok_or_else(|| FleetTicketError::custom("quoted ticket has no quotation"))?;
        quotation.reject(reason);
        ticket.status = TicketStatus::QuoteRejected;
        let ticket = self.store(ticket)?;

        self.notifier().notify(
            Recipient::User(ticket.assigned_vendor.clone()),
            NotificationKind::QuotationRejected,
            ticket.id.clone(),
        );
        Ok(ticket)
    }

    /// Assigned vendor starts servicing once the quotation is approved
    pub fn start_service(&self, actor: &Actor, id: &TicketId) -> Result<Ticket> {
        const OP: &str = "start_service";
        let mut ticket = self.load(id)?;
        Self::require_assigned_vendor(actor, &ticket, OP)?;
        require_status(&ticket, &[TicketStatus::QuoteApproved], OP)?;

        ticket.status = TicketStatus::UnderService;
        ticket.under_service_at = Some(chrono::Utc::now());
        let ticket = self.store(ticket)?;

        self.notifier().notify(
            Recipient::User(ticket.created_by.clone()),
            NotificationKind::ServiceStarted,
            ticket.id.clone(),
        );
        Ok(ticket)
    }

    /// Assigned vendor submits the invoice; sets the final cost
    pub fn submit_invoice(
        &self,
        actor: &Actor,
        id: &TicketId,
        input: InvoiceInput,
    ) -> Result<Ticket> {
        const OP: &str = "submit_invoice";
        let mut ticket = self.load(id)?;
        Self::require_assigned_vendor(actor, &ticket, OP)?;
        require_status(
            &ticket,
            &[TicketStatus::Acknowledged, TicketStatus::UnderService],
            OP,
        )?;

        let invoice = Invoice::new(input.amount, input.description);
        ticket.final_cost = Some(invoice.amount);
        ticket.invoice = Some(invoice);
        ticket.status = TicketStatus::Invoiced;
        let ticket = self.store(ticket)?;

        self.notifier().notify(
            Recipient::User(ticket.created_by.clone()),
            NotificationKind::InvoiceSubmitted,
            ticket.id.clone(),
        );
        self.notifier().notify(
            Recipient::Role(Role::Purchase),
            NotificationKind::InvoiceSubmitted,
            ticket.id.clone(),
        );
        Ok(ticket)
    }

    /// Assigned vendor requests additional, unplanned repair work
    pub fn request_repair(
        &self,
        actor: &Actor,
        id: &TicketId,
        input: RepairInput,
    ) -> Result<Ticket> {
        const OP: &str = "request_repair";
        let mut ticket = self.load(id)?;
        Self::require_assigned_vendor(actor, &ticket, OP)?;
        require_status(
            &ticket,
            &[TicketStatus::Acknowledged, TicketStatus::UnderService],
            OP,
        )?;

        ticket
            .repair_requests
            .push(RepairRequest::new(input.description, input.estimated_cost));
        ticket.status = TicketStatus::RepairRequested;
        let ticket = self.store(ticket)?;

        self.notifier().notify(
            Recipient::Role(Role::Supervisor),
            NotificationKind::RepairRequested,
            ticket.id.clone(),
        );
        Ok(ticket)
    }

    /// Request additional repair work and submit the invoice for the work
    /// already done, in one transition
    pub fn request_repair_with_invoice(
        &self,
        actor: &Actor,
        id: &TicketId,
        repair: RepairInput,
        invoice: InvoiceInput,
    ) -> Result<Ticket> {
        const OP: &str = "request_repair_with_invoice";
        let mut ticket = self.load(id)?;
        Self::require_assigned_vendor(actor, &ticket, OP)?;
        require_status(
            &ticket,
            &[TicketStatus::Acknowledged, TicketStatus::UnderService],
            OP,
        )?;

        ticket
            .repair_requests
            .push(RepairRequest::new(repair.description, repair.estimated_cost));
        let inv = Invoice::new(invoice.amount, invoice.description);
        ticket.final_cost = Some(inv.amount);
        ticket.invoice = Some(inv);
        ticket.status = TicketStatus::RepairRequested;
        let ticket = self.store(ticket)?;

        self.notifier().notify(
            Recipient::Role(Role::Supervisor),
            NotificationKind::RepairRequested,
            ticket.id.clone(),
        );
        self.notifier().notify(
            Recipient::Role(Role::Purchase),
            NotificationKind::InvoiceSubmitted,
            ticket.id.clone(),
        );
        Ok(ticket)
    }

    /// Supervisor approves one pending repair request
    ///
    /// The original ticket returns to `acknowledged` so the vendor can
    /// continue, and a new `pending` repair ticket is spawned for the
    /// approved work. Sibling requests are untouched.
    pub fn approve_repair(
        &self,
        actor: &Actor,
        id: &TicketId,
        repair_id: &RepairRequestId,
    ) -> Result<RepairApproval> {
        const OP: &str = "approve_repair";
        let mut ticket = self.load(id)?;
        Self::require_role(actor, Role::Supervisor, OP)?;
        require_status(&ticket, &[TicketStatus::RepairRequested], OP)?;

        let approver = actor.email.clone();
        let repair = ticket
            .repair_request_mut(repair_id)
            .ok_or_else(|| FleetTicketError::RepairRequestNotFound {
                id: repair_id.to_string(),
            })?;
        repair.approve(approver);
        let repair = repair.clone();

        let spawned = TicketBuilder::new()
            .id(TicketId::new())
            .title(format!("Repair for {}", ticket.title))
            .description(repair.description.clone())
            .service_type(ServiceType::Repair)
            .repair_category(ticket.repair_category)
            .priority(ticket.priority)
            .created_by(actor.email.clone())
            .assigned_vendor(ticket.assigned_vendor.clone())
            .bus(ticket.bus.clone())
            .estimated_cost(Some(repair.estimated_cost))
            .build();

        ticket.status = TicketStatus::Acknowledged;
        let updated = self.store(ticket)?;
        self.ticket_store().save(&spawned)?;

        tracing::info!(
            "Repair {} approved on ticket {}, spawned {}",
            repair.id.short(),
            updated.id.short(),
            spawned.id.short()
        );
        Ok(RepairApproval { updated, spawned })
    }

    /// Settle an invoiced ticket
    ///
    /// Open to the supervisor and to the assigned vendor. Stamps the
    /// completion time and marks the invoice paid.
    pub fn complete_ticket(&self, actor: &Actor, id: &TicketId) -> Result<Ticket> {
        const OP: &str = "complete_ticket";
        let mut ticket = self.load(id)?;
        match actor.role {
            Role::Supervisor => {},
            Role::Vendor => Self::require_assigned_vendor(actor, &ticket, OP)?,
            _ => {
                return Err(FleetTicketError::PermissionDenied {
                    operation: OP,
                    reason: format!(
                        "requires the supervisor or vendor role, actor is {}",
                        actor.role
                    ),
                });
            },
        }
        require_status(&ticket, &[TicketStatus::Invoiced], OP)?;

        let now = chrono::Utc::now();
        ticket.status = TicketStatus::Completed;
        ticket.completed_at = Some(now);
        if let Some(invoice) = ticket.invoice.as_mut() {
            invoice.paid_at = Some(now);
        }
        let ticket = self.store(ticket)?;

        tracing::info!("Ticket {} completed", ticket.id.short());
        Ok(ticket)
    }

    /// Append a note; allowed to any authenticated actor at any status
    pub fn add_note(&self, actor: &Actor, id: &TicketId, text: &str) -> Result<Ticket> {
        const OP: &str = "add_note";
        let mut ticket = self.load(id)?;
        if !actor.is_authenticated() {
            return Err(FleetTicketError::PermissionDenied {
                operation: OP,
                reason: "requires an authenticated actor".to_string(),
            });
        }

        ticket.push_note(text);
        self.store(ticket)
    }

    /// Administrative status override, outside the transition table
    ///
    /// Supervisor-only. Appends an audit note recording the old status, the
    /// new status, the reason, and the actor. Can produce states that are
    /// inconsistent with attached sub-entities; the audit trail is the
    /// safeguard.
    pub fn override_status(
        &self,
        actor: &Actor,
        id: &TicketId,
        status: TicketStatus,
        reason: &str,
    ) -> Result<Ticket> {
        const OP: &str = "override_status";
        let mut ticket = self.load(id)?;
        Self::require_role(actor, Role::Supervisor, OP)?;

        let old = ticket.status;
        tracing::warn!(
            "Status override on ticket {}: {old} -> {status} ({reason}) by {}",
            ticket.id.short(),
            actor.email
        );
        ticket.push_note(format!(
            "status override: {old} -> {status} ({reason}) by {}",
            actor.email
        ));
        ticket.status = status;
        self.store(ticket)
    }
}
