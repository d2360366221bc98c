//! Handlers for the lifecycle commands
//!
//! Approve, reject, acknowledge, quote, start-service, invoice, repair,
//! complete, note, and the administrative override. Each handler calls one
//! engine operation, reports the resulting status, and echoes the
//! notification intents the transition emitted.

use super::common::HandlerContext;
use crate::cli::OutputFormatter;
use crate::core::{Actor, RepairRequestId, Ticket, TicketId, TicketStatus};
use crate::engine::{InvoiceInput, QuotationInput, RepairInput};
use crate::error::Result;

fn report(ticket: &Ticket, verb: &str, output: &OutputFormatter) -> Result<()> {
    if output.is_json() {
        output.print_json(ticket)
    } else {
        output.success(&format!(
            "Ticket '{}' ({}) {verb}, now {}",
            ticket.title,
            ticket.id.short(),
            ticket.status
        ));
        Ok(())
    }
}

/// Handler for the `approve` command
pub fn handle_approve_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    ticket_id: &TicketId,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.engine.approve_ticket(actor, ticket_id)?;
    report(&ticket, "approved", output)?;
    ctx.drain_notifications(output);
    Ok(())
}

/// Handler for the `reject` command
pub fn handle_reject_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    ticket_id: &TicketId,
    reason: &str,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.engine.reject_ticket(actor, ticket_id, reason)?;
    report(&ticket, "rejected", output)?;
    ctx.drain_notifications(output);
    Ok(())
}

/// Handler for the `acknowledge` command
pub fn handle_acknowledge_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    ticket_id: &TicketId,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.engine.acknowledge_ticket(actor, ticket_id)?;
    report(&ticket, "acknowledged", output)?;
    ctx.drain_notifications(output);
    Ok(())
}

/// Handler for `quote submit`
pub fn handle_quote_submit_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    ticket_id: &TicketId,
    amount: f64,
    description: String,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.engine.submit_quotation(
        actor,
        ticket_id,
        QuotationInput {
            amount,
            description,
        },
    )?;
    report(&ticket, "quoted", output)?;
    ctx.drain_notifications(output);
    Ok(())
}

/// Handler for `quote approve`
pub fn handle_quote_approve_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    ticket_id: &TicketId,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.engine.approve_quotation(actor, ticket_id)?;
    report(&ticket, "quotation approved", output)?;
    ctx.drain_notifications(output);
    Ok(())
}

/// Handler for `quote reject`
pub fn handle_quote_reject_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    ticket_id: &TicketId,
    reason: &str,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.engine.reject_quotation(actor, ticket_id, reason)?;
    report(&ticket, "quotation rejected", output)?;
    ctx.drain_notifications(output);
    Ok(())
}

/// Handler for the `start-service` command
pub fn handle_start_service_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    ticket_id: &TicketId,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.engine.start_service(actor, ticket_id)?;
    report(&ticket, "under service", output)?;
    ctx.drain_notifications(output);
    Ok(())
}

/// Handler for the `invoice` command
pub fn handle_invoice_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    ticket_id: &TicketId,
    amount: f64,
    description: String,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.engine.submit_invoice(
        actor,
        ticket_id,
        InvoiceInput {
            amount,
            description,
        },
    )?;
    if !output.is_json() {
        output.info(&format!("  final cost set to {amount:.2}"));
    }
    report(&ticket, "invoiced", output)?;
    ctx.drain_notifications(output);
    Ok(())
}

/// Handler for `repair request`, with or without an accompanying invoice
#[allow(clippy::too_many_arguments)]
pub fn handle_repair_request_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    ticket_id: &TicketId,
    description: String,
    estimated_cost: f64,
    invoice: Option<(f64, String)>,
    output: &OutputFormatter,
) -> Result<()> {
    let repair = RepairInput {
        description,
        estimated_cost,
    };
    let ticket = match invoice {
        Some((amount, invoice_description)) => ctx.engine.request_repair_with_invoice(
            actor,
            ticket_id,
            repair,
            InvoiceInput {
                amount,
                description: invoice_description,
            },
        )?,
        None => ctx.engine.request_repair(actor, ticket_id, repair)?,
    };

    if output.is_json() {
        output.print_json(&ticket)?;
    } else {
        let request = ticket
            .repair_requests
            .last()
            .map(|r| r.id.short())
            .unwrap_or_default();
        output.success(&format!(
            "Repair requested on ticket {} (request {request})",
            ticket.id.short()
        ));
    }
    ctx.drain_notifications(output);
    Ok(())
}

/// Handler for `repair approve`
pub fn handle_repair_approve_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    ticket_id: &TicketId,
    repair_id: &RepairRequestId,
    output: &OutputFormatter,
) -> Result<()> {
    let approval = ctx.engine.approve_repair(actor, ticket_id, repair_id)?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "updated": approval.updated,
            "spawned": approval.spawned,
        }))?;
    } else {
        output.success(&format!(
            "Repair {} approved; ticket {} back to {}",
            repair_id.short(),
            approval.updated.id.short(),
            approval.updated.status
        ));
        output.info(&format!(
            "  spawned ticket '{}' ({})",
            approval.spawned.title,
            approval.spawned.id.short()
        ));
    }
    ctx.drain_notifications(output);
    Ok(())
}

/// Handler for the `complete` command
pub fn handle_complete_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    ticket_id: &TicketId,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.engine.complete_ticket(actor, ticket_id)?;
    report(&ticket, "completed", output)?;
    ctx.drain_notifications(output);
    Ok(())
}

/// Handler for the `note` command
pub fn handle_note_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    ticket_id: &TicketId,
    text: &str,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.engine.add_note(actor, ticket_id, text)?;
    if output.is_json() {
        output.print_json(&ticket)?;
    } else {
        output.success(&format!(
            "Note added to ticket {} ({} notes)",
            ticket.id.short(),
            ticket.notes.len()
        ));
    }
    Ok(())
}

/// Handler for the `override-status` command
pub fn handle_override_status_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    ticket_id: &TicketId,
    status: TicketStatus,
    reason: &str,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.engine.override_status(actor, ticket_id, status, reason)?;
    output.warning("Status set outside the workflow; an audit note was recorded");
    report(&ticket, "overridden", output)?;
    Ok(())
}
