//! Handlers for `list`, `show`, and `summary`
//!
//! Listings always start from the visibility resolver, then narrow by the
//! optional filters. There is no way to list a ticket the actor's role
//! would not be shown.

use super::common::HandlerContext;
use crate::cli::OutputFormatter;
use crate::core::{Actor, Ticket, TicketId, TicketStatus};
use crate::error::{FleetTicketError, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// Filters for the `list` command
#[derive(Default)]
pub struct ListFilters {
    pub status: Option<TicketStatus>,
    pub vendor: Option<String>,
    pub bus: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        FleetTicketError::custom(format!("Invalid date '{value}' (expected YYYY-MM-DD): {e}"))
    })
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn day_end(date: NaiveDate) -> DateTime<Utc> {
    (date.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::nanoseconds(1)).and_utc()
}

/// Handler for the `list` command
pub fn handle_list_command(
    ctx: &HandlerContext,
    actor: &Actor,
    filters: ListFilters,
    output: &OutputFormatter,
) -> Result<()> {
    let since = filters.since.as_deref().map(parse_date).transpose()?.map(day_start);
    let until = filters.until.as_deref().map(parse_date).transpose()?.map(day_end);

    let mut tickets = ctx.engine.relevant_tickets(actor)?;
    tickets.retain(|t| {
        filters.status.is_none_or(|s| t.status == s)
            && filters.vendor.as_deref().is_none_or(|v| t.assigned_vendor == v)
            && filters.bus.as_deref().is_none_or(|b| t.bus.bus_number == b)
            && since.is_none_or(|s| t.created_at >= s)
            && until.is_none_or(|u| t.created_at <= u)
    });

    if output.is_json() {
        return output.print_json(&tickets);
    }

    if tickets.is_empty() {
        output.info("No tickets to display");
        return Ok(());
    }

    output.info(&format!("Tickets ({}):", tickets.len()));
    for ticket in &tickets {
        output.info(&format!(
            "  {}  {:<16}  bus {:<6}  {}",
            ticket.id.short(),
            ticket.status.to_string(),
            ticket.bus.bus_number,
            ticket.title
        ));
    }
    Ok(())
}

fn print_ticket(ticket: &Ticket, output: &OutputFormatter) {
    output.info(&format!("Ticket:      {}", ticket.id));
    output.info(&format!("Title:       {}", ticket.title));
    output.info(&format!("Status:      {}", ticket.status));
    output.info(&format!(
        "Service:     {} (priority {})",
        ticket.service_type, ticket.priority
    ));
    if let Some(category) = ticket.repair_category {
        output.info(&format!("Category:    {category}"));
    }
    output.info(&format!("Created by:  {}", ticket.created_by));
    output.info(&format!("Vendor:      {}", ticket.assigned_vendor));
    output.info(&format!(
        "Bus:         {} - {} ({}, {})",
        ticket.bus.bus_number, ticket.bus.model, ticket.bus.manufacturer, ticket.bus.year
    ));
    output.info(&format!("Issue:       {}", ticket.bus.issue));
    output.info(&format!("Description: {}", ticket.description));
    if let Some(cost) = ticket.estimated_cost {
        output.info(&format!("Estimated:   {cost:.2}"));
    }
    if let Some(cost) = ticket.final_cost {
        output.info(&format!("Final cost:  {cost:.2}"));
    }
    if let Some(reason) = &ticket.rejected_reason {
        output.info(&format!("Rejected:    {reason}"));
    }
    if let Some(quotation) = &ticket.quotation {
        output.info(&format!(
            "Quotation:   {:.2} ({:?}) - {}",
            quotation.amount, quotation.status, quotation.description
        ));
    }
    if let Some(invoice) = &ticket.invoice {
        let paid = if invoice.paid_at.is_some() { "paid" } else { "unpaid" };
        output.info(&format!(
            "Invoice:     {:.2} ({paid}) - {}",
            invoice.amount, invoice.description
        ));
    }
    if !ticket.repair_requests.is_empty() {
        output.info("Repair requests:");
        for request in &ticket.repair_requests {
            let state = if request.approved { "approved" } else { "pending" };
            output.info(&format!(
                "  {}  {state:<8}  {:.2}  {}",
                request.id.short(),
                request.estimated_cost,
                request.description
            ));
        }
    }
    if !ticket.notes.is_empty() {
        output.info("Notes:");
        for note in &ticket.notes {
            output.info(&format!("  - {note}"));
        }
    }
}

/// Handler for the `show` command
pub fn handle_show_command(
    ctx: &HandlerContext,
    ticket_id: &TicketId,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx
        .engine
        .ticket(ticket_id)?
        .ok_or_else(|| FleetTicketError::TicketNotFound {
            id: ticket_id.to_string(),
        })?;

    if output.is_json() {
        output.print_json(&ticket)
    } else {
        print_ticket(&ticket, output);
        Ok(())
    }
}

/// Handler for the `summary` command
pub fn handle_summary_command(
    ctx: &HandlerContext,
    actor: &Actor,
    output: &OutputFormatter,
) -> Result<()> {
    let summary = ctx.engine.summary(actor)?;
    if output.is_json() {
        return output.print_json(&summary);
    }

    use crate::engine::RoleSummary;
    match summary {
        RoleSummary::Vendor {
            total,
            pending_action,
            in_progress,
            completed,
        } => {
            output.info(&format!("Vendor dashboard for {}", actor.email));
            output.info(&format!("  Total tickets:   {total}"));
            output.info(&format!("  Pending action:  {pending_action}"));
            output.info(&format!("  In progress:     {in_progress}"));
            output.info(&format!("  Completed:       {completed}"));
        },
        RoleSummary::Creator {
            total,
            pending,
            in_progress,
            completed,
        } => {
            output.info(&format!("Creator dashboard for {}", actor.email));
            output.info(&format!("  Total tickets:   {total}"));
            output.info(&format!("  Pending:         {pending}"));
            output.info(&format!("  In progress:     {in_progress}"));
            output.info(&format!("  Completed:       {completed}"));
        },
        RoleSummary::Supervisor {
            total,
            pending_approval,
            repair_requests,
            active,
        } => {
            output.info("Supervisor dashboard");
            output.info(&format!("  Total tickets:    {total}"));
            output.info(&format!("  Pending approval: {pending_approval}"));
            output.info(&format!("  Repair requests:  {repair_requests}"));
            output.info(&format!("  Active:           {active}"));
        },
        RoleSummary::Purchase {
            total,
            invoiced,
            completed,
            total_spent,
        } => {
            output.info("Purchase dashboard");
            output.info(&format!("  Total tickets:   {total}"));
            output.info(&format!("  Invoiced:        {invoiced}"));
            output.info(&format!("  Completed:       {completed}"));
            output.info(&format!("  Total spent:     {total_spent:.2}"));
        },
        RoleSummary::Guest => {
            output.info("No dashboard for unauthenticated users");
        },
    }
    Ok(())
}
