//! Handler for the `create` command
//!
//! Translates command-line flags into a [`NewTicketInput`] and hands it to
//! the engine; the engine owns every validation rule.

use super::common::HandlerContext;
use crate::cli::OutputFormatter;
use crate::core::{Actor, BusDetails, Priority, RepairCategory, ServiceType};
use crate::engine::{BusSelection, NewTicketInput};
use crate::error::Result;

/// Parameters for creating a ticket
pub struct CreateParams {
    pub title: String,
    pub service_type: ServiceType,
    pub priority: Priority,
    /// Catalogued preset to snapshot; manual fields are used when absent
    pub bus_preset: Option<String>,
    pub bus_number: Option<String>,
    pub fleet_number: Option<String>,
    pub chassis_number: Option<String>,
    pub registration_number: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
    pub issue: Option<String>,
    pub repair_category: Option<RepairCategory>,
    pub vendor: Option<String>,
    pub estimated_cost: Option<f64>,
}

/// Handle the create command
pub fn handle_create_command(
    ctx: &mut HandlerContext,
    actor: &Actor,
    params: CreateParams,
    output: &OutputFormatter,
) -> Result<()> {
    let bus = match params.bus_preset {
        Some(bus_number) => BusSelection::Preset { bus_number },
        None => BusSelection::Manual(Box::new(BusDetails {
            bus_number: params.bus_number.unwrap_or_default(),
            fleet_number: params.fleet_number.unwrap_or_default(),
            chassis_number: params.chassis_number.unwrap_or_default(),
            registration_number: params.registration_number.unwrap_or_default(),
            model: params.model.unwrap_or_default(),
            manufacturer: params.manufacturer.unwrap_or_default(),
            year: params.year.unwrap_or_default(),
            issue: String::new(),
            ..BusDetails::default()
        })),
    };

    let ticket = ctx.engine.create_ticket(
        actor,
        NewTicketInput {
            title: params.title,
            service_type: params.service_type,
            priority: params.priority,
            bus,
            description: params.description,
            issue: params.issue,
            repair_category: params.repair_category,
            vendor: params.vendor,
            estimated_cost: params.estimated_cost,
        },
    )?;

    if output.is_json() {
        output.print_json(&ticket)?;
    } else {
        output.success(&format!(
            "Created ticket '{}' ({})",
            ticket.title,
            ticket.id.short()
        ));
        output.info(&format!(
            "  bus {} ({} service), assigned to {}",
            ticket.bus.bus_number, ticket.service_type, ticket.assigned_vendor
        ));
    }
    ctx.drain_notifications(output);
    Ok(())
}
