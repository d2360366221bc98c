//! Handlers for the bus and vendor catalog commands

use super::common::HandlerContext;
use crate::cli::OutputFormatter;
use crate::core::{BusPreset, NewVendor};
use crate::error::Result;

/// Parameters for `bus add`
pub struct BusAddParams {
    pub bus_number: String,
    pub fleet_number: String,
    pub chassis_number: String,
    pub registration_number: String,
    pub model: String,
    pub manufacturer: String,
    pub year: String,
    pub engine_service_interval: u32,
    pub tyre_service_interval: u32,
    pub ac_service_interval: u32,
    pub transmission_service_interval: u32,
    pub brake_pad_service_interval: u32,
}

/// Handler for `bus add`
pub fn handle_bus_add_command(
    ctx: &HandlerContext,
    params: BusAddParams,
    output: &OutputFormatter,
) -> Result<()> {
    let preset = BusPreset {
        bus_number: params.bus_number,
        fleet_number: params.fleet_number,
        chassis_number: params.chassis_number,
        registration_number: params.registration_number,
        model: params.model,
        manufacturer: params.manufacturer,
        year: params.year,
        engine_service_interval: params.engine_service_interval,
        tyre_service_interval: params.tyre_service_interval,
        ac_service_interval: params.ac_service_interval,
        transmission_service_interval: params.transmission_service_interval,
        brake_pad_service_interval: params.brake_pad_service_interval,
    };

    let added = ctx.engine.add_bus_preset(&preset)?;
    if output.is_json() {
        output.print_json(&serde_json::json!({
            "added": added,
            "bus_number": preset.bus_number,
        }))?;
    } else if added {
        output.success(&format!("Bus {} added to the catalog", preset.bus_number));
    } else {
        output.warning(&format!(
            "Bus {} already exists; catalog unchanged",
            preset.bus_number
        ));
    }
    Ok(())
}

/// Handler for `bus list`
pub fn handle_bus_list_command(ctx: &HandlerContext, output: &OutputFormatter) -> Result<()> {
    let presets = ctx.engine.bus_presets()?;

    if output.is_json() {
        return output.print_json(&presets);
    }

    if presets.is_empty() {
        output.info("No buses catalogued");
        return Ok(());
    }

    output.info(&format!("Buses ({}):", presets.len()));
    for preset in &presets {
        output.info(&format!(
            "  {:<8}  {} ({}, {})",
            preset.bus_number, preset.model, preset.manufacturer, preset.year
        ));
    }
    Ok(())
}

/// Handler for `vendor add`
pub fn handle_vendor_add_command(
    ctx: &HandlerContext,
    input: NewVendor,
    output: &OutputFormatter,
) -> Result<()> {
    let vendor = ctx.engine.add_vendor(input)?;
    if output.is_json() {
        output.print_json(&vendor)?;
    } else {
        output.success(&format!("Registered vendor {} <{}>", vendor.name, vendor.email));
    }
    Ok(())
}

/// Handler for `vendor list`
pub fn handle_vendor_list_command(ctx: &HandlerContext, output: &OutputFormatter) -> Result<()> {
    let vendors = ctx.engine.vendors()?;

    if output.is_json() {
        return output.print_json(&vendors);
    }

    if vendors.is_empty() {
        output.info("No vendors registered");
        return Ok(());
    }

    output.info(&format!("Vendors ({}):", vendors.len()));
    for vendor in &vendors {
        output.info(&format!("  {}  <{}>", vendor.name, vendor.email));
    }
    Ok(())
}
