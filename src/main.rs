//! fleet-ticket - maintenance ticket workflow for bus fleets
//!
//! This is the main entry point for the fleet-ticket CLI application.
//! It handles command-line argument parsing and dispatches to the
//! appropriate command handlers.

use clap::Parser;
use fleet_ticket::cli::{
    BusCommands, Cli, Commands, OutputFormatter, QuoteCommands, RepairCommands, VendorCommands,
    handlers,
};
use fleet_ticket::config::Config;
use fleet_ticket::core::Actor;
use fleet_ticket::error::Result;
use std::path::PathBuf;
use std::process;

/// Main entry point for the fleet-ticket CLI
///
/// Parses command-line arguments and executes the requested command.
/// Handles errors gracefully and provides helpful messages to users.
fn main() {
    let cli = Cli::parse();

    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    if let Err(e) = run(cli, &formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Run the CLI application with the parsed arguments
fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    // Set up logging if verbose mode is enabled
    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    }

    let data_dir = resolve_data_dir(cli.data_dir)?;
    let actor = handlers::resolve_actor(cli.actor.as_deref(), cli.role);

    // init runs before the context exists; everything else needs it
    if matches!(&cli.command, Commands::Init) {
        return handlers::handle_init_command(&data_dir, formatter);
    }

    let mut ctx = handlers::HandlerContext::new(&data_dir)?;
    dispatch_command(cli.command, &mut ctx, &actor, formatter)
}

/// The data directory comes from `--data-dir`, falling back to the config
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    Ok(Config::load_or_default()?.storage.data_dir)
}

fn dispatch_command(
    command: Commands,
    ctx: &mut handlers::HandlerContext,
    actor: &Actor,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        Commands::Init => unreachable!("init is handled before the context is built"),
        Commands::Create {
            title,
            service_type,
            priority,
            bus,
            bus_number,
            fleet_number,
            chassis_number,
            registration_number,
            model,
            manufacturer,
            year,
            description,
            issue,
            repair_category,
            vendor,
            estimated_cost,
        } => handlers::handle_create_command(
            ctx,
            actor,
            handlers::CreateParams {
                title,
                service_type,
                priority,
                bus_preset: bus,
                bus_number,
                fleet_number,
                chassis_number,
                registration_number,
                model,
                manufacturer,
                year,
                description,
                issue,
                repair_category,
                vendor,
                estimated_cost,
            },
            formatter,
        ),
        Commands::Approve { ticket } => {
            handlers::handle_approve_command(ctx, actor, &ticket, formatter)
        },
        Commands::Reject { ticket, reason } => {
            handlers::handle_reject_command(ctx, actor, &ticket, &reason, formatter)
        },
        Commands::Acknowledge { ticket } => {
            handlers::handle_acknowledge_command(ctx, actor, &ticket, formatter)
        },
        Commands::Quote { command } => dispatch_quote_command(command, ctx, actor, formatter),
        Commands::StartService { ticket } => {
            handlers::handle_start_service_command(ctx, actor, &ticket, formatter)
        },
        Commands::Invoice {
            ticket,
            amount,
            description,
        } => handlers::handle_invoice_command(ctx, actor, &ticket, amount, description, formatter),
        Commands::Repair { command } => dispatch_repair_command(command, ctx, actor, formatter),
        Commands::Complete { ticket } => {
            handlers::handle_complete_command(ctx, actor, &ticket, formatter)
        },
        Commands::Note { ticket, text } => {
            handlers::handle_note_command(ctx, actor, &ticket, &text, formatter)
        },
        Commands::OverrideStatus {
            ticket,
            status,
            reason,
        } => handlers::handle_override_status_command(
            ctx, actor, &ticket, status, &reason, formatter,
        ),
        Commands::List {
            status,
            vendor,
            bus,
            since,
            until,
        } => handlers::handle_list_command(
            ctx,
            actor,
            handlers::ListFilters {
                status,
                vendor,
                bus,
                since,
                until,
            },
            formatter,
        ),
        Commands::Show { ticket } => handlers::handle_show_command(ctx, &ticket, formatter),
        Commands::Summary => handlers::handle_summary_command(ctx, actor, formatter),
        Commands::Bus { command } => dispatch_bus_command(command, ctx, formatter),
        Commands::Vendor { command } => dispatch_vendor_command(command, ctx, formatter),
    }
}

fn dispatch_quote_command(
    command: QuoteCommands,
    ctx: &mut handlers::HandlerContext,
    actor: &Actor,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        QuoteCommands::Submit {
            ticket,
            amount,
            description,
        } => handlers::handle_quote_submit_command(
            ctx, actor, &ticket, amount, description, formatter,
        ),
        QuoteCommands::Approve { ticket } => {
            handlers::handle_quote_approve_command(ctx, actor, &ticket, formatter)
        },
        QuoteCommands::Reject { ticket, reason } => {
            handlers::handle_quote_reject_command(ctx, actor, &ticket, &reason, formatter)
        },
    }
}

fn dispatch_repair_command(
    command: RepairCommands,
    ctx: &mut handlers::HandlerContext,
    actor: &Actor,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        RepairCommands::Request {
            ticket,
            description,
            estimated_cost,
            invoice_amount,
            invoice_description,
        } => {
            let invoice = invoice_amount.zip(invoice_description);
            handlers::handle_repair_request_command(
                ctx,
                actor,
                &ticket,
                description,
                estimated_cost,
                invoice,
                formatter,
            )
        },
        RepairCommands::Approve { ticket, repair } => {
            handlers::handle_repair_approve_command(ctx, actor, &ticket, &repair, formatter)
        },
    }
}

fn dispatch_bus_command(
    command: BusCommands,
    ctx: &mut handlers::HandlerContext,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        BusCommands::Add {
            bus_number,
            fleet_number,
            chassis_number,
            registration_number,
            model,
            manufacturer,
            year,
            engine_service_interval,
            tyre_service_interval,
            ac_service_interval,
            transmission_service_interval,
            brake_pad_service_interval,
        } => handlers::handle_bus_add_command(
            ctx,
            handlers::BusAddParams {
                bus_number,
                fleet_number,
                chassis_number,
                registration_number,
                model,
                manufacturer,
                year,
                engine_service_interval,
                tyre_service_interval,
                ac_service_interval,
                transmission_service_interval,
                brake_pad_service_interval,
            },
            formatter,
        ),
        BusCommands::List => handlers::handle_bus_list_command(ctx, formatter),
    }
}

fn dispatch_vendor_command(
    command: VendorCommands,
    ctx: &mut handlers::HandlerContext,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        VendorCommands::Add {
            name,
            email,
            contact_person,
            phone,
        } => handlers::handle_vendor_add_command(
            ctx,
            fleet_ticket::core::NewVendor {
                name,
                email,
                contact_person,
                phone,
            },
            formatter,
        ),
        VendorCommands::List => handlers::handle_vendor_list_command(ctx, formatter),
    }
}

/// Handle errors and display them to the user
///
/// Formats the main error message, any suggestions for fixing it, and a
/// JSON rendition when `--json` is active.
fn handle_error(error: &fleet_ticket::error::FleetTicketError, formatter: &OutputFormatter) {
    formatter.error(&error.user_message());

    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        for suggestion in &suggestions {
            formatter.info(&format!("  hint: {suggestion}"));
        }
    }

    if formatter.is_json() {
        let _ = formatter.print_json(&serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "suggestions": suggestions,
            "recoverable": error.is_recoverable(),
        }));
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}
