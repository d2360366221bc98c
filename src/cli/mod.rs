//! Command-line interface
//!
//! The CLI is a thin shell over the lifecycle engine: each subcommand maps
//! to one engine operation, with the acting identity supplied through the
//! global `--actor`/`--role` flags.

pub mod handlers;
mod output;

pub use output::OutputFormatter;

use crate::core::{Priority, RepairCategory, RepairRequestId, Role, ServiceType, TicketId,
    TicketStatus};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Maintenance ticket workflow for bus fleets
#[derive(Parser)]
#[command(name = "fleet-ticket", version, about)]
pub struct Cli {
    /// Acting user's email
    #[arg(long, global = true, env = "FLEET_TICKET_ACTOR")]
    pub actor: Option<String>,

    /// Acting user's role (creator, supervisor, vendor, purchase)
    #[arg(long, global = true, env = "FLEET_TICKET_ROLE")]
    pub role: Option<Role>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Data directory (defaults to ./.fleet-ticket or the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the data directory
    Init,

    /// File a new service/repair ticket
    Create {
        /// Brief title describing the issue
        #[arg(long)]
        title: String,
        /// minor, major, repair, or other
        #[arg(long)]
        service_type: ServiceType,
        /// low, medium, or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Catalogued bus number to snapshot details from
        #[arg(long, conflicts_with = "bus_number")]
        bus: Option<String>,
        /// Manual bus entry: bus number
        #[arg(long)]
        bus_number: Option<String>,
        #[arg(long)]
        fleet_number: Option<String>,
        #[arg(long)]
        chassis_number: Option<String>,
        #[arg(long)]
        registration_number: Option<String>,
        /// Manual bus entry: model
        #[arg(long)]
        model: Option<String>,
        /// Manual bus entry: manufacturer
        #[arg(long)]
        manufacturer: Option<String>,
        /// Manual bus entry: year of manufacture
        #[arg(long)]
        year: Option<String>,
        /// Required for repair/other service types
        #[arg(long)]
        description: Option<String>,
        /// Required for repair/other service types
        #[arg(long)]
        issue: Option<String>,
        /// Required when service type is repair
        #[arg(long)]
        repair_category: Option<RepairCategory>,
        /// Vendor email; auto-derived from the manufacturer when omitted
        #[arg(long)]
        vendor: Option<String>,
        #[arg(long)]
        estimated_cost: Option<f64>,
    },

    /// Approve a pending ticket (supervisor)
    Approve { ticket: TicketId },

    /// Reject a pending ticket (supervisor)
    Reject {
        ticket: TicketId,
        #[arg(long)]
        reason: String,
    },

    /// Acknowledge an approved ticket (assigned vendor)
    Acknowledge { ticket: TicketId },

    /// Manage quotations
    Quote {
        #[command(subcommand)]
        command: QuoteCommands,
    },

    /// Start servicing a ticket with an approved quotation (assigned vendor)
    StartService { ticket: TicketId },

    /// Submit the invoice for a ticket (assigned vendor)
    Invoice {
        ticket: TicketId,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        description: String,
    },

    /// Manage additional repair requests
    Repair {
        #[command(subcommand)]
        command: RepairCommands,
    },

    /// Complete an invoiced ticket (supervisor or assigned vendor)
    Complete { ticket: TicketId },

    /// Append a note to a ticket
    Note { ticket: TicketId, text: String },

    /// Administrative status override with audit trail (supervisor)
    OverrideStatus {
        ticket: TicketId,
        #[arg(long)]
        status: TicketStatus,
        #[arg(long)]
        reason: String,
    },

    /// List the tickets visible to the actor
    List {
        #[arg(long)]
        status: Option<TicketStatus>,
        /// Filter by assigned vendor email
        #[arg(long)]
        vendor: Option<String>,
        /// Filter by bus number
        #[arg(long)]
        bus: Option<String>,
        /// Created on or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
        /// Created on or before this date (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,
    },

    /// Show one ticket in full
    Show { ticket: TicketId },

    /// Role dashboard counts for the actor
    Summary,

    /// Manage the bus preset catalog
    Bus {
        #[command(subcommand)]
        command: BusCommands,
    },

    /// Manage the vendor catalog
    Vendor {
        #[command(subcommand)]
        command: VendorCommands,
    },
}

#[derive(Subcommand)]
pub enum QuoteCommands {
    /// Submit a quotation for an acknowledged ticket (assigned vendor)
    Submit {
        ticket: TicketId,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        description: String,
    },
    /// Approve the submitted quotation (supervisor)
    Approve { ticket: TicketId },
    /// Reject the submitted quotation (supervisor)
    Reject {
        ticket: TicketId,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Subcommand)]
pub enum RepairCommands {
    /// Request additional repair work (assigned vendor)
    Request {
        ticket: TicketId,
        #[arg(long)]
        description: String,
        #[arg(long)]
        estimated_cost: f64,
        /// Also submit the invoice for the work already done
        #[arg(long, requires = "invoice_description")]
        invoice_amount: Option<f64>,
        #[arg(long, requires = "invoice_amount")]
        invoice_description: Option<String>,
    },
    /// Approve a pending repair request, spawning a follow-up ticket
    Approve {
        ticket: TicketId,
        repair: RepairRequestId,
    },
}

#[derive(Subcommand)]
pub enum BusCommands {
    /// Add a bus preset to the catalog
    Add {
        #[arg(long)]
        bus_number: String,
        #[arg(long, default_value = "")]
        fleet_number: String,
        #[arg(long, default_value = "")]
        chassis_number: String,
        #[arg(long, default_value = "")]
        registration_number: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        manufacturer: String,
        #[arg(long)]
        year: String,
        #[arg(long, default_value_t = 0)]
        engine_service_interval: u32,
        #[arg(long, default_value_t = 0)]
        tyre_service_interval: u32,
        #[arg(long, default_value_t = 0)]
        ac_service_interval: u32,
        #[arg(long, default_value_t = 0)]
        transmission_service_interval: u32,
        #[arg(long, default_value_t = 0)]
        brake_pad_service_interval: u32,
    },
    /// List the bus preset catalog
    List,
}

#[derive(Subcommand)]
pub enum VendorCommands {
    /// Register a vendor
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        contact_person: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// List registered vendors
    List,
}
