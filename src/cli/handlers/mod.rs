//! Command handlers
//!
//! One module per command group; all handlers share [`HandlerContext`].

mod catalog;
mod common;
mod create;
mod init;
mod lifecycle;
mod list;

pub use catalog::{
    BusAddParams, handle_bus_add_command, handle_bus_list_command, handle_vendor_add_command,
    handle_vendor_list_command,
};
pub use common::{HandlerContext, resolve_actor};
pub use create::{CreateParams, handle_create_command};
pub use init::handle_init_command;
pub use lifecycle::{
    handle_acknowledge_command, handle_approve_command, handle_complete_command,
    handle_invoice_command, handle_note_command, handle_override_status_command,
    handle_quote_approve_command, handle_quote_reject_command, handle_quote_submit_command,
    handle_reject_command, handle_repair_approve_command, handle_repair_request_command,
    handle_start_service_command,
};
pub use list::{ListFilters, handle_list_command, handle_show_command, handle_summary_command};
