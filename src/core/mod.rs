//! Core domain model
//!
//! The data model for the maintenance workflow: the [`Ticket`] aggregate
//! with its attached [`Quotation`], [`Invoice`], and [`RepairRequest`]
//! entities, the [`TicketStatus`] lifecycle set, the bus/vendor reference
//! types, and the actors that operate on them.

mod actor;
mod builders;
mod bus;
mod id;
mod status;
mod ticket;
mod vendor;

pub use actor::{Actor, Role};
pub use builders::TicketBuilder;
pub use bus::{BusDetails, BusPreset};
pub use id::{InvoiceId, RepairRequestId, TicketId, VendorId};
pub use status::TicketStatus;
pub use ticket::{
    Invoice, Priority, Quotation, QuotationStatus, RepairCategory, RepairRequest, ServiceType,
    Ticket,
};
pub use vendor::{NewVendor, Vendor};
