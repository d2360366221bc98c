//! Storage layer
//!
//! The ticket store and the bus/vendor reference catalogs, behind
//! repository traits so the engine (and tests) can be handed isolated
//! instances. Two backends: [`MemoryStorage`] and [`FileStorage`].

mod file;
mod memory;
mod repository;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use repository::{BusPresetRepository, TicketRepository, VendorRepository};
