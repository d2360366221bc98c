use crate::core::{BusPreset, Ticket, TicketId, Vendor};
use crate::error::Result;

/// Repository trait for ticket storage operations
///
/// This trait defines the interface for storing and retrieving tickets,
/// allowing for different storage implementations. Saving replaces the
/// whole snapshot; implementations must never leave a torn write behind.
pub trait TicketRepository: Send + Sync {
    /// Saves a ticket, replacing any previous snapshot with the same id
    fn save(&self, ticket: &Ticket) -> Result<()>;

    /// Loads a ticket by ID
    fn load(&self, id: &TicketId) -> Result<Ticket>;

    /// Loads all tickets
    fn load_all(&self) -> Result<Vec<Ticket>>;

    /// Checks if a ticket exists by ID
    fn exists(&self, id: &TicketId) -> Result<bool> {
        match self.load(id) {
            Ok(_) => Ok(true),
            Err(crate::error::FleetTicketError::TicketNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Finds tickets matching a predicate
    fn find(&self, predicate: &dyn Fn(&Ticket) -> bool) -> Result<Vec<Ticket>> {
        let tickets = self.load_all()?;
        Ok(tickets.into_iter().filter(|t| predicate(t)).collect())
    }
}

/// Repository trait for the bus preset catalog
///
/// The catalog is append-only and keyed uniquely by bus number.
pub trait BusPresetRepository: Send + Sync {
    /// Adds a preset; fails with `DuplicateBusNumber` if the number exists
    fn add(&self, preset: &BusPreset) -> Result<()>;

    /// Finds a preset by bus number
    fn find(&self, bus_number: &str) -> Result<Option<BusPreset>>;

    /// Lists the whole catalog
    fn list(&self) -> Result<Vec<BusPreset>>;
}

/// Repository trait for the vendor catalog
pub trait VendorRepository: Send + Sync {
    /// Registers a vendor
    fn add(&self, vendor: &Vendor) -> Result<()>;

    /// Finds a vendor by email
    fn find_by_email(&self, email: &str) -> Result<Option<Vendor>>;

    /// Lists all registered vendors
    fn list(&self) -> Result<Vec<Vendor>>;
}
