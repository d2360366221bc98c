//! In-memory storage backend
//!
//! Backs the engine in tests and embedded use. Each instance is fully
//! isolated, so tests never share catalog state.

use super::{BusPresetRepository, TicketRepository, VendorRepository};
use crate::core::{BusPreset, Ticket, TicketId, Vendor};
use crate::error::{FleetTicketError, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe in-memory implementation of all three repositories
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tickets: RwLock<HashMap<TicketId, Ticket>>,
    buses: RwLock<Vec<BusPreset>>,
    vendors: RwLock<Vec<Vendor>>,
}

impl MemoryStorage {
    /// Create an empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> FleetTicketError {
    FleetTicketError::custom("storage lock poisoned")
}

impl TicketRepository for MemoryStorage {
    fn save(&self, ticket: &Ticket) -> Result<()> {
        let mut tickets = self.tickets.write().map_err(|_| poisoned())?;
        tickets.insert(ticket.id.clone(), ticket.clone());
        Ok(())
    }

    fn load(&self, id: &TicketId) -> Result<Ticket> {
        let tickets = self.tickets.read().map_err(|_| poisoned())?;
        tickets
            .get(id)
            .cloned()
            .ok_or_else(|| FleetTicketError::TicketNotFound { id: id.to_string() })
    }

    fn load_all(&self) -> Result<Vec<Ticket>> {
        let tickets = self.tickets.read().map_err(|_| poisoned())?;
        let mut all: Vec<Ticket> = tickets.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }
}

impl BusPresetRepository for MemoryStorage {
    fn add(&self, preset: &BusPreset) -> Result<()> {
        let mut buses = self.buses.write().map_err(|_| poisoned())?;
        if buses.iter().any(|b| b.bus_number == preset.bus_number) {
            return Err(FleetTicketError::DuplicateBusNumber {
                bus_number: preset.bus_number.clone(),
            });
        }
        buses.push(preset.clone());
        Ok(())
    }

    fn find(&self, bus_number: &str) -> Result<Option<BusPreset>> {
        let buses = self.buses.read().map_err(|_| poisoned())?;
        Ok(buses.iter().find(|b| b.bus_number == bus_number).cloned())
    }

    fn list(&self) -> Result<Vec<BusPreset>> {
        let buses = self.buses.read().map_err(|_| poisoned())?;
        Ok(buses.clone())
    }
}

impl VendorRepository for MemoryStorage {
    fn add(&self, vendor: &Vendor) -> Result<()> {
        let mut vendors = self.vendors.write().map_err(|_| poisoned())?;
        vendors.push(vendor.clone());
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Vendor>> {
        let vendors = self.vendors.read().map_err(|_| poisoned())?;
        Ok(vendors.iter().find(|v| v.email == email).cloned())
    }

    fn list(&self) -> Result<Vec<Vendor>> {
        let vendors = self.vendors.read().map_err(|_| poisoned())?;
        Ok(vendors.clone())
    }
}
