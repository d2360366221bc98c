//! File-based storage backend
//!
//! Tickets are stored one YAML file per ticket under `<root>/tickets/`, the
//! bus and vendor catalogs as `buses.yaml` and `vendors.yaml` at the root.
//! Every write goes to a temp file first and is renamed into place, so an
//! interrupted write leaves the previous snapshot intact.

use super::{BusPresetRepository, TicketRepository, VendorRepository};
use crate::core::{BusPreset, Ticket, TicketId, Vendor};
use crate::error::{FleetTicketError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Storage rooted at a data directory (by default `.fleet-ticket`)
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Point at a data directory; does not touch the filesystem yet
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the directory layout if it does not exist
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.tickets_dir())?;
        Ok(())
    }

    /// Whether the data directory has been initialized
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.tickets_dir().is_dir()
    }

    /// The data directory root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn tickets_dir(&self) -> PathBuf {
        self.root.join("tickets")
    }

    fn ticket_path(&self, id: &TicketId) -> PathBuf {
        self.tickets_dir().join(format!("{id}.yaml"))
    }

    fn buses_path(&self) -> PathBuf {
        self.root.join("buses.yaml")
    }

    fn vendors_path(&self) -> PathBuf {
        self.root.join("vendors.yaml")
    }

    /// Write via temp file + rename so readers never observe a torn file
    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| FleetTicketError::custom("storage path has no parent"))?;
        fs::create_dir_all(parent)?;
        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn read_catalog<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    fn write_catalog<T: serde::Serialize>(&self, path: &Path, entries: &[T]) -> Result<()> {
        let content = serde_yaml::to_string(entries)?;
        self.write_atomic(path, &content)
    }
}

impl TicketRepository for FileStorage {
    fn save(&self, ticket: &Ticket) -> Result<()> {
        let content = serde_yaml::to_string(ticket)?;
        self.write_atomic(&self.ticket_path(&ticket.id), &content)
    }

    fn load(&self, id: &TicketId) -> Result<Ticket> {
        let path = self.ticket_path(id);
        if !path.exists() {
            return Err(FleetTicketError::TicketNotFound { id: id.to_string() });
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    fn load_all(&self) -> Result<Vec<Ticket>> {
        let dir = self.tickets_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut tickets = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "yaml") {
                let content = fs::read_to_string(&path)?;
                tickets.push(serde_yaml::from_str(&content)?);
            }
        }
        tickets.sort_by(|a: &Ticket, b: &Ticket| a.created_at.cmp(&b.created_at));
        Ok(tickets)
    }
}

impl BusPresetRepository for FileStorage {
    fn add(&self, preset: &BusPreset) -> Result<()> {
        let mut presets: Vec<BusPreset> = self.read_catalog(&self.buses_path())?;
        if presets.iter().any(|b| b.bus_number == preset.bus_number) {
            return Err(FleetTicketError::DuplicateBusNumber {
                bus_number: preset.bus_number.clone(),
            });
        }
        presets.push(preset.clone());
        self.write_catalog(&self.buses_path(), &presets)
    }

    fn find(&self, bus_number: &str) -> Result<Option<BusPreset>> {
        let presets: Vec<BusPreset> = self.read_catalog(&self.buses_path())?;
        Ok(presets.into_iter().find(|b| b.bus_number == bus_number))
    }

    fn list(&self) -> Result<Vec<BusPreset>> {
        self.read_catalog(&self.buses_path())
    }
}

impl VendorRepository for FileStorage {
    fn add(&self, vendor: &Vendor) -> Result<()> {
        let mut vendors: Vec<Vendor> = self.read_catalog(&self.vendors_path())?;
        vendors.push(vendor.clone());
        self.write_catalog(&self.vendors_path(), &vendors)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Vendor>> {
        let vendors: Vec<Vendor> = self.read_catalog(&self.vendors_path())?;
        Ok(vendors.into_iter().find(|v| v.email == email))
    }

    fn list(&self) -> Result<Vec<Vendor>> {
        self.read_catalog(&self.vendors_path())
    }
}
