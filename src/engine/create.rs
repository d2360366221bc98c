//! Ticket creation
//!
//! Creation is the only validated entry point into the store. Required
//! fields depend on the service type; minor/major services get templated
//! description and issue text, while repair/other tickets must spell the
//! problem out. The bus is deep-snapshotted from the chosen preset (or
//! taken from manual fields), so later catalog edits never change existing
//! tickets.

use super::{TicketEngine, select_vendor};
use crate::core::{
    Actor, BusDetails, Priority, RepairCategory, Role, ServiceType, Ticket, TicketBuilder,
    TicketId,
};
use crate::error::{FleetTicketError, Result};

/// How the bus on a new ticket is chosen
#[derive(Debug, Clone)]
pub enum BusSelection {
    /// Snapshot a catalogued preset by bus number
    Preset { bus_number: String },
    /// Manually entered details; `issue` is filled separately
    Manual(Box<BusDetails>),
}

/// Input for `create_ticket`
#[derive(Debug, Clone)]
pub struct NewTicketInput {
    pub title: String,
    pub service_type: ServiceType,
    pub priority: Priority,
    pub bus: BusSelection,
    /// Required for repair/other; templated for minor/major when absent
    pub description: Option<String>,
    /// Required for repair/other; templated for minor/major when absent
    pub issue: Option<String>,
    /// Required when `service_type` is repair
    pub repair_category: Option<RepairCategory>,
    /// Explicit vendor email; auto-derived from the manufacturer when absent
    pub vendor: Option<String>,
    pub estimated_cost: Option<f64>,
}

impl TicketEngine {
    /// Create a ticket in `pending` status
    ///
    /// Validation failures enumerate every missing field at once and
    /// persist nothing. Creation is open to creators and to supervisors
    /// (who file spawned repair tickets and back-office requests).
    pub fn create_ticket(&self, actor: &Actor, input: NewTicketInput) -> Result<Ticket> {
        if !matches!(actor.role, Role::Creator | Role::Supervisor) {
            return Err(FleetTicketError::PermissionDenied {
                operation: "create_ticket",
                reason: format!("requires the creator or supervisor role, actor is {}", actor.role),
            });
        }

        let mut missing = Vec::new();
        if input.title.trim().is_empty() {
            missing.push("title".to_string());
        }

        // Resolve the bus before field validation so manual-entry gaps are
        // reported together with everything else.
        let bus = match &input.bus {
            BusSelection::Preset { bus_number } => {
                let preset = self.bus_store().find(bus_number)?.ok_or_else(|| {
                    FleetTicketError::BusPresetNotFound {
                        bus_number: bus_number.clone(),
                    }
                })?;
                preset.to_details(String::new())
            },
            BusSelection::Manual(details) => {
                if details.bus_number.trim().is_empty() {
                    missing.push("bus_number".to_string());
                }
                if details.model.trim().is_empty() {
                    missing.push("model".to_string());
                }
                if details.manufacturer.trim().is_empty() {
                    missing.push("manufacturer".to_string());
                }
                if details.year.trim().is_empty() {
                    missing.push("year".to_string());
                }
                (**details).clone()
            },
        };

        let service_type = input.service_type;
        let description = if service_type.requires_description() {
            match input.description.as_deref().map(str::trim) {
                Some(d) if !d.is_empty() => d.to_string(),
                _ => {
                    missing.push("description".to_string());
                    String::new()
                },
            }
        } else {
            input.description.filter(|d| !d.trim().is_empty()).unwrap_or_else(|| {
                format!("{service_type} service for bus {}", bus.bus_number)
            })
        };

        let issue = if service_type.requires_description() {
            match input.issue.as_deref().map(str::trim) {
                Some(i) if !i.is_empty() => i.to_string(),
                _ => {
                    missing.push("issue".to_string());
                    String::new()
                },
            }
        } else {
            input
                .issue
                .filter(|i| !i.trim().is_empty())
                .unwrap_or_else(|| format!("{service_type} service"))
        };

        if service_type == ServiceType::Repair && input.repair_category.is_none() {
            missing.push("repair_category".to_string());
        }

        // An explicitly chosen vendor must be catalogued
        if let Some(email) = &input.vendor {
            if self.vendor_store().find_by_email(email)?.is_none() {
                return Err(FleetTicketError::VendorNotFound {
                    email: email.clone(),
                });
            }
        }

        let manual_vendor_required = input
            .repair_category
            .is_some_and(RepairCategory::requires_manual_vendor);
        let vendor = if manual_vendor_required {
            input.vendor.clone()
        } else {
            match input.vendor.clone() {
                Some(v) => Some(v),
                None => {
                    let catalog = self.vendor_store().list()?;
                    select_vendor(&bus.manufacturer, &catalog).map(|v| v.email.clone())
                },
            }
        };
        let Some(vendor) = vendor else {
            missing.push("vendor".to_string());
            return Err(FleetTicketError::Validation { fields: missing });
        };

        if !missing.is_empty() {
            return Err(FleetTicketError::Validation { fields: missing });
        }

        let mut bus = bus;
        bus.issue = issue;

        let ticket = TicketBuilder::new()
            .id(TicketId::new())
            .title(input.title)
            .description(description)
            .service_type(service_type)
            .repair_category(input.repair_category)
            .priority(input.priority)
            .created_by(actor.email.clone())
            .assigned_vendor(vendor)
            .bus(bus)
            .estimated_cost(input.estimated_cost)
            .build();

        self.ticket_store().save(&ticket)?;
        tracing::info!(
            "Ticket created - '{}' ({}) for bus {}",
            ticket.title,
            ticket.id.short(),
            ticket.bus.bus_number
        );
        Ok(ticket)
    }
}
