//! The ticket aggregate and its attached entities
//!
//! A [`Ticket`] exclusively owns its [`Quotation`], [`Invoice`], and
//! [`RepairRequest`] entries (strict tree, no sharing). All workflow state
//! changes go through the lifecycle engine; this module only defines the
//! shapes and small invariant-preserving mutators the engine uses.

use super::{BusDetails, InvoiceId, RepairRequestId, TicketId, TicketStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of work a ticket asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Minor,
    Major,
    Repair,
    Other,
}

impl ServiceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Repair => "repair",
            Self::Other => "other",
        }
    }

    /// Repair and other tickets must describe the problem themselves;
    /// minor/major services get templated text.
    #[must_use]
    pub const fn requires_description(self) -> bool {
        matches!(self, Self::Repair | Self::Other)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = crate::error::FleetTicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            "repair" => Ok(Self::Repair),
            "other" => Ok(Self::Other),
            _ => Err(crate::error::FleetTicketError::custom(format!(
                "Invalid service type: {s}. Must be one of: minor, major, repair, other"
            ))),
        }
    }
}

/// Category of a repair ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairCategory {
    Electrical,
    Mechanical,
    AcRepair,
    Engine,
    Body,
    BatteryReplacement,
    TyreReplacement,
}

impl RepairCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electrical => "electrical",
            Self::Mechanical => "mechanical",
            Self::AcRepair => "ac_repair",
            Self::Engine => "engine",
            Self::Body => "body",
            Self::BatteryReplacement => "battery_replacement",
            Self::TyreReplacement => "tyre_replacement",
        }
    }

    /// Battery and tyre replacements go to specialist shops, so the vendor
    /// must be chosen manually instead of derived from the manufacturer.
    #[must_use]
    pub const fn requires_manual_vendor(self) -> bool {
        matches!(self, Self::BatteryReplacement | Self::TyreReplacement)
    }
}

impl fmt::Display for RepairCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepairCategory {
    type Err = crate::error::FleetTicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "electrical" => Ok(Self::Electrical),
            "mechanical" => Ok(Self::Mechanical),
            "ac_repair" => Ok(Self::AcRepair),
            "engine" => Ok(Self::Engine),
            "body" => Ok(Self::Body),
            "battery_replacement" => Ok(Self::BatteryReplacement),
            "tyre_replacement" => Ok(Self::TyreReplacement),
            _ => Err(crate::error::FleetTicketError::custom(format!(
                "Invalid repair category: {s}. Must be one of: electrical, mechanical, ac_repair, \
                 engine, body, battery_replacement, tyre_replacement"
            ))),
        }
    }
}

/// Informational urgency; no workflow effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = crate::error::FleetTicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(crate::error::FleetTicketError::custom(format!(
                "Invalid priority: {s}. Must be one of: low, medium, high"
            ))),
        }
    }
}

/// Status of the single quotation slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
    Pending,
    Approved,
    Rejected,
}

/// A vendor's proposed price and scope for a ticket
///
/// Approval and rejection mutate the quotation in place so the amount and
/// description history is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub amount: f64,
    pub description: String,
    pub status: QuotationStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_reason: Option<String>,
}

impl Quotation {
    #[must_use]
    pub fn new(amount: f64, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
            status: QuotationStatus::Pending,
            submitted_at: Utc::now(),
            approved_by: None,
            approved_at: None,
            rejected_reason: None,
        }
    }

    /// Mark approved, stamping the approver once
    pub fn approve(&mut self, approver: impl Into<String>) {
        self.status = QuotationStatus::Approved;
        self.approved_by = Some(approver.into());
        self.approved_at = Some(Utc::now());
    }

    /// Mark rejected with a reason
    pub fn reject(&mut self, reason: impl Into<String>) {
        self.status = QuotationStatus::Rejected;
        self.rejected_reason = Some(reason.into());
    }
}

/// The vendor's billing record for completed work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub amount: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Invoice {
    #[must_use]
    pub fn new(amount: f64, description: impl Into<String>) -> Self {
        Self {
            id: InvoiceId::new(),
            amount,
            description: description.into(),
            created_at: Utc::now(),
            paid_at: None,
        }
    }
}

/// A vendor-initiated request for additional, unplanned work
///
/// Created pending; approved by a supervisor; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairRequest {
    pub id: RepairRequestId,
    pub description: String,
    pub estimated_cost: f64,
    pub approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RepairRequest {
    #[must_use]
    pub fn new(description: impl Into<String>, estimated_cost: f64) -> Self {
        Self {
            id: RepairRequestId::new(),
            description: description.into(),
            estimated_cost,
            approved: false,
            approved_by: None,
            approved_at: None,
            created_at: Utc::now(),
        }
    }

    /// Mark approved, stamping the approver; siblings are unaffected
    pub fn approve(&mut self, approver: impl Into<String>) {
        self.approved = true;
        self.approved_by = Some(approver.into());
        self.approved_at = Some(Utc::now());
    }
}

/// A maintenance/repair work item tracked from creation to completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub service_type: ServiceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repair_category: Option<RepairCategory>,
    pub priority: Priority,
    pub created_by: String,
    pub assigned_vendor: String,
    pub bus: BusDetails,
    pub created_at: DateTime<Utc>,
    /// Bumped on every successful write; the optimistic-concurrency token
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub under_service_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotation: Option<Quotation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repair_requests: Vec<RepairRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<Invoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_reason: Option<String>,
}

impl Ticket {
    /// Bump the concurrency token; called by the engine before every save
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Append a free-text note; the out-of-band annotation channel
    pub fn push_note(&mut self, text: impl Into<String>) {
        self.notes.push(text.into());
    }

    /// Look up a repair request by id
    #[must_use]
    pub fn repair_request(&self, id: &RepairRequestId) -> Option<&RepairRequest> {
        self.repair_requests.iter().find(|r| &r.id == id)
    }

    /// Mutable lookup used by the approval path
    pub fn repair_request_mut(&mut self, id: &RepairRequestId) -> Option<&mut RepairRequest> {
        self.repair_requests.iter_mut().find(|r| &r.id == id)
    }
}
