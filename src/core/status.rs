//! Ticket lifecycle statuses
//!
//! The status is the single source of truth for a ticket's workflow stage
//! and is only ever changed by the lifecycle engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of lifecycle statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Filed by a creator, awaiting supervisor approval
    Pending,
    /// Approved by a supervisor, awaiting vendor acknowledgement
    Approved,
    /// Rejected by a supervisor; terminal for the approval branch
    Rejected,
    /// Vendor has acknowledged the work
    Acknowledged,
    /// Vendor has submitted a quotation
    Quoted,
    /// Supervisor approved the quotation
    QuoteApproved,
    /// Supervisor rejected the quotation
    QuoteRejected,
    /// Vendor has started servicing the bus
    UnderService,
    /// Vendor has requested additional, unplanned repair work
    RepairRequested,
    /// Vendor has submitted an invoice
    Invoiced,
    /// Work finished and invoice settled; terminal
    Completed,
}

impl TicketStatus {
    /// Statuses in which a vendor may see the ticket at all
    ///
    /// Tickets still `pending` (or `rejected`) have not been released to
    /// the vendor yet.
    #[must_use]
    pub const fn vendor_visible(self) -> bool {
        !matches!(self, Self::Pending | Self::Rejected)
    }

    /// No further transitions are defined from a terminal status
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Canonical wire/display name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Acknowledged => "acknowledged",
            Self::Quoted => "quoted",
            Self::QuoteApproved => "quote_approved",
            Self::QuoteRejected => "quote_rejected",
            Self::UnderService => "under_service",
            Self::RepairRequested => "repair_requested",
            Self::Invoiced => "invoiced",
            Self::Completed => "completed",
        }
    }

    /// All statuses, in lifecycle order
    #[must_use]
    pub const fn all() -> [Self; 11] {
        [
            Self::Pending,
            Self::Approved,
            Self::Rejected,
            Self::Acknowledged,
            Self::Quoted,
            Self::QuoteApproved,
            Self::QuoteRejected,
            Self::UnderService,
            Self::RepairRequested,
            Self::Invoiced,
            Self::Completed,
        ]
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = crate::error::FleetTicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "acknowledged" => Ok(Self::Acknowledged),
            "quoted" => Ok(Self::Quoted),
            "quote_approved" => Ok(Self::QuoteApproved),
            "quote_rejected" => Ok(Self::QuoteRejected),
            "under_service" => Ok(Self::UnderService),
            "repair_requested" => Ok(Self::RepairRequested),
            "invoiced" => Ok(Self::Invoiced),
            "completed" => Ok(Self::Completed),
            _ => Err(crate::error::FleetTicketError::custom(format!(
                "Invalid status: {s}. Must be one of: pending, approved, rejected, acknowledged, \
                 quoted, quote_approved, quote_rejected, under_service, repair_requested, \
                 invoiced, completed"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        for status in TicketStatus::all() {
            let parsed: TicketStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_vendor_visibility_excludes_unreleased() {
        assert!(!TicketStatus::Pending.vendor_visible());
        assert!(!TicketStatus::Rejected.vendor_visible());
        assert!(TicketStatus::Approved.vendor_visible());
        assert!(TicketStatus::Invoiced.vendor_visible());
    }

    #[test]
    fn test_only_completed_is_terminal() {
        for status in TicketStatus::all() {
            assert_eq!(status.is_terminal(), status == TicketStatus::Completed);
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let yaml = serde_yaml::to_string(&TicketStatus::QuoteApproved).unwrap();
        assert_eq!(yaml.trim(), "quote_approved");
    }
}
