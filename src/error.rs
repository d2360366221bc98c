//! Error types for fleet-ticket
//!
//! All fallible operations in the crate return [`Result`], and every failure
//! is a typed [`FleetTicketError`] variant. Lifecycle operations guarantee
//! that a returned error means the store was left untouched.

use crate::core::TicketStatus;
use thiserror::Error;

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FleetTicketError>;

/// The error taxonomy for the ticket workflow
#[derive(Debug, Error)]
pub enum FleetTicketError {
    /// Required fields were missing or malformed at ticket creation
    #[error("validation failed, missing: {}", fields.join(", "))]
    Validation {
        /// Names of the offending fields
        fields: Vec<String>,
    },

    /// The actor's role or identity does not permit the operation
    #[error("permission denied for '{operation}': {reason}")]
    PermissionDenied {
        operation: &'static str,
        reason: String,
    },

    /// The operation is not legal from the ticket's current status
    #[error("'{operation}' is not allowed while the ticket is '{status}'")]
    InvalidTransition {
        operation: &'static str,
        status: TicketStatus,
    },

    /// Referenced ticket does not exist
    #[error("ticket not found: {id}")]
    TicketNotFound { id: String },

    /// Referenced repair request does not exist on the ticket
    #[error("repair request not found: {id}")]
    RepairRequestNotFound { id: String },

    /// Referenced bus preset does not exist in the catalog
    #[error("bus preset not found: {bus_number}")]
    BusPresetNotFound { bus_number: String },

    /// Referenced vendor does not exist in the catalog
    #[error("vendor not found: {email}")]
    VendorNotFound { email: String },

    /// A bus preset with this number is already catalogued
    #[error("bus {bus_number} already exists")]
    DuplicateBusNumber { bus_number: String },

    /// IO error during storage access
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// Configuration loading failure
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Catch-all for errors that do not fit the taxonomy
    #[error("{0}")]
    Custom(String),
}

impl FleetTicketError {
    /// Create a custom error from any displayable message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// User-facing message for CLI display
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Actionable suggestions shown alongside the error
    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation { fields } => fields
                .iter()
                .map(|f| format!("Provide a value for '{f}'"))
                .collect(),
            Self::PermissionDenied { .. } => vec![
                "Check the --actor and --role flags".to_string(),
                "Vendor operations require the ticket's assigned vendor".to_string(),
            ],
            Self::InvalidTransition { status, .. } => vec![format!(
                "Run 'fleet-ticket show <ticket>' to see which operations are legal from '{status}'"
            )],
            Self::TicketNotFound { .. } => {
                vec!["Run 'fleet-ticket list' to see known tickets".to_string()]
            },
            Self::BusPresetNotFound { .. } => {
                vec!["Run 'fleet-ticket bus list' to see the catalog".to_string()]
            },
            Self::VendorNotFound { .. } => {
                vec!["Run 'fleet-ticket vendor list' to see registered vendors".to_string()]
            },
            Self::DuplicateBusNumber { .. } => {
                vec!["Bus numbers are unique; pick a different one".to_string()]
            },
            _ => Vec::new(),
        }
    }

    /// Whether retrying the operation with corrected input can succeed
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Serialization(_) | Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_fields() {
        let err = FleetTicketError::Validation {
            fields: vec!["repair_category".to_string(), "issue".to_string()],
        };
        assert!(err.to_string().contains("repair_category"));
        assert!(err.to_string().contains("issue"));
        assert_eq!(err.suggestions().len(), 2);
    }

    #[test]
    fn test_invalid_transition_message_names_status() {
        let err = FleetTicketError::InvalidTransition {
            operation: "approve_ticket",
            status: TicketStatus::Completed,
        };
        assert!(err.to_string().contains("completed"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_io_errors_are_not_recoverable() {
        let err = FleetTicketError::Io(std::io::Error::other("disk gone"));
        assert!(!err.is_recoverable());
    }
}
