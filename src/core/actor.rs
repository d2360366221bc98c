//! Actors and roles
//!
//! Every engine operation is invoked on behalf of an [`Actor`]. Identity is
//! the actor's email; vendors are matched against `assigned_vendor` by it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Files service/repair tickets
    Creator,
    /// Approves or rejects tickets, quotations, and repair requests
    Supervisor,
    /// Performs the service: acknowledges, quotes, services, invoices
    Vendor,
    /// Tracks finalized costs and payment
    Purchase,
    /// Unauthenticated or unknown; sees nothing
    Guest,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Supervisor => "supervisor",
            Self::Vendor => "vendor",
            Self::Purchase => "purchase",
            Self::Guest => "guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::error::FleetTicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "creator" => Ok(Self::Creator),
            "supervisor" => Ok(Self::Supervisor),
            "vendor" => Ok(Self::Vendor),
            "purchase" => Ok(Self::Purchase),
            "guest" => Ok(Self::Guest),
            _ => Err(crate::error::FleetTicketError::custom(format!(
                "Invalid role: {s}. Must be one of: creator, supervisor, vendor, purchase, guest"
            ))),
        }
    }
}

/// The identity an operation runs as
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl Actor {
    /// Create an actor whose id equals its email
    #[must_use]
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        let email = email.into();
        Self {
            id: email.clone(),
            email,
            role,
        }
    }

    /// Anything but a guest counts as authenticated
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        !matches!(self.role, Role::Guest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("SUPERVISOR".parse::<Role>().unwrap(), Role::Supervisor);
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_guest_is_not_authenticated() {
        assert!(!Actor::new("x@example.com", Role::Guest).is_authenticated());
        assert!(Actor::new("x@example.com", Role::Purchase).is_authenticated());
    }
}
