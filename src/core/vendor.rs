//! Vendor reference data

use super::VendorId;
use serde::{Deserialize, Serialize};

/// A registered service vendor
///
/// Vendors are matched to tickets by email; auto-assignment compares the
/// vendor name against the bus manufacturer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Input for registering a vendor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewVendor {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Vendor {
    /// Materialize a vendor from its registration input with a fresh id
    #[must_use]
    pub fn from_input(input: NewVendor) -> Self {
        Self {
            id: VendorId::new(),
            name: input.name,
            email: input.email,
            contact_person: input.contact_person.filter(|s| !s.is_empty()),
            phone: input.phone.filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_drops_empty_optionals() {
        let vendor = Vendor::from_input(NewVendor {
            name: "Volvo Service Co".to_string(),
            email: "service@volvo.example".to_string(),
            contact_person: Some(String::new()),
            phone: None,
        });
        assert!(vendor.contact_person.is_none());
        assert!(vendor.phone.is_none());
    }
}
