//! Vendor auto-assignment
//!
//! Buses are serviced by the manufacturer's workshop unless the repair
//! category mandates a manual choice. The match is a case-insensitive
//! substring of the manufacturer inside the vendor name; the first hit in
//! catalog order wins.

use crate::core::Vendor;

/// Pick the vendor responsible for a manufacturer, if any
#[must_use]
pub fn select_vendor<'a>(bus_manufacturer: &str, vendors: &'a [Vendor]) -> Option<&'a Vendor> {
    if bus_manufacturer.is_empty() {
        return None;
    }
    let needle = bus_manufacturer.to_lowercase();
    vendors
        .iter()
        .find(|v| v.name.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NewVendor, Vendor};

    fn vendor(name: &str, email: &str) -> Vendor {
        Vendor::from_input(NewVendor {
            name: name.to_string(),
            email: email.to_string(),
            contact_person: None,
            phone: None,
        })
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let vendors = vec![
            vendor("Scania Workshop", "scania@example.com"),
            vendor("Volvo Truck & Bus Service", "volvo@example.com"),
        ];

        let selected = select_vendor("volvo", &vendors).unwrap();
        assert_eq!(selected.email, "volvo@example.com");

        let selected = select_vendor("SCANIA", &vendors).unwrap();
        assert_eq!(selected.email, "scania@example.com");
    }

    #[test]
    fn test_first_catalog_hit_wins() {
        let vendors = vec![
            vendor("Volvo South Depot", "south@example.com"),
            vendor("Volvo North Depot", "north@example.com"),
        ];
        assert_eq!(
            select_vendor("Volvo", &vendors).unwrap().email,
            "south@example.com"
        );
    }

    #[test]
    fn test_no_match_yields_none() {
        let vendors = vec![vendor("Scania Workshop", "scania@example.com")];
        assert!(select_vendor("Mercedes", &vendors).is_none());
        assert!(select_vendor("", &vendors).is_none());
    }
}
