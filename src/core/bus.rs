//! Bus reference data
//!
//! [`BusPreset`] is a catalog entry describing a fleet vehicle's static
//! attributes and service intervals. [`BusDetails`] is the per-ticket
//! snapshot taken from a preset (or entered manually) at creation time;
//! later preset edits never change existing tickets.

use serde::{Deserialize, Serialize};

/// Bus attributes embedded in a ticket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusDetails {
    pub bus_number: String,
    #[serde(default)]
    pub fleet_number: String,
    #[serde(default)]
    pub chassis_number: String,
    #[serde(default)]
    pub registration_number: String,
    pub model: String,
    pub manufacturer: String,
    pub year: String,
    /// What is wrong with (or scheduled for) the bus
    pub issue: String,
    #[serde(default)]
    pub engine_service_interval: u32,
    #[serde(default)]
    pub tyre_service_interval: u32,
    #[serde(default)]
    pub ac_service_interval: u32,
    #[serde(default)]
    pub transmission_service_interval: u32,
    #[serde(default)]
    pub brake_pad_service_interval: u32,
}

/// A catalog entry for a fleet vehicle, keyed uniquely by `bus_number`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusPreset {
    pub bus_number: String,
    #[serde(default)]
    pub fleet_number: String,
    #[serde(default)]
    pub chassis_number: String,
    #[serde(default)]
    pub registration_number: String,
    pub model: String,
    pub manufacturer: String,
    pub year: String,
    #[serde(default)]
    pub engine_service_interval: u32,
    #[serde(default)]
    pub tyre_service_interval: u32,
    #[serde(default)]
    pub ac_service_interval: u32,
    #[serde(default)]
    pub transmission_service_interval: u32,
    #[serde(default)]
    pub brake_pad_service_interval: u32,
}

impl BusPreset {
    /// Deep-copy the preset into a ticket snapshot with the given issue text
    #[must_use]
    pub fn to_details(&self, issue: impl Into<String>) -> BusDetails {
        BusDetails {
            bus_number: self.bus_number.clone(),
            fleet_number: self.fleet_number.clone(),
            chassis_number: self.chassis_number.clone(),
            registration_number: self.registration_number.clone(),
            model: self.model.clone(),
            manufacturer: self.manufacturer.clone(),
            year: self.year.clone(),
            issue: issue.into(),
            engine_service_interval: self.engine_service_interval,
            tyre_service_interval: self.tyre_service_interval,
            ac_service_interval: self.ac_service_interval,
            transmission_service_interval: self.transmission_service_interval,
            brake_pad_service_interval: self.brake_pad_service_interval,
        }
    }
}
