//! fleet-ticket - maintenance ticket workflow for bus fleets
//!
//! This crate models the full lifecycle of a fleet maintenance ticket:
//! - Creators file service/repair tickets against catalogued buses
//! - Supervisors approve or reject tickets, quotations, and repair requests
//! - Vendors acknowledge, quote, service, and invoice the work
//! - Purchase tracks finalized costs and payment
//!
//! The [`engine::TicketEngine`] is the only writer of workflow state: every
//! transition is role-gated, checked against the current status, and either
//! persisted as a whole snapshot or rejected with a typed error that leaves
//! the store untouched. Per-role read access goes through a single
//! visibility resolver, and successful transitions emit notification
//! intents whose delivery is left to the embedding application.

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
// Allow some pedantic lints that don't improve code quality
#![allow(clippy::option_if_let_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::single_match_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::redundant_clone)]
#![allow(clippy::map_unwrap_or)]

//! # Example
//!
//! ```rust,ignore
//! use fleet_ticket::core::{Actor, Role};
//! use fleet_ticket::engine::TicketEngine;
//! use fleet_ticket::events::NullNotifier;
//! use fleet_ticket::storage::MemoryStorage;
//! use std::sync::Arc;
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let engine = TicketEngine::new(
//!     storage.clone(),
//!     storage.clone(),
//!     storage,
//!     Arc::new(NullNotifier),
//! );
//!
//! let supervisor = Actor::new("supervisor@example.com", Role::Supervisor);
//! let ticket = engine.approve_ticket(&supervisor, &ticket_id)?;
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod events;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{FleetTicketError, Result};
