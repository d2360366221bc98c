//! Shared handler context
//!
//! Every command handler works through [`HandlerContext`]: file storage
//! rooted at the resolved data directory, the engine wired to it, and a
//! subscription to the notification intents the engine emits, drained and
//! echoed after each successful operation.

use crate::cli::OutputFormatter;
use crate::core::{Actor, Role};
use crate::engine::TicketEngine;
use crate::error::{FleetTicketError, Result};
use crate::events::{Notification, NotificationService, Notifier};
use crate::storage::FileStorage;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Common context for all handler operations
pub struct HandlerContext {
    pub engine: TicketEngine,
    pub storage: FileStorage,
    notifications: broadcast::Receiver<Notification>,
}

impl HandlerContext {
    /// Open the data directory and wire up the engine
    ///
    /// Fails when the directory has not been initialized; `init` is the
    /// only command that may run first.
    pub fn new(data_dir: &Path) -> Result<Self> {
        let storage = FileStorage::new(data_dir);
        if !storage.is_initialized() {
            return Err(FleetTicketError::custom(format!(
                "Data directory {} not initialized. Run 'fleet-ticket init' first.",
                data_dir.display()
            )));
        }

        let service: Arc<NotificationService> =
            crate::events::notifications().unwrap_or_else(crate::events::init_notifications);
        let notifications = service.subscribe();

        let notifier: Arc<dyn Notifier> = service;
        let storage_arc = Arc::new(storage.clone());
        let engine = TicketEngine::new(
            storage_arc.clone(),
            storage_arc.clone(),
            storage_arc,
            notifier,
        );

        Ok(Self {
            engine,
            storage,
            notifications,
        })
    }

    /// Echo the notification intents emitted since the last drain
    pub fn drain_notifications(&mut self, output: &OutputFormatter) {
        while let Ok(notification) = self.notifications.try_recv() {
            output.info(&format!(
                "  notify {}: {} on ticket {}",
                notification.recipient,
                notification.kind,
                notification.ticket_id.short()
            ));
        }
    }
}

/// Build the acting identity from the global flags
///
/// Without `--actor`/`--role` the caller runs as an anonymous guest, which
/// every gated operation rejects and the visibility resolver maps to an
/// empty view.
#[must_use]
pub fn resolve_actor(actor: Option<&str>, role: Option<Role>) -> Actor {
    match (actor, role) {
        (Some(email), Some(role)) => Actor::new(email, role),
        (Some(email), None) => Actor::new(email, Role::Guest),
        (None, role) => Actor::new("anonymous", role.unwrap_or(Role::Guest)),
    }
}
