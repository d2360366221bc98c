//! Notification intents
//!
//! The lifecycle engine records *who should hear about what* after a
//! successful transition; actual delivery (toast, email, push) is an
//! external collaborator. The engine talks to the [`Notifier`] capability;
//! the default implementation fans intents out over a broadcast channel
//! that interested subscribers (the CLI, an embedding application) drain.

use crate::core::{Role, TicketId};
use std::sync::Arc;
use tokio::sync::broadcast;

#[cfg(test)]
use mockall::automock;

/// Who a notification is addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// A specific user, by email
    User(String),
    /// Everyone holding a role
    Role(Role),
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User(email) => f.write_str(email),
            Self::Role(role) => write!(f, "{role}s"),
        }
    }
}

/// Event kinds for workflow notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    TicketAcknowledged,
    QuotationApproved,
    QuotationRejected,
    ServiceStarted,
    InvoiceSubmitted,
    RepairRequested,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TicketAcknowledged => "ticket_acknowledged",
            Self::QuotationApproved => "quotation_approved",
            Self::QuotationRejected => "quotation_rejected",
            Self::ServiceStarted => "service_started",
            Self::InvoiceSubmitted => "invoice_submitted",
            Self::RepairRequested => "repair_requested",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outbound notification intent
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub recipient: Recipient,
    pub kind: NotificationKind,
    pub ticket_id: TicketId,
}

/// Outbound notification capability invoked by the engine
///
/// Implementations must not fail: a dropped notification never rolls back
/// the transition that produced it.
#[cfg_attr(test, automock)]
pub trait Notifier: Send + Sync {
    /// Record that `recipient` should be told about `kind` on `ticket_id`
    fn notify(&self, recipient: Recipient, kind: NotificationKind, ticket_id: TicketId);
}

/// Broadcast-backed notification service
pub struct NotificationService {
    sender: broadcast::Sender<Notification>,
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService")
            .field("sender", &"broadcast::Sender<Notification>")
            .finish()
    }
}

impl NotificationService {
    /// Create a new service
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Get a receiver for outbound intents
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotificationService {
    fn notify(&self, recipient: Recipient, kind: NotificationKind, ticket_id: TicketId) {
        tracing::info!("Notify {} - {} on {}", recipient, kind, ticket_id.short());
        let _ = self.sender.send(Notification {
            recipient,
            kind,
            ticket_id,
        });
    }
}

/// Notifier that discards every intent; for embedders that do not care
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _recipient: Recipient, _kind: NotificationKind, _ticket_id: TicketId) {}
}

/// Notifier that records every intent; for tests and audits
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    sent: std::sync::Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything recorded so far
    pub fn take(&self) -> Vec<Notification> {
        self.sent.lock().map(|mut s| std::mem::take(&mut *s)).unwrap_or_default()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, recipient: Recipient, kind: NotificationKind, ticket_id: TicketId) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(Notification {
                recipient,
                kind,
                ticket_id,
            });
        }
    }
}

/// Global notification service instance
#[cfg(not(test))]
static NOTIFICATIONS: once_cell::sync::OnceCell<Arc<NotificationService>> =
    once_cell::sync::OnceCell::new();

/// Global notification service instance for tests (allows replacement)
#[cfg(test)]
static NOTIFICATIONS: std::sync::RwLock<Option<Arc<NotificationService>>> =
    std::sync::RwLock::new(None);

/// Initialize the global notification service, returning it
pub fn init_notifications() -> Arc<NotificationService> {
    let service = Arc::new(NotificationService::new());

    #[cfg(not(test))]
    {
        NOTIFICATIONS
            .set(service.clone())
            .expect("Notifications already initialized");
    }

    #[cfg(test)]
    {
        let mut notifications = NOTIFICATIONS.write().unwrap();
        *notifications = Some(service.clone());
    }

    service
}

/// Get the global notification service
#[cfg(not(test))]
pub fn notifications() -> Option<Arc<NotificationService>> {
    NOTIFICATIONS.get().cloned()
}

/// Get the global notification service (test version)
#[cfg(test)]
pub fn notifications() -> Option<Arc<NotificationService>> {
    let notifications = NOTIFICATIONS.read().unwrap();
    notifications.clone()
}
