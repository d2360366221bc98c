//! Per-role ticket visibility
//!
//! The single read-authorization boundary: every "my tickets" listing and
//! every dashboard count goes through [`visible_to`], never through a
//! per-screen predicate.

use super::TicketEngine;
use crate::core::{Actor, Role, Ticket};
use crate::error::Result;

/// Whether `actor` may see `ticket`
///
/// Vendors see their assigned tickets once released (anything but
/// `pending`/`rejected`); creators see everything they filed; supervisors
/// see all; purchase sees invoiced and completed tickets; guests see none.
#[must_use]
pub fn visible_to(actor: &Actor, ticket: &Ticket) -> bool {
    match actor.role {
        Role::Vendor => {
            ticket.assigned_vendor == actor.email && ticket.status.vendor_visible()
        },
        Role::Creator => ticket.created_by == actor.email,
        Role::Supervisor => true,
        Role::Purchase => {
            use crate::core::TicketStatus::{Completed, Invoiced};
            matches!(ticket.status, Invoiced | Completed)
        },
        Role::Guest => false,
    }
}

impl TicketEngine {
    /// The subset of tickets the actor may see
    pub fn relevant_tickets(&self, actor: &Actor) -> Result<Vec<Ticket>> {
        self.ticket_store().find(&|t| visible_to(actor, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Actor, Role, TicketStatus};
    use crate::test_utils::TestEnv;

    #[test]
    fn test_vendor_sees_released_tickets_only() {
        let env = TestEnv::new();

        // pending, approved, completed - all assigned to the same vendor
        let pending = env.create_pending_ticket();
        let approved = env.create_pending_ticket();
        env.engine.approve_ticket(&env.supervisor, &approved.id).unwrap();
        let completed = env.completed_ticket();

        let visible = env.engine.relevant_tickets(&env.vendor_actor).unwrap();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|t| t.id != pending.id));
        assert!(visible.iter().any(|t| t.id == approved.id));
        assert!(visible.iter().any(|t| t.id == completed.id));
    }

    #[test]
    fn test_creator_sees_own_tickets_in_all_statuses() {
        let env = TestEnv::new();
        let mine = env.create_pending_ticket();
        env.engine
            .reject_ticket(&env.supervisor, &mine.id, "budget freeze")
            .unwrap();

        let visible = env.engine.relevant_tickets(&env.creator).unwrap();
        assert_eq!(visible.len(), 1);

        let stranger = Actor::new("someone-else@example.com", Role::Creator);
        assert!(env.engine.relevant_tickets(&stranger).unwrap().is_empty());
    }

    #[test]
    fn test_supervisor_sees_everything() {
        let env = TestEnv::new();
        env.create_pending_ticket();
        env.completed_ticket();

        assert_eq!(env.engine.relevant_tickets(&env.supervisor).unwrap().len(), 2);
    }

    #[test]
    fn test_purchase_sees_invoiced_and_completed() {
        let env = TestEnv::new();
        env.create_pending_ticket();
        let completed = env.completed_ticket();
        assert_eq!(completed.status, TicketStatus::Completed);

        let visible = env.engine.relevant_tickets(&env.purchase).unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, completed.id);
    }

    #[test]
    fn test_guest_sees_nothing() {
        let env = TestEnv::new();
        env.create_pending_ticket();
        env.completed_ticket();

        let guest = Actor::new("anon@example.com", Role::Guest);
        assert!(env.engine.relevant_tickets(&guest).unwrap().is_empty());
    }
}
