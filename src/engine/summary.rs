//! Per-role dashboard counts
//!
//! Every figure is derived from the tickets the visibility resolver hands
//! the actor (plus, for purchase, the fleet-wide spend), so the dashboard
//! can never leak a ticket the role would not see in a listing.

use super::TicketEngine;
use crate::core::{Actor, Role, TicketStatus};
use crate::error::Result;
use serde::Serialize;

/// Dashboard counts for one actor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleSummary {
    Vendor {
        total: usize,
        /// Released or sent back for repair sign-off; needs vendor action
        pending_action: usize,
        in_progress: usize,
        completed: usize,
    },
    Creator {
        total: usize,
        pending: usize,
        in_progress: usize,
        completed: usize,
    },
    Supervisor {
        total: usize,
        pending_approval: usize,
        repair_requests: usize,
        active: usize,
    },
    Purchase {
        total: usize,
        invoiced: usize,
        completed: usize,
        total_spent: f64,
    },
    Guest,
}

impl TicketEngine {
    /// Compute the dashboard for an actor
    pub fn summary(&self, actor: &Actor) -> Result<RoleSummary> {
        let relevant = self.relevant_tickets(actor)?;
        let count =
            |f: &dyn Fn(TicketStatus) -> bool| relevant.iter().filter(|t| f(t.status)).count();

        Ok(match actor.role {
            Role::Vendor => RoleSummary::Vendor {
                total: relevant.len(),
                pending_action: count(&|s| {
                    matches!(s, TicketStatus::Approved | TicketStatus::RepairRequested)
                }),
                in_progress: count(&|s| {
                    matches!(
                        s,
                        TicketStatus::Acknowledged
                            | TicketStatus::Quoted
                            | TicketStatus::QuoteApproved
                            | TicketStatus::QuoteRejected
                            | TicketStatus::UnderService
                    )
                }),
                completed: count(&|s| {
                    matches!(s, TicketStatus::Invoiced | TicketStatus::Completed)
                }),
            },
            Role::Creator => RoleSummary::Creator {
                total: relevant.len(),
                pending: count(&|s| s == TicketStatus::Pending),
                in_progress: count(&|s| {
                    !matches!(
                        s,
                        TicketStatus::Pending | TicketStatus::Rejected | TicketStatus::Completed
                    )
                }),
                completed: count(&|s| s == TicketStatus::Completed),
            },
            Role::Supervisor => RoleSummary::Supervisor {
                total: relevant.len(),
                pending_approval: count(&|s| s == TicketStatus::Pending),
                repair_requests: count(&|s| s == TicketStatus::RepairRequested),
                active: count(&|s| {
                    !matches!(
                        s,
                        TicketStatus::Pending | TicketStatus::Rejected | TicketStatus::Completed
                    )
                }),
            },
            Role::Purchase => {
                // Spend covers every ticket with a settled cost, visible or
                // not, mirroring the fleet-wide maintenance total
                let spent: f64 = self
                    .ticket_store()
                    .find(&|t| t.final_cost.is_some())?
                    .iter()
                    .filter_map(|t| t.final_cost)
                    .sum();
                RoleSummary::Purchase {
                    total: relevant.len(),
                    invoiced: count(&|s| s == TicketStatus::Invoiced),
                    completed: count(&|s| s == TicketStatus::Completed),
                    total_spent: spent,
                }
            },
            Role::Guest => RoleSummary::Guest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestEnv, invoice};

    #[test]
    fn test_vendor_summary_buckets() {
        let env = TestEnv::new();
        let approved = env.create_pending_ticket();
        env.engine.approve_ticket(&env.supervisor, &approved.id).unwrap();
        env.acknowledged_ticket();
        env.completed_ticket();

        let summary = env.engine.summary(&env.vendor_actor).unwrap();
        assert_eq!(
            summary,
            RoleSummary::Vendor {
                total: 3,
                pending_action: 1,
                in_progress: 1,
                completed: 1,
            }
        );
    }

    #[test]
    fn test_purchase_summary_sums_final_costs() {
        let env = TestEnv::new();
        env.create_pending_ticket();
        let first = env.acknowledged_ticket();
        env.engine
            .submit_invoice(&env.vendor_actor, &first.id, invoice(150.0))
            .unwrap();
        env.completed_ticket(); // completes at 275.0 via the fixture

        let summary = env.engine.summary(&env.purchase).unwrap();
        match summary {
            RoleSummary::Purchase {
                total,
                invoiced,
                completed,
                total_spent,
            } => {
                assert_eq!(total, 2);
                assert_eq!(invoiced, 1);
                assert_eq!(completed, 1);
                assert!((total_spent - 425.0).abs() < f64::EPSILON);
            },
            other => panic!("expected purchase summary, got {other:?}"),
        }
    }

    #[test]
    fn test_guest_summary_is_empty() {
        let env = TestEnv::new();
        env.create_pending_ticket();
        let guest = crate::core::Actor::new("anon@example.com", crate::core::Role::Guest);
        assert_eq!(env.engine.summary(&guest).unwrap(), RoleSummary::Guest);
    }
}
