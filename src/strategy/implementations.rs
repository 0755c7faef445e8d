// src/strategy/implementations.rs

use std::collections::VecDeque;

use crate::model::ledger::InventoryLedger;
use crate::model::service::ServiceRecord;
use crate::strategy::traits::FulfillmentPolicy;

// =========================================================================
// 1. Backorder Fulfillment
// =========================================================================

/// A demand the facility still owes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BacklogEntry {
    /// Remaining unserved quantity; shrinks under partial drains.
    quantity: f64,
    requested_at: f64,
}

/// Unmet demand queues as an open commitment and is served FIFO from future
/// arrivals.
#[derive(Debug, Default)]
pub struct BackorderPolicy {
    backlog: VecDeque<BacklogEntry>,
}

impl BackorderPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }
}

impl FulfillmentPolicy for BackorderPolicy {
    fn on_demand(
        &mut self,
        ledger: &mut InventoryLedger,
        quantity: f64,
        now: f64,
    ) -> ServiceRecord {
        let shipped = ledger.ship(quantity);
        // The position drops by the full request: the unmet part is an open
        // commitment against future stock.
        ledger.commit(quantity);

        let shortfall = quantity - shipped;
        if shortfall > 0.0 {
            self.backlog.push_back(BacklogEntry {
                quantity: shortfall,
                requested_at: now,
            });
        }
        ServiceRecord {
            time: now,
            requested: quantity,
            fulfilled: shipped,
            immediate: shortfall == 0.0,
            shortfall,
        }
    }

    fn on_replenishment(&mut self, ledger: &mut InventoryLedger, now: f64) -> Vec<f64> {
        let mut completed = Vec::new();
        while ledger.on_hand > 0.0 {
            let Some(entry) = self.backlog.front_mut() else {
                break;
            };
            let served = ledger.ship(entry.quantity);
            entry.quantity -= served;
            if entry.quantity > 0.0 {
                // Stock ran out mid-entry; the remainder keeps its place.
                break;
            }
            if let Some(done) = self.backlog.pop_front() {
                completed.push(now - done.requested_at);
            }
        }
        completed
    }

    fn backlog_quantity(&self) -> f64 {
        self.backlog.iter().map(|entry| entry.quantity).sum()
    }
}

// =========================================================================
// 2. Lost-Sales Fulfillment
// =========================================================================

/// Unmet demand is forfeited. It never becomes an open commitment, so only
/// the shipped quantity leaves the inventory position.
#[derive(Debug, Clone, Copy, Default)]
pub struct LostSalesPolicy;

impl LostSalesPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl FulfillmentPolicy for LostSalesPolicy {
    fn on_demand(
        &mut self,
        ledger: &mut InventoryLedger,
        quantity: f64,
        now: f64,
    ) -> ServiceRecord {
        let shipped = ledger.ship(quantity);
        ledger.commit(shipped);

        let shortfall = quantity - shipped;
        ServiceRecord {
            time: now,
            requested: quantity,
            fulfilled: shipped,
            immediate: shortfall == 0.0,
            shortfall,
        }
    }

    fn on_replenishment(&mut self, _ledger: &mut InventoryLedger, _now: f64) -> Vec<f64> {
        // No backlog to drain; the arrival already raised on-hand.
        Vec::new()
    }

    fn backlog_quantity(&self) -> f64 {
        0.0
    }
}

// =========================================================================
// 3. Continuous-Review Reorder Policy (ROP / ROQ)
// =========================================================================

/// Reviews the inventory position after every change that can lower it.
///
/// Placing an order immediately raises the position by the order quantity,
/// which is what keeps the rule from re-firing while that order is in
/// flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderPolicy {
    pub reorder_point: f64,
    pub reorder_quantity: f64,
}

impl ReorderPolicy {
    pub fn new(reorder_point: f64, reorder_quantity: f64) -> Self {
        Self {
            reorder_point,
            reorder_quantity,
        }
    }

    /// Quantity to order now, if the position has reached the reorder point.
    pub fn review(&self, inventory_position: f64) -> Option<f64> {
        (inventory_position <= self.reorder_point).then_some(self.reorder_quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backorder_full_fulfillment_leaves_no_backlog() {
        let mut ledger = InventoryLedger::new(20.0);
        let mut policy = BackorderPolicy::new();

        let record = policy.on_demand(&mut ledger, 8.0, 1.0);
        assert_eq!(record.fulfilled, 8.0);
        assert!(record.immediate);
        assert_eq!(record.shortfall, 0.0);
        assert_eq!(ledger.on_hand, 12.0);
        assert_eq!(ledger.inventory_position, 12.0);
        assert_eq!(policy.backlog_quantity(), 0.0);
    }

    #[test]
    fn backorder_shortfall_queues_and_commits_full_request() {
        let mut ledger = InventoryLedger::new(5.0);
        let mut policy = BackorderPolicy::new();

        let record = policy.on_demand(&mut ledger, 12.0, 3.0);
        assert_eq!(record.fulfilled, 5.0);
        assert!(!record.immediate);
        assert_eq!(record.shortfall, 7.0);
        assert_eq!(ledger.on_hand, 0.0);
        // Position reflects the full commitment, not just what shipped.
        assert_eq!(ledger.inventory_position, -7.0);
        assert_eq!(policy.backlog_quantity(), 7.0);
    }

    #[test]
    fn backlog_drains_fifo_with_delays() {
        let mut ledger = InventoryLedger::new(0.0);
        let mut policy = BackorderPolicy::new();
        policy.on_demand(&mut ledger, 4.0, 1.0);
        policy.on_demand(&mut ledger, 6.0, 2.0);

        ledger.place_order(10.0);
        ledger.receive_order(10.0);
        let delays = policy.on_replenishment(&mut ledger, 5.0);

        assert_eq!(delays, vec![4.0, 3.0]);
        assert_eq!(ledger.on_hand, 0.0);
        assert_eq!(policy.backlog_quantity(), 0.0);
    }

    #[test]
    fn partial_drain_updates_front_entry_in_place() {
        let mut ledger = InventoryLedger::new(0.0);
        let mut policy = BackorderPolicy::new();
        policy.on_demand(&mut ledger, 10.0, 1.0);
        policy.on_demand(&mut ledger, 5.0, 2.0);

        ledger.place_order(6.0);
        ledger.receive_order(6.0);
        let delays = policy.on_replenishment(&mut ledger, 4.0);

        // First entry only partially served: no completion recorded yet.
        assert!(delays.is_empty());
        assert_eq!(policy.backlog_len(), 2);
        assert_eq!(policy.backlog_quantity(), 9.0);
        assert_eq!(ledger.on_hand, 0.0);

        // A second arrival finishes both entries.
        ledger.place_order(9.0);
        ledger.receive_order(9.0);
        let delays = policy.on_replenishment(&mut ledger, 7.0);
        assert_eq!(delays, vec![6.0, 5.0]);
        assert_eq!(policy.backlog_len(), 0);
    }

    #[test]
    fn drain_with_empty_backlog_has_no_side_effects() {
        let mut ledger = InventoryLedger::new(3.0);
        let mut policy = BackorderPolicy::new();

        ledger.place_order(50.0);
        ledger.receive_order(50.0);
        let delays = policy.on_replenishment(&mut ledger, 9.0);

        assert!(delays.is_empty());
        assert_eq!(ledger.on_hand, 53.0);
        assert_eq!(policy.backlog_quantity(), 0.0);
    }

    #[test]
    fn lost_sales_forfeits_shortfall_without_committing_it() {
        let mut ledger = InventoryLedger::new(5.0);
        let mut policy = LostSalesPolicy::new();

        let record = policy.on_demand(&mut ledger, 12.0, 3.0);
        assert_eq!(record.fulfilled, 5.0);
        assert_eq!(record.shortfall, 7.0);
        assert!(!record.immediate);
        assert_eq!(ledger.on_hand, 0.0);
        // Only the shipped quantity left the position; the lost 7 never
        // becomes a commitment.
        assert_eq!(ledger.inventory_position, 0.0);
        assert_eq!(policy.backlog_quantity(), 0.0);
    }

    #[test]
    fn lost_sales_ignores_replenishment_hook() {
        let mut ledger = InventoryLedger::new(0.0);
        let mut policy = LostSalesPolicy::new();
        ledger.place_order(10.0);
        ledger.receive_order(10.0);
        assert!(policy.on_replenishment(&mut ledger, 2.0).is_empty());
        assert_eq!(ledger.on_hand, 10.0);
    }

    #[test]
    fn reorder_triggers_at_and_below_the_point() {
        let policy = ReorderPolicy::new(10.0, 50.0);
        assert_eq!(policy.review(10.0), Some(50.0));
        assert_eq!(policy.review(-3.0), Some(50.0));
        assert_eq!(policy.review(10.1), None);
    }
}
