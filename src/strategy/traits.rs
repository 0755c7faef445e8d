// src/strategy/traits.rs

use std::fmt::Debug;

use crate::model::ledger::InventoryLedger;
use crate::model::service::ServiceRecord;

/// Decides what happens when demand meets (or exceeds) available stock.
///
/// The two implementations carry the divergent state transitions: backorder
/// queues unmet demand as an open commitment, lost sales forfeits it.
///
/// We require `Debug` so engine state can be printed if needed.
/// We require `Send` + `Sync` so whole runs can be replicated across threads.
pub trait FulfillmentPolicy: Debug + Send + Sync {
    /// Apply one demand event to the ledger and report its outcome.
    ///
    /// # Arguments
    /// * `ledger` - The inventory state to mutate.
    /// * `quantity` - Demanded quantity (already clamped non-negative).
    /// * `now` - Current simulation time.
    fn on_demand(&mut self, ledger: &mut InventoryLedger, quantity: f64, now: f64)
        -> ServiceRecord;

    /// React to stock that just arrived; the ledger has already received it.
    ///
    /// Returns the waiting times of backlog entries this arrival completed
    /// (always empty for lost sales).
    fn on_replenishment(&mut self, ledger: &mut InventoryLedger, now: f64) -> Vec<f64>;

    /// Total quantity currently backlogged. Zero where no backlog exists.
    fn backlog_quantity(&self) -> f64;
}
