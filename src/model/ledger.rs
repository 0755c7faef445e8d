/// Stock state of the single location.
///
/// Invariant, checked after every event:
/// `inventory_position = on_hand + on_order - backlogged quantity`,
/// with `on_hand >= 0` at all times. The backlog itself lives with the
/// fulfillment policy; the ledger only sees its total for the check.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryLedger {
    /// Physical stock on the shelf. Never negative.
    pub on_hand: f64,
    /// On-hand plus on-order minus backlogged demand. May go negative under
    /// heavy backorders.
    pub inventory_position: f64,
    /// Total quantity of orders placed but not yet arrived.
    pub on_order: f64,
}

impl InventoryLedger {
    pub fn new(initial_inventory: f64) -> Self {
        Self {
            on_hand: initial_inventory,
            inventory_position: initial_inventory,
            on_order: 0.0,
        }
    }

    /// Ship up to `quantity` from on-hand stock; returns what actually
    /// shipped. On-hand cannot go below zero.
    pub fn ship(&mut self, quantity: f64) -> f64 {
        let shipped = quantity.min(self.on_hand);
        self.on_hand -= shipped;
        shipped
    }

    /// Lower the position by a committed quantity. How much of a demand
    /// counts as committed is the fulfillment policy's call.
    pub fn commit(&mut self, quantity: f64) {
        self.inventory_position -= quantity;
    }

    /// Register a newly placed order: position and on-order both rise.
    pub fn place_order(&mut self, quantity: f64) {
        self.inventory_position += quantity;
        self.on_order += quantity;
    }

    /// Receive an arrived order into stock. The position is untouched: it
    /// already counted this quantity as on-order.
    pub fn receive_order(&mut self, quantity: f64) {
        self.on_hand += quantity;
        self.on_order -= quantity;
    }

    /// Conservation check against the policy's backlog total. Tolerance
    /// scales with the magnitudes involved to absorb float round-off from
    /// incremental updates.
    pub fn is_consistent(&self, backlog_quantity: f64) -> bool {
        let gap = self.inventory_position - (self.on_hand + self.on_order - backlog_quantity);
        let tolerance = 1e-9
            * (1.0
                + self.inventory_position.abs()
                + self.on_hand.abs()
                + self.on_order.abs()
                + backlog_quantity.abs());
        self.on_hand >= 0.0 && backlog_quantity >= 0.0 && gap.abs() <= tolerance
    }
}
