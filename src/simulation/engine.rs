// src/simulation/engine.rs

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::io::sampling::{DemandSampler, LeadTimeSampler};
use crate::model::ledger::InventoryLedger;
use crate::model::service::{ServiceLevelEstimator, ServiceRecord, ServiceSummary};
use crate::simulation::config::{ConfigError, FulfillmentVariant, SimulationConfig};
use crate::simulation::events::{EventKind, EventQueue, ScheduledEvent};
use crate::strategy::implementations::{BackorderPolicy, LostSalesPolicy, ReorderPolicy};
use crate::strategy::traits::FulfillmentPolicy;

// We make this Serialize so the reporting layer can write it to CSV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesSample {
    pub time: f64,
    pub on_hand: f64,
    pub inventory_position: f64,
    pub backlog_quantity: f64,
}

/// Everything a completed run hands to the reporting layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    /// One post-event state snapshot per dispatched event.
    pub history: Vec<TimeSeriesSample>,
    pub summary: ServiceSummary,
    /// Per-demand outcomes, in dispatch order, for distributional reporting.
    pub service_records: Vec<ServiceRecord>,
    /// Waiting times of backlog entries completed in-run (backorder only).
    pub fill_delays: Vec<f64>,
    pub total_demand_events: u64,
    /// Replenishment arrivals applied within the horizon.
    pub total_replenishments: u64,
    /// Orders placed; may exceed arrivals when an order is still in flight
    /// at the horizon.
    pub orders_placed: u64,
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Defensive check; firing means a logic defect, not a runtime condition.
    #[error(
        "inventory invariant violated at t={time}: on_hand={on_hand}, \
         position={inventory_position}, on_order={on_order}, backlog={backlog}"
    )]
    InvariantViolation {
        time: f64,
        on_hand: f64,
        inventory_position: f64,
        on_order: f64,
        backlog: f64,
    },
}

/// The simulation driver: owns the clock, the event queue, the ledger, the
/// policies, the seeded generator, and the output series.
///
/// Time only moves by jumping to the timestamp of the next dispatched event.
/// Execution is single-threaded and fully deterministic for a given
/// `(config, seed)`.
pub struct StockSimulation {
    config: SimulationConfig,
    clock: f64,
    queue: EventQueue,
    ledger: InventoryLedger,
    fulfillment: Box<dyn FulfillmentPolicy>,
    reorder: ReorderPolicy,
    demand: DemandSampler,
    lead_time: LeadTimeSampler,
    rng: ChaCha20Rng,
    estimator: ServiceLevelEstimator,
    history: Vec<TimeSeriesSample>,
    total_replenishments: u64,
    orders_placed: u64,
}

impl StockSimulation {
    /// Validates the configuration and builds a ready-to-run simulation.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let demand = DemandSampler::new(
            config.demand_interval_mean,
            config.demand_interval_std_dev,
            config.demand_mean,
            config.demand_std_dev,
        )
        .map_err(|e| ConfigError::InvalidDistribution(e.to_string()))?;
        let lead_time = LeadTimeSampler::new(config.lead_time_min, config.lead_time_max);

        let fulfillment: Box<dyn FulfillmentPolicy> = match config.variant {
            FulfillmentVariant::Backorder => Box::new(BackorderPolicy::new()),
            FulfillmentVariant::LostSales => Box::new(LostSalesPolicy::new()),
        };

        Ok(Self {
            clock: 0.0,
            queue: EventQueue::new(),
            ledger: InventoryLedger::new(config.initial_inventory),
            fulfillment,
            reorder: ReorderPolicy::new(config.reorder_point, config.reorder_quantity),
            demand,
            lead_time,
            rng: ChaCha20Rng::seed_from_u64(config.seed),
            estimator: ServiceLevelEstimator::new(),
            history: Vec::new(),
            total_replenishments: 0,
            orders_placed: 0,
            config,
        })
    }

    pub fn now(&self) -> f64 {
        self.clock
    }

    /// Run to the horizon and reduce the accumulated outcomes to a report.
    ///
    /// The loop stops when the queue is empty or the next event lies past
    /// the horizon; residual events are discarded, never processed.
    pub fn run(mut self) -> Result<SimulationReport, SimulationError> {
        self.schedule_next_demand();

        while self
            .queue
            .peek_time()
            .is_some_and(|t| t <= self.config.horizon)
        {
            let Some(event) = self.queue.pop_next() else {
                break;
            };
            self.step(event)?;
        }

        debug!(
            events = self.history.len(),
            replenishments = self.total_replenishments,
            "run complete"
        );
        let summary = self.estimator.summarize(self.config.variant);
        let total_demand_events = self.estimator.demand_events();
        let (service_records, fill_delays) = self.estimator.into_outcomes();
        Ok(SimulationReport {
            history: self.history,
            summary,
            service_records,
            fill_delays,
            total_demand_events,
            total_replenishments: self.total_replenishments,
            orders_placed: self.orders_placed,
        })
    }

    fn step(&mut self, event: ScheduledEvent) -> Result<(), SimulationError> {
        self.clock = event.at;
        trace!(t = self.clock, kind = ?event.kind, "dispatch");

        match event.kind {
            EventKind::DemandArrival { quantity } => {
                let record = self
                    .fulfillment
                    .on_demand(&mut self.ledger, quantity, self.clock);
                self.estimator.record_demand(record);
                // Demand is the only mutation that can lower the position,
                // so this is the only place the reorder rule is reviewed.
                self.review_reorder();
                self.schedule_next_demand();
            }
            EventKind::ReplenishmentArrival {
                quantity,
                placed_at,
            } => {
                self.ledger.receive_order(quantity);
                let completed = self.fulfillment.on_replenishment(&mut self.ledger, self.clock);
                self.estimator.record_fill_delays(&completed);
                self.total_replenishments += 1;
                debug!(
                    t = self.clock,
                    quantity,
                    lead = self.clock - placed_at,
                    backlog_filled = completed.len(),
                    "order arrived"
                );
            }
        }

        let backlog = self.fulfillment.backlog_quantity();
        if !self.ledger.is_consistent(backlog) {
            return Err(SimulationError::InvariantViolation {
                time: self.clock,
                on_hand: self.ledger.on_hand,
                inventory_position: self.ledger.inventory_position,
                on_order: self.ledger.on_order,
                backlog,
            });
        }

        self.history.push(TimeSeriesSample {
            time: self.clock,
            on_hand: self.ledger.on_hand,
            inventory_position: self.ledger.inventory_position,
            backlog_quantity: backlog,
        });
        Ok(())
    }

    fn review_reorder(&mut self) {
        if let Some(quantity) = self.reorder.review(self.ledger.inventory_position) {
            self.ledger.place_order(quantity);
            let lead = self.lead_time.sample(&mut self.rng);
            self.queue.schedule(
                self.clock + lead,
                EventKind::ReplenishmentArrival {
                    quantity,
                    placed_at: self.clock,
                },
            );
            self.orders_placed += 1;
            debug!(
                t = self.clock,
                quantity,
                lead,
                position = self.ledger.inventory_position,
                "order placed"
            );
        }
    }

    fn schedule_next_demand(&mut self) {
        let draw = self.demand.sample(&mut self.rng);
        self.queue.schedule(
            self.clock + draw.interarrival,
            EventKind::DemandArrival {
                quantity: draw.quantity,
            },
        );
    }
}
