//! Discrete-event simulation of a single stocking facility under a
//! continuous-review reorder-point / reorder-quantity (ROP, ROQ) policy.
//!
//! Demand size and inter-arrival are Normally distributed, replenishment
//! lead time is Uniform. When demand exceeds on-hand stock, the run either
//! backorders it or loses it, selected by
//! [`FulfillmentVariant`](simulation::config::FulfillmentVariant).
//!
//! A run is driven by [`StockSimulation`](simulation::engine::StockSimulation)
//! and produces a [`SimulationReport`](simulation::engine::SimulationReport):
//! a per-event time series of on-hand stock, inventory position and backlog,
//! plus the variant's service metrics. Given the same configuration and seed,
//! two runs produce identical output.

pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use model::service::{ServiceRecord, ServiceSummary};
pub use simulation::config::{ConfigError, FulfillmentVariant, SimulationConfig};
pub use simulation::engine::{
    SimulationError, SimulationReport, StockSimulation, TimeSeriesSample,
};
