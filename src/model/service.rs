use serde::Serialize;

use crate::simulation::config::FulfillmentVariant;

/// Outcome of a single demand event. Appended once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceRecord {
    pub time: f64,
    /// Quantity the customer asked for.
    pub requested: f64,
    /// Quantity shipped straight from on-hand at the demand instant.
    pub fulfilled: f64,
    pub immediate: bool,
    /// Quantity not covered from stock: backordered or lost, per variant.
    pub shortfall: f64,
}

/// Scalar metrics of a completed run, shaped by the fulfillment variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceSummary {
    Backorder {
        /// Fraction of demanded quantity served without delay.
        service_level: f64,
        /// Mean and max waiting time over backlog entries completed in-run.
        mean_delay: f64,
        max_delay: f64,
    },
    LostSales {
        /// Fraction of demanded quantity actually shipped.
        fill_rate: f64,
        /// Lost quantity per demand event.
        mean_shortfall: f64,
    },
}

/// Accumulates per-demand outcomes as the run progresses.
///
/// The scalar metrics only need the running sums, but the full record and
/// delay sequences are retained for distributional reporting.
#[derive(Debug, Default)]
pub struct ServiceLevelEstimator {
    records: Vec<ServiceRecord>,
    delays: Vec<f64>,
    total_requested: f64,
    total_fulfilled: f64,
    total_shortfall: f64,
}

impl ServiceLevelEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_demand(&mut self, record: ServiceRecord) {
        self.total_requested += record.requested;
        self.total_fulfilled += record.fulfilled;
        self.total_shortfall += record.shortfall;
        self.records.push(record);
    }

    /// Waiting times of backlog entries that a replenishment just completed.
    pub fn record_fill_delays(&mut self, delays: &[f64]) {
        self.delays.extend_from_slice(delays);
    }

    pub fn demand_events(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }

    pub fn delays(&self) -> &[f64] {
        &self.delays
    }

    /// Hand the retained sequences to the report once the run is over.
    pub fn into_outcomes(self) -> (Vec<ServiceRecord>, Vec<f64>) {
        (self.records, self.delays)
    }

    /// Reduce the accumulated outcomes to the variant's scalar metrics.
    ///
    /// A run with no demand reports a perfect level: nothing was requested,
    /// nothing was missed.
    pub fn summarize(&self, variant: FulfillmentVariant) -> ServiceSummary {
        let level = if self.total_requested > 0.0 {
            self.total_fulfilled / self.total_requested
        } else {
            1.0
        };
        match variant {
            FulfillmentVariant::Backorder => {
                let mean_delay = if self.delays.is_empty() {
                    0.0
                } else {
                    self.delays.iter().sum::<f64>() / self.delays.len() as f64
                };
                let max_delay = self.delays.iter().copied().fold(0.0, f64::max);
                ServiceSummary::Backorder {
                    service_level: level,
                    mean_delay,
                    max_delay,
                }
            }
            FulfillmentVariant::LostSales => {
                let mean_shortfall = if self.records.is_empty() {
                    0.0
                } else {
                    self.total_shortfall / self.records.len() as f64
                };
                ServiceSummary::LostSales {
                    fill_rate: level,
                    mean_shortfall,
                }
            }
        }
    }
}
