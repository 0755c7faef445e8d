// src/simulation/config.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What happens to demand that exceeds on-hand stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentVariant {
    /// Unmet demand queues and is served from future arrivals.
    Backorder,
    /// Unmet demand is forfeited and counted against the fill rate.
    LostSales,
}

/// Rejected parameter combinations. Raised before any simulation state is
/// built; never recovered internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("reorder quantity must be positive, got {0}")]
    NonPositiveReorderQuantity(f64),
    #[error("initial inventory must be non-negative, got {0}")]
    NegativeInitialInventory(f64),
    #[error("{name} must be non-negative, got {value}")]
    NegativeStdDev { name: &'static str, value: f64 },
    #[error("mean demand inter-arrival must be positive, got {0}")]
    NonPositiveDemandInterval(f64),
    #[error("lead time window must satisfy 0 <= min <= max, got [{min}, {max}]")]
    InvalidLeadTimeWindow { min: f64, max: f64 },
    #[error("simulation horizon must be positive, got {0}")]
    NonPositiveHorizon(f64),
    #[error("invalid demand distribution: {0}")]
    InvalidDistribution(String),
}

/// Full parameter set for one run. A run is reproducible from this struct
/// alone: the seed drives every random draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Inventory position at or below which a new order is placed.
    pub reorder_point: f64,
    /// Fixed quantity of every order.
    pub reorder_quantity: f64,
    pub initial_inventory: f64,
    /// Normal distribution of the demanded quantity per demand event.
    pub demand_mean: f64,
    pub demand_std_dev: f64,
    /// Normal distribution of the gap between demand events. The default
    /// (1.0, 0.0) gives exactly one demand per unit period.
    #[serde(default = "default_interval_mean")]
    pub demand_interval_mean: f64,
    #[serde(default)]
    pub demand_interval_std_dev: f64,
    /// Replenishment lead time is uniform over [lead_time_min, lead_time_max].
    pub lead_time_min: f64,
    pub lead_time_max: f64,
    pub horizon: f64,
    pub seed: u64,
    pub variant: FulfillmentVariant,
}

fn default_interval_mean() -> f64 {
    1.0
}

impl SimulationConfig {
    /// Fail-fast validation of the whole parameter set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("reorder_point", self.reorder_point)?;
        ensure_finite("reorder_quantity", self.reorder_quantity)?;
        ensure_finite("initial_inventory", self.initial_inventory)?;
        ensure_finite("demand_mean", self.demand_mean)?;
        ensure_finite("demand_std_dev", self.demand_std_dev)?;
        ensure_finite("demand_interval_mean", self.demand_interval_mean)?;
        ensure_finite("demand_interval_std_dev", self.demand_interval_std_dev)?;
        ensure_finite("lead_time_min", self.lead_time_min)?;
        ensure_finite("lead_time_max", self.lead_time_max)?;
        ensure_finite("horizon", self.horizon)?;

        if self.reorder_quantity <= 0.0 {
            return Err(ConfigError::NonPositiveReorderQuantity(self.reorder_quantity));
        }
        if self.initial_inventory < 0.0 {
            return Err(ConfigError::NegativeInitialInventory(self.initial_inventory));
        }
        if self.demand_std_dev < 0.0 {
            return Err(ConfigError::NegativeStdDev {
                name: "demand_std_dev",
                value: self.demand_std_dev,
            });
        }
        if self.demand_interval_std_dev < 0.0 {
            return Err(ConfigError::NegativeStdDev {
                name: "demand_interval_std_dev",
                value: self.demand_interval_std_dev,
            });
        }
        // A non-positive mean gap would pin every demand to the same instant
        // and the run could never reach the horizon.
        if self.demand_interval_mean <= 0.0 {
            return Err(ConfigError::NonPositiveDemandInterval(self.demand_interval_mean));
        }
        if !(0.0 <= self.lead_time_min && self.lead_time_min <= self.lead_time_max) {
            return Err(ConfigError::InvalidLeadTimeWindow {
                min: self.lead_time_min,
                max: self.lead_time_max,
            });
        }
        if self.horizon <= 0.0 {
            return Err(ConfigError::NonPositiveHorizon(self.horizon));
        }
        Ok(())
    }
}

fn ensure_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

impl Default for SimulationConfig {
    /// Classic single-echelon scenario: Normal(500, 100) demand per unit
    /// period, 7-13 lead time, ROP = ROQ = 6000, one simulated year.
    fn default() -> Self {
        Self {
            reorder_point: 6000.0,
            reorder_quantity: 6000.0,
            initial_inventory: 12_000.0,
            demand_mean: 500.0,
            demand_std_dev: 100.0,
            demand_interval_mean: 1.0,
            demand_interval_std_dev: 0.0,
            lead_time_min: 7.0,
            lead_time_max: 13.0,
            horizon: 365.0,
            seed: 0,
            variant: FulfillmentVariant::Backorder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_reorder_quantity() {
        let config = SimulationConfig {
            reorder_quantity: 0.0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveReorderQuantity(0.0))
        );
    }

    #[test]
    fn rejects_negative_initial_inventory() {
        let config = SimulationConfig {
            initial_inventory: -1.0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeInitialInventory(-1.0))
        );
    }

    #[test]
    fn rejects_negative_std_dev() {
        let config = SimulationConfig {
            demand_std_dev: -0.5,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeStdDev {
                name: "demand_std_dev",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_positive_demand_interval() {
        let config = SimulationConfig {
            demand_interval_mean: 0.0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveDemandInterval(0.0))
        );
    }

    #[test]
    fn rejects_inverted_lead_time_window() {
        let config = SimulationConfig {
            lead_time_min: 5.0,
            lead_time_max: 3.0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidLeadTimeWindow { min: 5.0, max: 3.0 })
        );
    }

    #[test]
    fn rejects_negative_lead_time() {
        let config = SimulationConfig {
            lead_time_min: -1.0,
            lead_time_max: 3.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLeadTimeWindow { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_horizon() {
        let config = SimulationConfig {
            horizon: 0.0,
            ..SimulationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveHorizon(0.0)));
    }

    #[test]
    fn rejects_non_finite_parameter() {
        let config = SimulationConfig {
            demand_mean: f64::NAN,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                name: "demand_mean",
                ..
            })
        ));
    }
}
