// src/io/sampling.rs

use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError, Uniform};

/// One demand draw: when the next demand arrives and how much it asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandDraw {
    pub interarrival: f64,
    pub quantity: f64,
}

/// Samples demand timing and size from Normal distributions.
///
/// A Normal can produce negative values, which are physically meaningless as
/// times or quantities; negative draws are clamped to zero. With a zero
/// standard deviation every draw is exactly the mean.
///
/// Samplers hold no generator of their own: all draws come from the single
/// seeded generator the driver passes in, which is what makes runs
/// reproducible.
#[derive(Debug, Clone, Copy)]
pub struct DemandSampler {
    interarrival: Normal<f64>,
    quantity: Normal<f64>,
}

impl DemandSampler {
    pub fn new(
        interval_mean: f64,
        interval_std_dev: f64,
        quantity_mean: f64,
        quantity_std_dev: f64,
    ) -> Result<Self, NormalError> {
        Ok(Self {
            interarrival: Normal::new(interval_mean, interval_std_dev)?,
            quantity: Normal::new(quantity_mean, quantity_std_dev)?,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> DemandDraw {
        DemandDraw {
            interarrival: self.interarrival.sample(rng).max(0.0),
            quantity: self.quantity.sample(rng).max(0.0),
        }
    }
}

/// Samples replenishment lead times, uniform over `[min, max]` inclusive.
#[derive(Debug, Clone, Copy)]
pub struct LeadTimeSampler {
    window: Uniform<f64>,
}

impl LeadTimeSampler {
    /// `min` and `max` must satisfy `0 <= min <= max`; config validation
    /// enforces this before a sampler is ever built.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            window: Uniform::new_inclusive(min, max),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.window.sample(rng)
    }
}
