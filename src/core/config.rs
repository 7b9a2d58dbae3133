//! Simulation configuration with documented parameters
//!
//! All tunable parameters are collected here with explanations of their
//! purpose and the validation rules applied before any lattice work begins.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::lattice::Shape;

/// Tolerance for the susceptibility weights summing to 1.
///
/// Weights within this distance of 1.0 are accepted and the residual
/// rounding error is pushed into the first weight before sampling.
/// Anything further off is a configuration error.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Configuration for one rumor simulation
///
/// Construction of a [`Simulation`](crate::simulation::Simulation) validates
/// these values up front; an invalid configuration is fatal and is never
/// retried internally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Population density: probability that a lattice position is occupied
    ///
    /// Must be in (0, 1]. A density of exactly 0 is rejected because an
    /// empty lattice cannot carry the rumor anywhere.
    pub density: f64,

    /// Spread cooldown `L`: iterations a cell must wait after spreading
    /// before it may decide to spread again
    ///
    /// A cell whose cooldown equals `L` spreads on the next spread phase.
    /// Must be at least 1.
    pub cooldown_limit: u32,

    /// Iteration budget for a full run
    ///
    /// Must be at least 1.
    pub iterations: u32,

    /// Probabilities of the four susceptibility levels {1, 2/3, 1/3, 0}
    ///
    /// `weights[0]` is the share of cells that always repeat a rumor they
    /// hear, `weights[3]` the share that never do. Must be non-negative and
    /// sum to 1 within [`WEIGHT_TOLERANCE`].
    pub susceptibility_weights: [f64; 4],

    /// Lattice dimensions (rows, cols)
    pub shape: Shape,

    /// Seed for the per-instance deterministic RNG
    ///
    /// Two simulations built from identical configurations (same seed
    /// included) produce bit-identical snapshot sequences.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            density: 0.85,
            cooldown_limit: 5,
            iterations: 100,
            susceptibility_weights: [0.7, 0.15, 0.1, 0.05],
            shape: Shape::default(),
            seed: 12345,
        }
    }
}

impl SimulationConfig {
    /// Check every configuration rule, reporting the first violation
    pub fn validate(&self) -> Result<()> {
        if self.density == 0.0 {
            return Err(SimError::InvalidConfig(
                "density must be greater than 0 (an empty lattice cannot spread a rumor)".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(SimError::InvalidConfig(format!(
                "density must be in [0, 1], got {}",
                self.density
            )));
        }
        if self.cooldown_limit < 1 {
            return Err(SimError::InvalidConfig(
                "cooldown limit must be at least 1".into(),
            ));
        }
        if self.iterations < 1 {
            return Err(SimError::InvalidConfig(
                "iteration budget must be at least 1".into(),
            ));
        }
        if self.shape.rows == 0 || self.shape.cols == 0 {
            return Err(SimError::InvalidConfig(format!(
                "lattice shape must be non-empty, got {}x{}",
                self.shape.rows, self.shape.cols
            )));
        }
        if self.susceptibility_weights.iter().any(|&w| w < 0.0) {
            return Err(SimError::InvalidConfig(
                "susceptibility weights must be non-negative".into(),
            ));
        }
        let sum: f64 = self.susceptibility_weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(SimError::InvalidConfig(format!(
                "susceptibility weights must sum to 1, got {}",
                sum
            )));
        }
        Ok(())
    }

    /// Susceptibility weights with the floating-point remainder folded into
    /// the first weight, so they sum to exactly 1 when sampled
    pub fn normalized_weights(&self) -> [f64; 4] {
        let mut weights = self.susceptibility_weights;
        let tail: f64 = weights[1] + weights[2] + weights[3];
        weights[0] = 1.0 - tail;
        weights
    }
}
