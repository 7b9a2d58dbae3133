//! Distribution sampling for lattice construction
//!
//! Draws the per-cell Bernoulli "exists" field and the weighted categorical
//! susceptibility field. Both take the simulation's own RNG so runs stay
//! deterministic for a fixed seed.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::error::{Result, SimError};
use crate::lattice::{Shape, SUSCEPTIBILITY_LEVELS};

/// Sample the occupancy field: each position independently occupied with
/// probability `density`
///
/// Caller guarantees `density` is in (0, 1] (config validation).
pub fn sample_existence(rng: &mut ChaCha8Rng, density: f64, shape: Shape) -> Vec<bool> {
    (0..shape.cell_count()).map(|_| rng.gen_bool(density)).collect()
}

/// Sample the susceptibility field: each position independently drawn from
/// {1, 2/3, 1/3, 0} with the given probabilities
///
/// Caller guarantees the weights are non-negative and sum to 1 (config
/// validation plus remainder correction).
pub fn sample_susceptibility(
    rng: &mut ChaCha8Rng,
    weights: [f64; 4],
    shape: Shape,
) -> Result<Vec<f64>> {
    let dist = WeightedIndex::new(weights)
        .map_err(|e| SimError::InvalidConfig(format!("unusable susceptibility weights: {}", e)))?;

    Ok((0..shape.cell_count())
        .map(|_| SUSCEPTIBILITY_LEVELS[dist.sample(rng)])
        .collect())
}
