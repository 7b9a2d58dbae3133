//! Multi-run statistics over finished lattices

use rayon::prelude::*;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::lattice::Lattice;
use crate::simulation::engine::Simulation;

/// Fraction of the expected population that has heard the rumor
///
/// The denominator is `rows * cols * density` - the population the density
/// parameter implies, not the occupancy actually sampled for this lattice
/// instance. Single-run values can therefore land slightly above or below
/// the true fraction of occupied cells reached; they converge under
/// [`average_over_repeats`].
pub fn percent_reached(lattice: &Lattice, density: f64) -> f64 {
    let expected_population = lattice.shape().cell_count() as f64 * density;
    lattice.count_reached() as f64 / expected_population
}

/// Mean of a per-repeat statistic over independent runs
///
/// `run_one` receives the repeat index and is expected to build, run, and
/// score one fresh simulation. Repeats share no state, so they execute in
/// parallel; the closure must derive any RNG seed from the index (or own
/// its generator) to keep repeats independent.
pub fn average_over_repeats<F>(repeats: usize, run_one: F) -> Result<f64>
where
    F: Fn(usize) -> Result<f64> + Sync,
{
    if repeats == 0 {
        return Err(SimError::InvalidConfig(
            "statistics need at least 1 repeat".into(),
        ));
    }
    let samples: Vec<f64> = (0..repeats)
        .into_par_iter()
        .map(&run_one)
        .collect::<Result<_>>()?;
    Ok(samples.iter().sum::<f64>() / repeats as f64)
}

/// Average `percent_reached` over fresh full runs of the given
/// configuration, one derived seed per repeat
pub fn average_percent_reached(config: &SimulationConfig, repeats: usize) -> Result<f64> {
    average_over_repeats(repeats, |i| {
        let repeat_config = SimulationConfig {
            seed: config.seed.wrapping_add(i as u64),
            ..config.clone()
        };
        let mut sim = Simulation::new(&repeat_config)?;
        sim.run_to_completion();
        Ok(sim.percent_reached())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{Cell, Shape};

    #[test]
    fn test_percent_reached_uses_expected_population() {
        let mut lattice = Lattice::new(Shape::new(2, 2));
        for cell in [(0, 0), (0, 1), (1, 0)] {
            lattice.set(
                cell.0,
                cell.1,
                Cell {
                    exists: true,
                    reached_count: 1,
                    ..Default::default()
                },
            );
        }
        // 3 reached out of 4 * 0.5 = 2 expected: the ratio may exceed 1
        let value = percent_reached(&lattice, 0.5);
        assert!((value - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_untouched_lattice_scores_zero() {
        let lattice = Lattice::new(Shape::new(10, 10));
        assert_eq!(percent_reached(&lattice, 0.8), 0.0);
    }

    #[test]
    fn test_average_is_arithmetic_mean() {
        let mean = average_over_repeats(4, |i| Ok(i as f64)).unwrap();
        assert!((mean - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_repeats_rejected() {
        assert!(average_over_repeats(0, |_| Ok(0.0)).is_err());
    }

    #[test]
    fn test_average_percent_reached_smooths_runs() {
        let config = SimulationConfig {
            shape: Shape::new(15, 15),
            iterations: 20,
            density: 0.9,
            cooldown_limit: 2,
            ..Default::default()
        };
        let mean = average_percent_reached(&config, 8).unwrap();
        // dense grid, high susceptibility: the rumor must reach someone
        assert!(mean > 0.0);
        // generous upper bound (normalization can exceed 1 slightly)
        assert!(mean < 1.5);
    }

    #[test]
    fn test_repeats_use_independent_seeds() {
        let config = SimulationConfig {
            shape: Shape::new(15, 15),
            iterations: 20,
            ..Default::default()
        };
        // repeat i re-derives its seed deterministically, so the whole
        // average is reproducible
        let a = average_percent_reached(&config, 5).unwrap();
        let b = average_percent_reached(&config, 5).unwrap();
        assert_eq!(a, b);
    }
}
