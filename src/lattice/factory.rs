//! Lattice construction: randomized builds and the strategy hook
//!
//! Both build paths end with the same seeding step: a uniformly random
//! occupied cell gets its cooldown pre-set to the configured limit, so it
//! spreads on the first iteration's spread phase.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::lattice::{sampler, Lattice, Shape};

/// Random probes allowed per lattice cell when hunting for the seed cell
///
/// At very low densities the uniform probing can keep missing occupied
/// cells; past this budget the configuration is treated as fatal rather
/// than looping forever.
const SEED_PROBES_PER_CELL: usize = 10;

/// Build a randomized lattice from the configured density and
/// susceptibility weights, then place the seed spreader
pub fn build_random(config: &SimulationConfig, rng: &mut ChaCha8Rng) -> Result<Lattice> {
    let shape = config.shape;
    let existence = sampler::sample_existence(rng, config.density, shape);
    let susceptibility =
        sampler::sample_susceptibility(rng, config.normalized_weights(), shape)?;

    let mut lattice = Lattice::new(shape);
    for (cell, (exists, sus)) in lattice
        .cells_mut()
        .iter_mut()
        .zip(existence.into_iter().zip(susceptibility))
    {
        cell.exists = exists;
        cell.susceptibility = sus;
    }

    place_seed(&mut lattice, config.cooldown_limit, rng)?;
    Ok(lattice)
}

/// Build the lattice through an externally supplied strategy, then place
/// the seed spreader
///
/// The strategy returns a fully populated lattice; occupancy and
/// susceptibility are entirely its business. The factory only checks the
/// field invariants it relies on (matching shape, zeroed counters, sane
/// susceptibilities) before seeding.
pub fn build_from_strategy<F>(
    config: &SimulationConfig,
    strategy: F,
    rng: &mut ChaCha8Rng,
) -> Result<Lattice>
where
    F: FnOnce(Shape) -> Lattice,
{
    let mut lattice = strategy(config.shape);
    check_strategy_lattice(&lattice, config.shape)?;
    place_seed(&mut lattice, config.cooldown_limit, rng)?;
    Ok(lattice)
}

fn check_strategy_lattice(lattice: &Lattice, expected: Shape) -> Result<()> {
    if lattice.shape() != expected {
        return Err(SimError::StrategyLattice(format!(
            "expected shape {}x{}, got {}x{}",
            expected.rows,
            expected.cols,
            lattice.shape().rows,
            lattice.shape().cols
        )));
    }
    for (i, cell) in lattice.cells().iter().enumerate() {
        if cell.heard_count != 0 || cell.cooldown != 0 || cell.reached_count != 0 {
            return Err(SimError::StrategyLattice(format!(
                "cell {} has non-zero counters before the first iteration",
                i
            )));
        }
        if cell.exists && !(0.0..=1.0).contains(&cell.susceptibility) {
            return Err(SimError::StrategyLattice(format!(
                "cell {} has susceptibility {} outside [0, 1]",
                i, cell.susceptibility
            )));
        }
    }
    Ok(())
}

/// Pick a uniformly random occupied cell and mark it as the initial
/// spreader (cooldown pre-set to the limit)
fn place_seed(lattice: &mut Lattice, cooldown_limit: u32, rng: &mut ChaCha8Rng) -> Result<()> {
    let shape = lattice.shape();
    let probes = SEED_PROBES_PER_CELL * shape.cell_count();

    for _ in 0..probes {
        let row = rng.gen_range(0..shape.rows);
        let col = rng.gen_range(0..shape.cols);
        let cell = &mut lattice.cells_mut()[row * shape.cols + col];
        if cell.exists {
            cell.cooldown = cooldown_limit;
            tracing::debug!("seed spreader placed at ({}, {})", row, col);
            return Ok(());
        }
    }

    Err(SimError::SeedSearchExhausted { probes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Cell;
    use rand::SeedableRng;

    fn config(density: f64) -> SimulationConfig {
        SimulationConfig {
            density,
            shape: Shape::new(10, 10),
            ..Default::default()
        }
    }

    #[test]
    fn test_random_build_places_exactly_one_seed() {
        let config = config(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let lattice = build_random(&config, &mut rng).unwrap();

        let seeds = lattice
            .cells()
            .iter()
            .filter(|c| c.cooldown == config.cooldown_limit)
            .count();
        assert_eq!(seeds, 1);

        // everything else starts zeroed
        assert!(lattice
            .cells()
            .iter()
            .all(|c| c.heard_count == 0 && c.reached_count == 0));
        assert_eq!(
            lattice.cells().iter().filter(|c| c.cooldown != 0).count(),
            1
        );
    }

    #[test]
    fn test_seed_lands_on_occupied_cell() {
        let config = config(0.3);
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let lattice = build_random(&config, &mut rng).unwrap();
            let seeded = lattice
                .cells()
                .iter()
                .find(|c| c.cooldown == config.cooldown_limit)
                .expect("a seed cell must exist");
            assert!(seeded.exists);
        }
    }

    #[test]
    fn test_empty_strategy_lattice_exhausts_seed_search() {
        let config = config(0.5);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let result = build_from_strategy(&config, |shape| Lattice::new(shape), &mut rng);
        assert!(matches!(result, Err(SimError::SeedSearchExhausted { .. })));
    }

    #[test]
    fn test_strategy_shape_mismatch_rejected() {
        let config = config(0.5);
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let result =
            build_from_strategy(&config, |_| Lattice::new(Shape::new(2, 2)), &mut rng);
        assert!(matches!(result, Err(SimError::StrategyLattice(_))));
    }

    #[test]
    fn test_strategy_nonzero_counters_rejected() {
        let config = config(0.5);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let result = build_from_strategy(
            &config,
            |shape| {
                let mut lattice = Lattice::new(shape);
                lattice.set(
                    0,
                    0,
                    Cell {
                        exists: true,
                        susceptibility: 1.0,
                        cooldown: 3,
                        ..Default::default()
                    },
                );
                lattice
            },
            &mut rng,
        );
        assert!(matches!(result, Err(SimError::StrategyLattice(_))));
    }

    #[test]
    fn test_strategy_lattice_gets_seeded() {
        let config = config(0.5);
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let lattice = build_from_strategy(
            &config,
            |shape| {
                let mut lattice = Lattice::new(shape);
                for cell in lattice.cells_mut() {
                    cell.exists = true;
                    cell.susceptibility = 1.0 / 3.0;
                }
                lattice
            },
            &mut rng,
        )
        .unwrap();

        let seeds = lattice
            .cells()
            .iter()
            .filter(|c| c.cooldown == config.cooldown_limit)
            .count();
        assert_eq!(seeds, 1);
    }
}
