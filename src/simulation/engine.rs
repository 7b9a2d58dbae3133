//! Simulation engine - the two-phase per-iteration update rule
//!
//! Each `step()` runs two strictly sequential passes over the lattice:
//! spread, then decision. Who spreads in an iteration is fully determined by
//! cooldown state frozen at the start of the iteration, so a rumor travels
//! at most one grid hop per step.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::lattice::{factory, Lattice, Shape};
use crate::simulation::stats;

/// Probability bonus applied when a cell heard the rumor from two or more
/// neighbors in the same iteration
///
/// Deliberately added without clamping: a cell whose base susceptibility
/// exceeds 2/3 becomes certain to spread after multi-source hearing.
pub const REINFORCEMENT_BONUS: f64 = 1.0 / 3.0;

/// One rumor-propagation simulation over an exclusively owned lattice
///
/// The RNG is owned per instance and seeded from the configuration, so a
/// run is reproducible from its config alone and independent instances can
/// execute in parallel without shared state.
pub struct Simulation {
    lattice: Lattice,
    cooldown_limit: u32,
    iterations: u32,
    density: f64,
    tick: u64,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Build a simulation over a freshly randomized lattice
    ///
    /// Validates the configuration before any sampling happens.
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let lattice = factory::build_random(config, &mut rng)?;
        Ok(Self::assemble(lattice, config, rng))
    }

    /// Build a simulation over a strategy-supplied lattice
    ///
    /// The strategy replaces the randomized population; seeding and the
    /// update rule are unchanged.
    pub fn with_strategy<F>(config: &SimulationConfig, strategy: F) -> Result<Self>
    where
        F: FnOnce(Shape) -> Lattice,
    {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let lattice = factory::build_from_strategy(config, strategy, &mut rng)?;
        Ok(Self::assemble(lattice, config, rng))
    }

    /// Build a simulation over a caller-prepared lattice, skipping the
    /// factory's random seed placement
    ///
    /// The caller is responsible for having marked an initial spreader
    /// (cooldown pre-set to the limit). Intended for fixed scenarios where
    /// the seed position matters.
    pub fn from_lattice(lattice: Lattice, config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self::assemble(lattice, config, rng))
    }

    fn assemble(lattice: Lattice, config: &SimulationConfig, rng: ChaCha8Rng) -> Self {
        Self {
            lattice,
            cooldown_limit: config.cooldown_limit,
            iterations: config.iterations,
            density: config.density,
            tick: 0,
            rng,
        }
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Iterations executed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Configured iteration budget for a full run
    pub fn budget(&self) -> u32 {
        self.iterations
    }

    /// Advance the lattice by exactly one iteration
    pub fn step(&mut self) {
        let shape = self.lattice.shape();
        let limit = self.cooldown_limit;

        // Reset: hearing influence never carries across iterations
        for cell in self.lattice.cells_mut() {
            cell.heard_count = 0;
        }

        // Spread phase. Each cell's cooldown is only ever written by the
        // cell itself, so a single in-place pass sees every cooldown as it
        // stood at phase start.
        for row in 0..shape.rows {
            for col in 0..shape.cols {
                let cell = match self.lattice.get(row, col) {
                    Some(c) if c.exists => *c,
                    _ => continue,
                };

                if cell.cooldown == limit {
                    for (nr, nc) in shape.neighbors(row, col) {
                        if let Some(neighbor) = self.lattice.get_mut(nr, nc) {
                            if neighbor.exists {
                                neighbor.heard_count += 1;
                                neighbor.reached_count += 1;
                            }
                        }
                    }
                    if let Some(cell) = self.lattice.get_mut(row, col) {
                        cell.cooldown -= 1;
                    }
                } else if cell.cooldown > 0 {
                    if let Some(cell) = self.lattice.get_mut(row, col) {
                        cell.cooldown -= 1;
                    }
                }
            }
        }

        // Decision phase: only cells out of cooldown after the spread pass
        // may commit to spreading next iteration.
        for cell in self.lattice.cells_mut() {
            if !cell.exists || cell.cooldown > 0 {
                continue;
            }
            let threshold = match cell.heard_count {
                0 => continue,
                1 => cell.susceptibility,
                _ => cell.susceptibility + REINFORCEMENT_BONUS,
            };
            if self.rng.gen::<f64>() < threshold {
                cell.cooldown = limit;
            }
        }

        self.tick += 1;
    }

    /// Step `iterations` times, capturing an independent snapshot of the
    /// lattice after each step
    pub fn run(&mut self, iterations: u32) -> Vec<Lattice> {
        let mut frames = Vec::with_capacity(iterations as usize);
        for _ in 0..iterations {
            self.step();
            frames.push(self.lattice.clone());
        }
        tracing::debug!(
            "run complete: {} iterations, {} cells reached",
            iterations,
            self.lattice.count_reached()
        );
        frames
    }

    /// As [`run`](Self::run), additionally sampling `percent_reached` every
    /// `sample_stride` iterations
    ///
    /// Produces `iterations / sample_stride` samples; trailing iterations
    /// short of a full stride contribute no extra sample.
    pub fn run_with_stats(
        &mut self,
        iterations: u32,
        sample_stride: u32,
    ) -> (Vec<Lattice>, Vec<f64>) {
        let mut frames = Vec::with_capacity(iterations as usize);
        let mut series = Vec::with_capacity((iterations / sample_stride.max(1)) as usize);
        for i in 1..=iterations {
            self.step();
            frames.push(self.lattice.clone());
            if sample_stride > 0 && i % sample_stride == 0 {
                series.push(stats::percent_reached(&self.lattice, self.density));
            }
        }
        (frames, series)
    }

    /// Step through the full configured budget without capturing frames
    ///
    /// Used by the statistics path, where only the finished lattice matters.
    pub fn run_to_completion(&mut self) {
        for _ in 0..self.iterations {
            self.step();
        }
    }

    /// Fraction of the expected population reached so far
    pub fn percent_reached(&self) -> f64 {
        stats::percent_reached(&self.lattice, self.density)
    }
}
