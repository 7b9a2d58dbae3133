//! Rumor Lattice - stochastic cellular automaton for rumor propagation
//!
//! Models a rumor traveling over a 2-D population lattice in discrete time.
//! Each occupied cell carries a fixed susceptibility level; every iteration
//! runs a spread phase (active cells notify their von Neumann neighbors)
//! followed by a decision phase (cells freshly out of cooldown decide
//! whether to repeat the rumor next iteration).

pub mod core;
pub mod lattice;
pub mod simulation;

pub use crate::core::config::SimulationConfig;
pub use crate::core::error::{Result, SimError};
pub use crate::lattice::{Cell, Lattice, Shape};
pub use crate::simulation::Simulation;
