pub mod engine;
pub mod stats;

pub use engine::{Simulation, REINFORCEMENT_BONUS};
pub use stats::{average_over_repeats, average_percent_reached, percent_reached};
