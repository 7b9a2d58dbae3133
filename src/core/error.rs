use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No occupied cell found to seed after {probes} random probes")]
    SeedSearchExhausted { probes: usize },

    #[error("Strategy lattice rejected: {0}")]
    StrategyLattice(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
