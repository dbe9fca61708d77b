// Match setup errors: raised before the tick loop starts, never during it

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error("A match needs at least one tank")]
    NoTanks,
    #[error("Tank {tank} has {count} sensors, the maximum is {max}")]
    TooManySensors { tank: String, count: usize, max: usize },
    #[error("Tank {tank} sensor {index} has invalid range {range}")]
    InvalidSensorRange {
        tank: String,
        index: usize,
        range: f64,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Could not place {kind} #{index} without overlapping after {attempts} attempts")]
    PlacementFailed {
        kind: &'static str,
        index: usize,
        attempts: u32,
    },
}
