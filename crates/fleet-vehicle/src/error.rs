use thiserror::Error;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid vehicle configuration: {0}")]
    InvalidConfiguration(String),

    /// Live state broke an invariant; the vehicle is not stepped.
    #[error("corrupt vehicle state: {0}")]
    InvalidState(String),

    #[error("tick panicked: {0}")]
    Panicked(String),
}

pub type VehicleResult<T> = Result<T, VehicleError>;
