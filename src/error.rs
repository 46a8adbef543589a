use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Plotting failed: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, SignalError>;
