use thiserror::Error;

/// Configuration errors raised while building selection components.
///
/// Selection itself never fails: an empty candidate set or an unreachable
/// target rate is reported as `None`, not as an error.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum AbrError {
    #[error("buffer watermarks must satisfy 0 <= low < high (low={low}, high={high})")]
    InvalidWatermarks { low: f64, high: f64 },

    #[error("moving average bandwidth decay must be between 0 and 1 (got {0})")]
    InvalidDecay(f64),

    #[error("invalid parameter value: {name}={value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

pub type AbrResult<T> = Result<T, AbrError>;
