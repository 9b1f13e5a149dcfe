pub mod constants;
pub mod error;
pub mod types;

#[cfg(feature = "cagr")]
pub mod cagr;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "projection")]
pub mod projection;

pub use error::CalculatorError;
pub use types::*;

/// Standard result type for all calculator operations
pub type CalculatorResult<T> = Result<T, CalculatorError>;
