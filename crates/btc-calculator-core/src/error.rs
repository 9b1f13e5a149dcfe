use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CalculatorError {
    /// Decimal has no infinity: compounding past its range must fail, not
    /// panic.
    pub(crate) fn overflow(field: &str) -> Self {
        CalculatorError::InvalidInput {
            field: field.into(),
            reason: "Result exceeds the representable numeric range".into(),
        }
    }
}

impl From<serde_json::Error> for CalculatorError {
    fn from(e: serde_json::Error) -> Self {
        CalculatorError::Serialization(e.to_string())
    }
}
