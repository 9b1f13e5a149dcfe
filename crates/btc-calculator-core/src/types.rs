use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values, denominated in AUD. Wraps Decimal to prevent
/// accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimal fractions (0.5 = 50%).
pub type Rate = Decimal;

/// Rates expressed as percentages (74.06 = 74.06%). Calculator results and
/// tax rates arrive in this form.
pub type Percent = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// A single point in the charting price series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    /// Bitcoin price in AUD
    pub price: Money,
    /// Holding value at this price
    pub value: Money,
}

/// A single year in a projection scenario series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value: Money,
}
