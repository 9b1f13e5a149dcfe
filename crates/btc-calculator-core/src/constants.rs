//! Domain constants shared across the calculator engines.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Percent, Rate, Years};

/// Average year length in days, accounting for leap years
pub const DAYS_PER_YEAR: Decimal = dec!(365.25);

/// Average month length in days, used for CGT holding periods
pub const DAYS_PER_MONTH: Decimal = dec!(30.44);

/// Bucket size for the interpolated chart series
pub const CHART_DAYS_PER_STEP: i64 = 30;

/// Minimum holding period for the Australian CGT discount
pub const CGT_DISCOUNT_THRESHOLD_MONTHS: i64 = 12;

/// CGT discount applied to gains on assets held past the threshold
pub const CGT_DISCOUNT_RATE: Rate = dec!(0.5);

/// Longest projection horizon the calculator accepts
pub const MAX_PROJECTION_YEARS: Years = dec!(50);

/// Default projection horizon
pub const DEFAULT_PROJECTION_YEARS: Years = dec!(5);

/// Standard Australian corporate tax rate (turnover >= $50M)
pub const CORPORATE_TAX_RATE_STANDARD: Percent = dec!(30);

/// Small-business corporate tax rate (turnover < $50M)
pub const CORPORATE_TAX_RATE_SMALL_BUSINESS: Percent = dec!(25);

/// A named expected-CAGR assumption for projection presets
#[derive(Debug, Clone, Copy)]
pub struct CagrScenario {
    pub label: &'static str,
    /// Expected CAGR as a decimal fraction
    pub rate: Rate,
}

/// Preset growth assumptions offered by the calculator UI
pub const DEFAULT_CAGR_SCENARIOS: [CagrScenario; 3] = [
    CagrScenario {
        label: "Conservative (30% CAGR)",
        rate: dec!(0.30),
    },
    CagrScenario {
        label: "Base (50% CAGR)",
        rate: dec!(0.50),
    },
    CagrScenario {
        label: "Aggressive (70% CAGR)",
        rate: dec!(0.70),
    },
];
