//! Historic CAGR analysis from user-supplied Bitcoin prices.
//!
//! The chart series is a straight-line monthly interpolation between the two
//! endpoint prices, not a historical price fetch: given the same endpoints
//! the result is fully deterministic. Volatility and drawdown are computed on
//! that interpolated series, so they inherit its smoothness and understate
//! the real figures. This is a known limitation of the calculator, not a bug.

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::{CHART_DAYS_PER_STEP, DAYS_PER_YEAR};
use crate::error::CalculatorError;
use crate::types::{Money, Percent, PricePoint, Years};
use crate::CalculatorResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a historic CAGR computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CagrInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Initial investment in AUD. Ignored when `initial_btc` is positive.
    #[serde(default)]
    pub initial_investment: Money,
    /// Initial holding in BTC. Takes precedence over `initial_investment`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_btc: Option<Decimal>,
    /// Bitcoin price in AUD at `start_date`, user supplied
    pub start_bitcoin_price: Money,
    /// Bitcoin price in AUD at `end_date`, user supplied
    pub end_bitcoin_price: Money,
}

/// Output of a historic CAGR computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CagrResult {
    /// Realized compound annual growth rate, as a percentage
    pub cagr: Percent,
    /// Ending value minus initial value, in AUD
    pub total_return: Money,
    /// Elapsed time in fractional years (365.25-day year)
    pub years: Years,
    pub initial_value: Money,
    pub ending_value: Money,
    /// Annualized month-over-month volatility of the interpolated series,
    /// as a percentage
    pub volatility: Percent,
    /// Largest peak-to-trough decline in the interpolated series,
    /// as a percentage
    pub max_drawdown: Percent,
    /// Monthly interpolated price/value series for charting
    pub price_data: Vec<PricePoint>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the realized CAGR of a Bitcoin holding between two dates, using
/// user-provided endpoint prices.
pub fn calculate_cagr(input: &CagrInput) -> CalculatorResult<CagrResult> {
    if input.start_bitcoin_price <= Decimal::ZERO || input.end_bitcoin_price <= Decimal::ZERO {
        return Err(CalculatorError::InvalidPrice(
            "Bitcoin prices must be positive".into(),
        ));
    }
    if input.start_date >= input.end_date {
        return Err(CalculatorError::InvalidDateRange(
            "Start date must be before end date".into(),
        ));
    }
    let btc_given = input.initial_btc.is_some_and(|b| b > Decimal::ZERO);
    if input.initial_investment <= Decimal::ZERO && !btc_given {
        return Err(CalculatorError::InvalidAmount(
            "Initial investment or BTC amount must be positive".into(),
        ));
    }

    let days = (input.end_date - input.start_date).num_days();
    let years = Decimal::from(days) / DAYS_PER_YEAR;
    // Already implied by the date-order check above
    if years <= Decimal::ZERO {
        return Err(CalculatorError::InvalidDateRange(
            "Time period must be greater than zero".into(),
        ));
    }

    // Resolve the BTC amount: a user supplies either an AUD investment or a
    // BTC holding; BTC wins when both are present.
    let (btc_amount, initial_value) = if btc_given {
        let amount = input.initial_btc.unwrap_or_default();
        (amount, amount * input.start_bitcoin_price)
    } else {
        (
            input.initial_investment / input.start_bitcoin_price,
            input.initial_investment,
        )
    };
    let ending_value = btc_amount * input.end_bitcoin_price;

    let growth = (ending_value / initial_value)
        .checked_powd(Decimal::ONE / years)
        .ok_or_else(|| CalculatorError::overflow("cagr"))?;
    let cagr = (growth - Decimal::ONE) * Decimal::ONE_HUNDRED;
    let total_return = ending_value - initial_value;

    let price_data = interpolate_price_data(
        input.start_date,
        days,
        input.start_bitcoin_price,
        input.end_bitcoin_price,
        btc_amount,
    );
    let prices: Vec<Money> = price_data.iter().map(|p| p.price).collect();
    let volatility = annualized_volatility(&prices) * Decimal::ONE_HUNDRED;
    let max_drawdown = max_drawdown(&prices) * Decimal::ONE_HUNDRED;

    Ok(CagrResult {
        cagr,
        total_return,
        years,
        initial_value,
        ending_value,
        volatility,
        max_drawdown,
        price_data,
    })
}

/// CAGR for a bare initial/final value pair over a period, as a percentage.
pub fn calculate_simple_cagr(
    initial_value: Money,
    final_value: Money,
    years: Years,
) -> CalculatorResult<Percent> {
    if years <= Decimal::ZERO || initial_value <= Decimal::ZERO {
        return Err(CalculatorError::InvalidInput {
            field: "years/initial_value".into(),
            reason: "Invalid input values for CAGR calculation".into(),
        });
    }
    if final_value <= Decimal::ZERO {
        return Err(CalculatorError::InvalidInput {
            field: "final_value".into(),
            reason: "Final value must be positive".into(),
        });
    }

    let growth = (final_value / initial_value)
        .checked_powd(Decimal::ONE / years)
        .ok_or_else(|| CalculatorError::overflow("cagr"))?;
    Ok((growth - Decimal::ONE) * Decimal::ONE_HUNDRED)
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

/// Straight-line monthly price points between the two endpoint prices over
/// `ceil(days / 30)` steps. Dates are stepped by calendar month, clamping to
/// month end, so the series stays monotonically increasing by date.
fn interpolate_price_data(
    start_date: NaiveDate,
    days: i64,
    start_price: Money,
    end_price: Money,
    btc_amount: Decimal,
) -> Vec<PricePoint> {
    // days >= 1 here, so the ceiling is always at least one step
    let steps = (days + CHART_DAYS_PER_STEP - 1) / CHART_DAYS_PER_STEP;
    let step_change = (end_price - start_price) / Decimal::from(steps);

    let mut data = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let date = start_date
            .checked_add_months(Months::new(i as u32))
            .unwrap_or(NaiveDate::MAX);
        let price = start_price + step_change * Decimal::from(i);
        data.push(PricePoint {
            date,
            price,
            value: btc_amount * price,
        });
    }
    data
}

// ---------------------------------------------------------------------------
// Risk statistics (on the interpolated series)
// ---------------------------------------------------------------------------

/// Population standard deviation of month-over-month simple returns,
/// annualized by sqrt(12). Returned as a decimal fraction.
fn annualized_volatility(prices: &[Money]) -> Decimal {
    if prices.len() < 2 {
        return Decimal::ZERO;
    }

    let returns: Vec<Decimal> = prices
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();

    let n = Decimal::from(returns.len());
    let mean = returns.iter().sum::<Decimal>() / n;
    let variance = returns
        .iter()
        .map(|r| (r - mean) * (r - mean))
        .sum::<Decimal>()
        / n;

    variance.sqrt().unwrap_or_default() * dec!(12).sqrt().unwrap_or_default()
}

/// Largest peak-to-trough decline, as a decimal fraction.
fn max_drawdown(prices: &[Money]) -> Decimal {
    if prices.len() < 2 {
        return Decimal::ZERO;
    }

    let mut peak = prices[0];
    let mut max_dd = Decimal::ZERO;
    for &price in prices {
        if price > peak {
            peak = price;
        }
        let drawdown = (peak - price) / peak;
        if drawdown > max_dd {
            max_dd = drawdown;
        }
    }
    max_dd
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
