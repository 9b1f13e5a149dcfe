//! Future-value projections from an expected CAGR, with an optional
//! Australian CGT overlay on the projected disposal.
//!
//! The tax overlay here is deliberately a separate contract from
//! [`crate::tax`]: it takes a decimal tax rate (not a percentage), applies
//! the 50% discount only to positive gains held *strictly more* than 12
//! months, and reports differently named detail fields. Both shapes are
//! relied on by callers and are not unified.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::constants::{CGT_DISCOUNT_RATE, CGT_DISCOUNT_THRESHOLD_MONTHS, MAX_PROJECTION_YEARS};
use crate::error::CalculatorError;
use crate::types::{Money, Percent, Rate, YearValue, Years};
use crate::CalculatorResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a future-value projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Current holding value in AUD
    pub current_value: Money,
    /// Expected CAGR as a decimal fraction (0.5 = 50%)
    pub expected_cagr: Rate,
    /// Horizon in years; may be fractional, capped at 50
    pub projection_horizon_years: Years,
}

/// Output of a future-value projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub future_value: Money,
    /// Year-by-year compounded values for whole years 0..=horizon
    pub scenarios: Vec<YearValue>,
}

/// Tax assumptions for [`add_tax_scenario_to_projection`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionTaxInput {
    /// Corporate tax rate as a decimal fraction (0.30 = 30%)
    pub corporate_tax_rate: Rate,
    /// Holding period at the projected disposal, in whole months
    pub holdings_period_months: i64,
}

/// Tax detail attached to a projection. Field names intentionally differ
/// from [`crate::tax::TaxResult`]; see the module docs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionTaxDetails {
    pub capital_gain: Money,
    pub cgt_discount_applied: bool,
    pub taxable_gain: Money,
    pub tax_amount: Money,
    pub after_tax_value: Money,
}

/// A projection extended with an after-tax view of the final value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxedProjection {
    #[serde(flatten)]
    pub projection: ProjectionResult,
    pub future_value_after_tax: Money,
    pub tax_details: ProjectionTaxDetails,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compound a current value forward at the expected CAGR.
pub fn calculate_projection(input: &ProjectionInput) -> CalculatorResult<ProjectionResult> {
    if input.current_value <= Decimal::ZERO {
        return Err(CalculatorError::InvalidInput {
            field: "current_value".into(),
            reason: "Current value must be greater than zero".into(),
        });
    }
    if input.expected_cagr < Decimal::NEGATIVE_ONE {
        return Err(CalculatorError::InvalidInput {
            field: "expected_cagr".into(),
            reason: "Expected CAGR cannot be less than -100%".into(),
        });
    }
    if input.projection_horizon_years <= Decimal::ZERO {
        return Err(CalculatorError::InvalidInput {
            field: "projection_horizon_years".into(),
            reason: "Projection period must be greater than zero years".into(),
        });
    }
    if input.projection_horizon_years > MAX_PROJECTION_YEARS {
        return Err(CalculatorError::InvalidInput {
            field: "projection_horizon_years".into(),
            reason: "Projection period cannot exceed 50 years".into(),
        });
    }

    let one_plus_cagr = Decimal::ONE + input.expected_cagr;
    let future_value = compound(
        input.current_value,
        one_plus_cagr,
        input.projection_horizon_years,
    )?;

    // Whole-year series. A fractional horizon still compounds fully in
    // `future_value` above but the series stops at the last whole year.
    let mut scenarios = Vec::new();
    let mut year: i32 = 0;
    while Decimal::from(year) <= input.projection_horizon_years {
        scenarios.push(YearValue {
            year,
            value: compound(input.current_value, one_plus_cagr, Decimal::from(year))?,
        });
        year += 1;
    }

    Ok(ProjectionResult {
        future_value,
        scenarios,
    })
}

/// Overlay a CGT scenario on the projected final value.
pub fn add_tax_scenario_to_projection(
    projection: &ProjectionResult,
    initial_cost_base: Money,
    tax: &ProjectionTaxInput,
) -> TaxedProjection {
    let capital_gain = projection.future_value - initial_cost_base;

    // Discount only reduces a positive gain, and only past a full year of
    // holding (strictly more than 12 months).
    let (taxable_gain, cgt_discount_applied) = if capital_gain > Decimal::ZERO
        && tax.holdings_period_months > CGT_DISCOUNT_THRESHOLD_MONTHS
    {
        (capital_gain * CGT_DISCOUNT_RATE, true)
    } else {
        (capital_gain, false)
    };

    let tax_amount = taxable_gain * tax.corporate_tax_rate;
    let after_tax_value = projection.future_value - tax_amount;

    TaxedProjection {
        projection: projection.clone(),
        future_value_after_tax: after_tax_value,
        tax_details: ProjectionTaxDetails {
            capital_gain,
            cgt_discount_applied,
            taxable_gain,
            tax_amount,
            after_tax_value,
        },
    }
}

/// `value * growth^years`, failing instead of panicking when the result
/// leaves Decimal's representable range.
fn compound(value: Money, growth: Decimal, years: Years) -> CalculatorResult<Money> {
    growth
        .checked_powd(years)
        .and_then(|factor| value.checked_mul(factor))
        .ok_or_else(|| CalculatorError::overflow("projected_value"))
}

// ---------------------------------------------------------------------------
// Small pure helpers
// ---------------------------------------------------------------------------

/// Future value of `current_value` at `cagr` percent over `years`.
pub fn calculate_future_value(
    current_value: Money,
    cagr: Percent,
    years: Years,
) -> CalculatorResult<Money> {
    if years <= Decimal::ZERO || current_value <= Decimal::ZERO {
        return Err(CalculatorError::InvalidInput {
            field: "years/current_value".into(),
            reason: "Invalid input values for future value calculation".into(),
        });
    }
    if cagr <= -Decimal::ONE_HUNDRED {
        return Err(CalculatorError::InvalidInput {
            field: "cagr".into(),
            reason: "CAGR must be greater than -100%".into(),
        });
    }

    let growth = Decimal::ONE + cagr / Decimal::ONE_HUNDRED;
    compound(current_value, growth, years)
}

/// Present value that compounds to `future_value` at `cagr` percent over
/// `years`. Inverse of [`calculate_future_value`].
pub fn calculate_present_value(
    future_value: Money,
    cagr: Percent,
    years: Years,
) -> CalculatorResult<Money> {
    if years <= Decimal::ZERO || future_value <= Decimal::ZERO {
        return Err(CalculatorError::InvalidInput {
            field: "years/future_value".into(),
            reason: "Invalid input values for present value calculation".into(),
        });
    }
    if cagr <= -Decimal::ONE_HUNDRED {
        return Err(CalculatorError::InvalidInput {
            field: "cagr".into(),
            reason: "CAGR must be greater than -100%".into(),
        });
    }

    let growth = Decimal::ONE + cagr / Decimal::ONE_HUNDRED;
    let factor = growth
        .checked_powd(years)
        .ok_or_else(|| CalculatorError::overflow("present_value"))?;
    // A steep negative CAGR over many years can underflow the factor to
    // zero, so the division is checked too.
    future_value
        .checked_div(factor)
        .ok_or_else(|| CalculatorError::overflow("present_value"))
}

/// CAGR (percentage) required to grow `current_value` to `target_value`
/// over `years`.
pub fn calculate_required_cagr(
    current_value: Money,
    target_value: Money,
    years: Years,
) -> CalculatorResult<Percent> {
    if years <= Decimal::ZERO || current_value <= Decimal::ZERO {
        return Err(CalculatorError::InvalidInput {
            field: "years/current_value".into(),
            reason: "Invalid input values for CAGR calculation".into(),
        });
    }
    if target_value <= Decimal::ZERO {
        return Err(CalculatorError::InvalidInput {
            field: "target_value".into(),
            reason: "Target value must be positive".into(),
        });
    }

    let growth = (target_value / current_value)
        .checked_powd(Decimal::ONE / years)
        .ok_or_else(|| CalculatorError::overflow("required_cagr"))?;
    Ok((growth - Decimal::ONE) * Decimal::ONE_HUNDRED)
}

/// Years needed to grow `current_value` to `target_value` at `cagr` percent.
pub fn calculate_time_to_target(
    current_value: Money,
    target_value: Money,
    cagr: Percent,
) -> CalculatorResult<Years> {
    if cagr <= Decimal::ZERO || current_value <= Decimal::ZERO {
        return Err(CalculatorError::InvalidInput {
            field: "cagr/current_value".into(),
            reason: "Invalid input values for time calculation".into(),
        });
    }
    if target_value <= Decimal::ZERO {
        return Err(CalculatorError::InvalidInput {
            field: "target_value".into(),
            reason: "Target value must be positive".into(),
        });
    }

    let growth = Decimal::ONE + cagr / Decimal::ONE_HUNDRED;
    Ok((target_value / current_value).ln() / growth.ln())
}

/// Batch-style validation for form input: collects every violation instead
/// of failing on the first. Returns an empty list for a valid input.
pub fn validate_projection_input(input: &ProjectionInput) -> Vec<String> {
    let mut errors = Vec::new();

    if input.current_value <= Decimal::ZERO {
        errors.push("Current value must be greater than zero".to_string());
    }
    if input.expected_cagr < Decimal::NEGATIVE_ONE {
        errors.push("Expected CAGR cannot be less than -100%".to_string());
    }
    if input.projection_horizon_years <= Decimal::ZERO {
        errors.push("Projection period must be greater than zero years".to_string());
    }
    if input.projection_horizon_years > MAX_PROJECTION_YEARS {
        errors.push("Projection period cannot exceed 50 years".to_string());
    }

    errors
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn three_year_base_case() -> ProjectionInput {
        ProjectionInput {
            current_value: dec!(100000),
            expected_cagr: dec!(0.5),
            projection_horizon_years: dec!(3),
        }
    }

    fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
        let diff = (actual - expected).abs();
        assert!(
            diff < tolerance,
            "expected ~{}, got {} (diff {})",
            expected,
            actual,
            diff
        );
    }

    #[test]
    fn test_three_year_projection() {
        let result = calculate_projection(&three_year_base_case()).unwrap();

        // 100k * 1.5^3 = 337.5k
        assert_close(result.future_value, dec!(337500), dec!(0.0001));

        let expected = [
            (0, dec!(100000)),
            (1, dec!(150000)),
            (2, dec!(225000)),
            (3, dec!(337500)),
        ];
        assert_eq!(result.scenarios.len(), expected.len());
        for (scenario, (year, value)) in result.scenarios.iter().zip(expected) {
            assert_eq!(scenario.year, year);
            assert_close(scenario.value, value, dec!(0.0001));
        }
    }

    #[test]
    fn test_fractional_horizon() {
        let input = ProjectionInput {
            current_value: dec!(100000),
            expected_cagr: dec!(0.5),
            projection_horizon_years: dec!(2.5),
        };

        let result = calculate_projection(&input).unwrap();
        // Series stops at the last whole year...
        assert_eq!(result.scenarios.len(), 3);
        assert_eq!(result.scenarios.last().unwrap().year, 2);
        // ...but future_value compounds the full 2.5 years:
        // 100k * 1.5^2.5 ~ 275567.6
        assert_close(result.future_value, dec!(275567.6), dec!(0.1));
    }

    #[test]
    fn test_negative_cagr_projection() {
        let input = ProjectionInput {
            current_value: dec!(100000),
            expected_cagr: dec!(-0.5),
            projection_horizon_years: dec!(2),
        };

        let result = calculate_projection(&input).unwrap();
        assert_close(result.future_value, dec!(25000), dec!(0.0001));
    }

    #[test]
    fn test_projection_input_bounds() {
        let mut input = three_year_base_case();
        input.current_value = dec!(-5);
        assert!(calculate_projection(&input).is_err());

        let mut input = three_year_base_case();
        input.expected_cagr = dec!(-1.01);
        assert!(calculate_projection(&input).is_err());

        let mut input = three_year_base_case();
        input.projection_horizon_years = Decimal::ZERO;
        assert!(calculate_projection(&input).is_err());

        let mut input = three_year_base_case();
        input.projection_horizon_years = dec!(51);
        assert!(calculate_projection(&input).is_err());
    }

    #[test]
    fn test_projection_overflow_is_an_error() {
        // 300% CAGR over the maximum 50-year horizon passes validation but
        // 4^50 leaves Decimal's range.
        let input = ProjectionInput {
            current_value: dec!(100000),
            expected_cagr: dec!(3),
            projection_horizon_years: dec!(50),
        };

        match calculate_projection(&input).unwrap_err() {
            CalculatorError::InvalidInput { reason, .. } => {
                assert!(reason.contains("representable"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }

        assert!(calculate_future_value(dec!(100000), dec!(300), dec!(50)).is_err());
    }

    #[test]
    fn test_validate_projection_input_messages() {
        let input = ProjectionInput {
            current_value: dec!(-5),
            expected_cagr: dec!(0.5),
            projection_horizon_years: dec!(3),
        };

        let errors = validate_projection_input(&input);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Current value"));
    }

    #[test]
    fn test_validate_projection_input_collects_all() {
        let input = ProjectionInput {
            current_value: Decimal::ZERO,
            expected_cagr: dec!(-2),
            projection_horizon_years: dec!(60),
        };

        let errors = validate_projection_input(&input);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_validate_projection_input_clean() {
        assert!(validate_projection_input(&three_year_base_case()).is_empty());
    }

    #[test]
    fn test_tax_overlay_with_discount() {
        let projection = calculate_projection(&three_year_base_case()).unwrap();
        let taxed = add_tax_scenario_to_projection(
            &projection,
            dec!(100000),
            &ProjectionTaxInput {
                corporate_tax_rate: dec!(0.30),
                holdings_period_months: 36,
            },
        );

        // Gain 237.5k, discounted to 118.75k taxable, 35 625 tax
        assert_eq!(taxed.tax_details.capital_gain, dec!(237500));
        assert!(taxed.tax_details.cgt_discount_applied);
        assert_eq!(taxed.tax_details.taxable_gain, dec!(118750));
        assert_eq!(taxed.tax_details.tax_amount, dec!(35625));
        assert_eq!(taxed.future_value_after_tax, dec!(301875));
        assert_eq!(taxed.tax_details.after_tax_value, dec!(301875));
        assert_eq!(taxed.projection.future_value, projection.future_value);
    }

    #[test]
    fn test_tax_overlay_boundary_is_strict() {
        let projection = calculate_projection(&three_year_base_case()).unwrap();

        // Exactly 12 months does NOT qualify here, unlike the tax engine's
        // inclusive threshold.
        let at_12 = add_tax_scenario_to_projection(
            &projection,
            dec!(100000),
            &ProjectionTaxInput {
                corporate_tax_rate: dec!(0.30),
                holdings_period_months: 12,
            },
        );
        assert!(!at_12.tax_details.cgt_discount_applied);

        let at_13 = add_tax_scenario_to_projection(
            &projection,
            dec!(100000),
            &ProjectionTaxInput {
                corporate_tax_rate: dec!(0.30),
                holdings_period_months: 13,
            },
        );
        assert!(at_13.tax_details.cgt_discount_applied);
    }

    #[test]
    fn test_tax_overlay_loss_undiscounted() {
        let projection = calculate_projection(&three_year_base_case()).unwrap();
        let taxed = add_tax_scenario_to_projection(
            &projection,
            dec!(500000),
            &ProjectionTaxInput {
                corporate_tax_rate: dec!(0.30),
                holdings_period_months: 36,
            },
        );

        assert_eq!(taxed.tax_details.capital_gain, dec!(-162500));
        assert!(!taxed.tax_details.cgt_discount_applied);
        assert_eq!(taxed.tax_details.taxable_gain, dec!(-162500));
    }

    #[test]
    fn test_future_present_value_round_trip() {
        let current = dec!(12345.67);
        let fv = calculate_future_value(current, dec!(50), dec!(7)).unwrap();
        let recovered = calculate_present_value(fv, dec!(50), dec!(7)).unwrap();
        assert_close(recovered, current, dec!(0.0001));
    }

    #[test]
    fn test_future_value_basic() {
        let fv = calculate_future_value(dec!(100000), dec!(50), dec!(3)).unwrap();
        assert_close(fv, dec!(337500), dec!(0.0001));
    }

    #[test]
    fn test_required_cagr() {
        // Doubling in 2 years requires sqrt(2) - 1 ~ 41.42%
        let cagr = calculate_required_cagr(dec!(100), dec!(200), dec!(2)).unwrap();
        assert_close(cagr, dec!(41.4214), dec!(0.001));
    }

    #[test]
    fn test_time_to_target() {
        // Doubling at 100% CAGR takes exactly one year
        let years = calculate_time_to_target(dec!(100), dec!(200), dec!(100)).unwrap();
        assert_close(years, Decimal::ONE, dec!(0.0001));

        // Doubling at ~26% takes about 3 years
        let years = calculate_time_to_target(dec!(100), dec!(200), dec!(25.9921)).unwrap();
        assert_close(years, dec!(3), dec!(0.001));
    }

    #[test]
    fn test_helper_preconditions() {
        assert!(calculate_future_value(Decimal::ZERO, dec!(50), dec!(3)).is_err());
        assert!(calculate_future_value(dec!(100), dec!(-100), dec!(3)).is_err());
        assert!(calculate_present_value(dec!(100), dec!(50), Decimal::ZERO).is_err());
        assert!(calculate_required_cagr(dec!(100), dec!(200), Decimal::ZERO).is_err());
        assert!(calculate_required_cagr(dec!(100), Decimal::ZERO, dec!(2)).is_err());
        assert!(calculate_time_to_target(dec!(100), dec!(200), Decimal::ZERO).is_err());
        assert!(calculate_time_to_target(Decimal::ZERO, dec!(200), dec!(50)).is_err());
    }
}
