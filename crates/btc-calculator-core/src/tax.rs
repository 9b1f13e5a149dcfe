//! Australian capital gains tax for Bitcoin disposals, per ATO rules as of
//! 2025: gains on assets held at least 12 months attract a 50% CGT discount.
//!
//! Losses are carried through the same arithmetic (negative gain, negative
//! tax), which is mathematically consistent but simpler than actual ATO
//! loss-offset rules.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::constants::{
    CGT_DISCOUNT_RATE, CGT_DISCOUNT_THRESHOLD_MONTHS, DAYS_PER_MONTH, DAYS_PER_YEAR,
};
use crate::error::CalculatorError;
use crate::types::{Money, Percent, Rate};
use crate::CalculatorResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single disposal scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxScenario {
    pub purchase_date: NaiveDate,
    pub sale_date: NaiveDate,
    /// Original AUD cost of the holding
    pub cost_base: Money,
    /// AUD proceeds on disposal
    pub proceeds: Money,
    /// Corporate tax rate as a percentage (30 for 30%)
    pub corporate_tax_rate: Percent,
}

/// CGT outcome for a disposal scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxResult {
    /// Proceeds minus cost base; negative for a loss
    pub capital_gain: Money,
    /// 0 or 0.5
    pub cgt_discount: Rate,
    pub taxable_gain: Money,
    pub tax_payable: Money,
    pub after_tax_proceeds: Money,
    /// CAGR on cost base to after-tax proceeds, as a percentage
    pub after_tax_cagr: Percent,
    /// Whole months held, floor of elapsed days / 30.44
    pub holding_period_months: i64,
}

/// Before/after comparison produced by [`calculate_tax_impact_on_cagr`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxImpact {
    pub before_tax_cagr: Percent,
    pub after_tax_cagr: Percent,
    /// Percentage points of CAGR lost to tax
    pub tax_impact: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute Australian CGT for a Bitcoin disposal.
pub fn calculate_cgt(scenario: &TaxScenario) -> CalculatorResult<TaxResult> {
    if scenario.sale_date <= scenario.purchase_date {
        return Err(CalculatorError::InvalidDateRange(
            "Sale date must be after purchase date".into(),
        ));
    }
    if scenario.cost_base <= Decimal::ZERO {
        return Err(CalculatorError::InvalidAmount(
            "Cost base must be greater than zero".into(),
        ));
    }
    if scenario.proceeds <= Decimal::ZERO {
        return Err(CalculatorError::InvalidAmount(
            "Proceeds must be greater than zero".into(),
        ));
    }
    if scenario.corporate_tax_rate < Decimal::ZERO
        || scenario.corporate_tax_rate > Decimal::ONE_HUNDRED
    {
        return Err(CalculatorError::InvalidInput {
            field: "corporate_tax_rate".into(),
            reason: "Corporate tax rate must be between 0% and 100%".into(),
        });
    }

    let days = (scenario.sale_date - scenario.purchase_date).num_days();
    let holding_period_months = (Decimal::from(days) / DAYS_PER_MONTH)
        .floor()
        .to_i64()
        .unwrap_or(0);

    let capital_gain = scenario.proceeds - scenario.cost_base;

    let cgt_discount = if holding_period_months >= CGT_DISCOUNT_THRESHOLD_MONTHS {
        CGT_DISCOUNT_RATE
    } else {
        Decimal::ZERO
    };

    let taxable_gain = capital_gain * (Decimal::ONE - cgt_discount);
    let tax_payable = taxable_gain * (scenario.corporate_tax_rate / Decimal::ONE_HUNDRED);
    let after_tax_proceeds = scenario.proceeds - tax_payable;

    // Unreachable given the date check above; kept as a guard so the powd
    // exponent is always finite.
    let years = Decimal::from(days) / DAYS_PER_YEAR;
    let after_tax_cagr = if years > Decimal::ZERO {
        let growth = (after_tax_proceeds / scenario.cost_base)
            .checked_powd(Decimal::ONE / years)
            .ok_or_else(|| CalculatorError::overflow("after_tax_cagr"))?;
        (growth - Decimal::ONE) * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    Ok(TaxResult {
        capital_gain,
        cgt_discount,
        taxable_gain,
        tax_payable,
        after_tax_proceeds,
        after_tax_cagr,
        holding_period_months,
    })
}

/// Compute CGT for several scenarios side by side.
pub fn calculate_multiple_tax_scenarios(
    scenarios: &[TaxScenario],
) -> CalculatorResult<Vec<TaxResult>> {
    scenarios.iter().map(calculate_cgt).collect()
}

/// How much CAGR a disposal scenario gives up to tax.
pub fn calculate_tax_impact_on_cagr(
    before_tax_cagr: Percent,
    scenario: &TaxScenario,
) -> CalculatorResult<TaxImpact> {
    let tax_result = calculate_cgt(scenario)?;

    Ok(TaxImpact {
        before_tax_cagr,
        after_tax_cagr: tax_result.after_tax_cagr,
        tax_impact: before_tax_cagr - tax_result.after_tax_cagr,
    })
}

/// Human-readable CGT discount eligibility for a holding period. The 12-month
/// threshold here must match [`calculate_cgt`]'s discount rule.
pub fn get_cgt_discount_message(holding_period_months: i64) -> String {
    if holding_period_months >= CGT_DISCOUNT_THRESHOLD_MONTHS {
        format!(
            "Eligible for 50% CGT discount (held for {} months)",
            holding_period_months
        )
    } else {
        let months_to_eligibility = CGT_DISCOUNT_THRESHOLD_MONTHS - holding_period_months;
        format!(
            "Not eligible for CGT discount. Need {} more months for 50% discount.",
            months_to_eligibility
        )
    }
}

/// Effective tax rate (percentage) once the CGT discount is applied.
pub fn calculate_effective_tax_rate(
    corporate_tax_rate: Percent,
    holding_period_months: i64,
) -> Percent {
    let cgt_discount = if holding_period_months >= CGT_DISCOUNT_THRESHOLD_MONTHS {
        CGT_DISCOUNT_RATE
    } else {
        Decimal::ZERO
    };
    corporate_tax_rate * (Decimal::ONE - cgt_discount)
}

/// Batch-style validation for form input: collects every violation instead of
/// failing on the first. Returns an empty list for a valid scenario.
pub fn validate_tax_scenario(scenario: &TaxScenario) -> Vec<String> {
    let mut errors = Vec::new();

    if scenario.sale_date <= scenario.purchase_date {
        errors.push("Sale date must be after purchase date".to_string());
    }
    if scenario.cost_base <= Decimal::ZERO {
        errors.push("Cost base must be greater than zero".to_string());
    }
    if scenario.proceeds <= Decimal::ZERO {
        errors.push("Proceeds must be greater than zero".to_string());
    }
    if scenario.corporate_tax_rate < Decimal::ZERO
        || scenario.corporate_tax_rate > Decimal::ONE_HUNDRED
    {
        errors.push("Corporate tax rate must be between 0% and 100%".to_string());
    }

    errors
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
