use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use btc_calculator_core::constants::{DEFAULT_CAGR_SCENARIOS, DEFAULT_PROJECTION_YEARS};
use btc_calculator_core::projection::{
    add_tax_scenario_to_projection, calculate_projection, validate_projection_input,
    ProjectionInput, ProjectionTaxInput,
};

use crate::input;

/// Preset growth assumptions, indexing into `DEFAULT_CAGR_SCENARIOS`.
#[derive(Debug, Clone, ValueEnum)]
pub enum GrowthPreset {
    Conservative,
    Base,
    Aggressive,
}

impl GrowthPreset {
    fn rate(&self) -> Decimal {
        let index = match self {
            GrowthPreset::Conservative => 0,
            GrowthPreset::Base => 1,
            GrowthPreset::Aggressive => 2,
        };
        DEFAULT_CAGR_SCENARIOS[index].rate
    }
}

/// Arguments for a future-value projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to a JSON input file (ProjectionInput shape)
    #[arg(long)]
    pub input: Option<String>,

    /// Current holding value in AUD
    #[arg(long)]
    pub current_value: Option<Decimal>,

    /// Expected CAGR as a decimal fraction (0.5 = 50%)
    #[arg(long, allow_hyphen_values = true, conflicts_with = "preset")]
    pub cagr: Option<Decimal>,

    /// Preset growth assumption instead of an explicit --cagr
    #[arg(long)]
    pub preset: Option<GrowthPreset>,

    /// Projection horizon in years
    #[arg(long, default_value_t = DEFAULT_PROJECTION_YEARS)]
    pub years: Decimal,

    /// Initial cost base for the after-tax overlay
    #[arg(long)]
    pub cost_base: Option<Decimal>,

    /// Corporate tax rate for the overlay, as a decimal fraction (0.30 = 30%)
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Holding period at the projected disposal, in whole months
    #[arg(long)]
    pub holding_months: Option<i64>,

    /// Only validate the input and report violations
    #[arg(long)]
    pub check: bool,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let projection_input: ProjectionInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        from_flags(&args)?
    };

    if args.check {
        let errors = validate_projection_input(&projection_input);
        return Ok(serde_json::json!({ "valid": errors.is_empty(), "errors": errors }));
    }

    let result = calculate_projection(&projection_input)?;

    // The after-tax overlay needs all three assumptions together.
    match (args.cost_base, args.tax_rate, args.holding_months) {
        (Some(cost_base), Some(tax_rate), Some(holding_months)) => {
            let taxed = add_tax_scenario_to_projection(
                &result,
                cost_base,
                &ProjectionTaxInput {
                    corporate_tax_rate: tax_rate,
                    holdings_period_months: holding_months,
                },
            );
            Ok(serde_json::to_value(taxed)?)
        }
        (None, None, None) => Ok(serde_json::to_value(result)?),
        _ => Err("after-tax projection needs --cost-base, --tax-rate, and --holding-months".into()),
    }
}

fn from_flags(args: &ProjectArgs) -> Result<ProjectionInput, Box<dyn std::error::Error>> {
    let Some(current_value) = args.current_value else {
        return Err("--current-value is required (or use --input / stdin)".into());
    };
    let Some(cagr) = args.cagr.or_else(|| args.preset.as_ref().map(GrowthPreset::rate)) else {
        return Err("--cagr or --preset is required (or use --input / stdin)".into());
    };

    Ok(ProjectionInput {
        current_value,
        expected_cagr: cagr,
        projection_horizon_years: args.years,
    })
}
