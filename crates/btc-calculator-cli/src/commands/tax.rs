use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use btc_calculator_core::constants::CORPORATE_TAX_RATE_STANDARD;
use btc_calculator_core::tax::{
    calculate_cgt, get_cgt_discount_message, validate_tax_scenario, TaxScenario,
};

use crate::input;

/// Arguments for an Australian CGT scenario
#[derive(Args)]
pub struct CgtArgs {
    /// Path to a JSON input file (TaxScenario shape)
    #[arg(long)]
    pub input: Option<String>,

    /// Acquisition date (YYYY-MM-DD)
    #[arg(long)]
    pub purchase_date: Option<NaiveDate>,

    /// Disposal date (YYYY-MM-DD)
    #[arg(long)]
    pub sale_date: Option<NaiveDate>,

    /// Original AUD cost of the holding
    #[arg(long)]
    pub cost_base: Option<Decimal>,

    /// AUD proceeds on disposal
    #[arg(long)]
    pub proceeds: Option<Decimal>,

    /// Corporate tax rate as a percentage
    #[arg(long, default_value_t = CORPORATE_TAX_RATE_STANDARD)]
    pub tax_rate: Decimal,

    /// Only validate the scenario and report violations
    #[arg(long)]
    pub check: bool,
}

pub fn run_cgt(args: CgtArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario: TaxScenario = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        from_flags(&args)?
    };

    if args.check {
        let errors = validate_tax_scenario(&scenario);
        return Ok(serde_json::json!({ "valid": errors.is_empty(), "errors": errors }));
    }

    let result = calculate_cgt(&scenario)?;
    let message = get_cgt_discount_message(result.holding_period_months);

    let mut value = serde_json::to_value(result)?;
    if let Value::Object(ref mut map) = value {
        map.insert("discount_message".to_string(), Value::String(message));
    }
    Ok(value)
}

fn from_flags(args: &CgtArgs) -> Result<TaxScenario, Box<dyn std::error::Error>> {
    let (Some(purchase_date), Some(sale_date)) = (args.purchase_date, args.sale_date) else {
        return Err("--purchase-date and --sale-date are required (or use --input / stdin)".into());
    };
    let (Some(cost_base), Some(proceeds)) = (args.cost_base, args.proceeds) else {
        return Err("--cost-base and --proceeds are required (or use --input / stdin)".into());
    };

    Ok(TaxScenario {
        purchase_date,
        sale_date,
        cost_base,
        proceeds,
        corporate_tax_rate: args.tax_rate,
    })
}
