use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use btc_calculator_core::cagr::{calculate_cagr, CagrInput};

use crate::input;

/// Arguments for historic CAGR analysis
#[derive(Args)]
pub struct CagrArgs {
    /// Path to a JSON input file (CagrInput shape)
    #[arg(long)]
    pub input: Option<String>,

    /// Start of the holding period (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// End of the holding period (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Initial investment in AUD
    #[arg(long, default_value = "0")]
    pub investment: Decimal,

    /// Initial holding in BTC (takes precedence over --investment)
    #[arg(long)]
    pub btc: Option<Decimal>,

    /// Bitcoin price in AUD at the start date
    #[arg(long)]
    pub start_price: Option<Decimal>,

    /// Bitcoin price in AUD at the end date
    #[arg(long)]
    pub end_price: Option<Decimal>,
}

pub fn run_cagr(args: CagrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cagr_input: CagrInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        from_flags(&args)?
    };

    let result = calculate_cagr(&cagr_input)?;
    Ok(serde_json::to_value(result)?)
}

fn from_flags(args: &CagrArgs) -> Result<CagrInput, Box<dyn std::error::Error>> {
    let (Some(start_date), Some(end_date)) = (args.start_date, args.end_date) else {
        return Err("--start-date and --end-date are required (or use --input / stdin)".into());
    };
    let (Some(start_price), Some(end_price)) = (args.start_price, args.end_price) else {
        return Err("--start-price and --end-price are required (or use --input / stdin)".into());
    };

    Ok(CagrInput {
        start_date,
        end_date,
        initial_investment: args.investment,
        initial_btc: args.btc,
        start_bitcoin_price: start_price,
        end_bitcoin_price: end_price,
    })
}
