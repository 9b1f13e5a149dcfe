mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::cagr::CagrArgs;
use commands::projection::ProjectArgs;
use commands::tax::CgtArgs;

/// Bitcoin treasury calculator
#[derive(Parser)]
#[command(
    name = "btcalc",
    version,
    about = "Bitcoin treasury calculator with decimal precision",
    long_about = "Computes historic CAGR from user-supplied Bitcoin prices, \
                  Australian capital gains tax on disposals, and future-value \
                  projections with optional after-tax overlays. All arithmetic \
                  uses 128-bit decimals."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Historic CAGR, volatility, and drawdown from endpoint prices
    Cagr(CagrArgs),
    /// Australian CGT on a Bitcoin disposal
    Cgt(CgtArgs),
    /// Future-value projection from an expected CAGR
    Project(ProjectArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Cagr(args) => commands::cagr::run_cagr(args),
        Commands::Cgt(args) => commands::tax::run_cgt(args),
        Commands::Project(args) => commands::projection::run_project(args),
        Commands::Version => {
            println!("btcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
