mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::history::HistoryArgs;
use commands::jeonse::JeonseArgs;
use commands::mortgage::{EvaluateArgs, MaxLoanArgs};
use commands::payment::PaymentArgs;

/// Korean housing-loan eligibility screening
#[derive(Parser)]
#[command(
    name = "kloan",
    version,
    about = "Korean housing-loan eligibility screening (DSR/LTV)",
    long_about = "A CLI for screening Korean residential mortgage and jeonse \
                  (lease-deposit) loans with decimal precision. Evaluates DSR \
                  and LTV compliance, computes maximum permissible loan \
                  amounts under stressed rates, and keeps a per-session \
                  history of verdicts."
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
    /// Evaluate a proposed mortgage against the DSR and LTV ceilings
    Evaluate(EvaluateArgs),
    /// Maximum permissible new-loan principal for a rate and term
    MaxLoan(MaxLoanArgs),
    /// Periodic payment for a single loan
    Payment(PaymentArgs),
    /// Lease-deposit (jeonse) product-tier eligibility
    Jeonse(JeonseArgs),
    /// Show a session-history file, most recent first
    History(HistoryArgs),
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
        Commands::Evaluate(args) => commands::mortgage::run_evaluate(args),
        Commands::MaxLoan(args) => commands::mortgage::run_max_loan(args),
        Commands::Payment(args) => commands::payment::run_payment(args),
        Commands::Jeonse(args) => commands::jeonse::run_jeonse(args),
        Commands::History(args) => commands::history::run_history(args),
        Commands::Version => {
            println!("kloan {}", env!("CARGO_PKG_VERSION"));
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
