use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use kloan_core::eligibility::jeonse::{self, JeonseEligibilityInput};
use kloan_core::session::SessionRecord;

use crate::commands::history;
use crate::input;

/// Arguments for jeonse product-tier screening
#[derive(Args)]
pub struct JeonseArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Applicant age
    #[arg(long)]
    pub age: Option<u32>,

    /// Annual gross income (KRW)
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Married applicant
    #[arg(long)]
    pub married: bool,

    /// Years since marriage
    #[arg(long, default_value = "0")]
    pub years_married: i64,

    /// Lease deposit amount (KRW)
    #[arg(long)]
    pub deposit: Option<Decimal>,

    /// Appraised property value (KRW)
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Requested loan amount (KRW)
    #[arg(long)]
    pub requested: Option<Decimal>,

    /// Append the verdict to this session-history file (JSON lines)
    #[arg(long)]
    pub history: Option<String>,
}

pub fn run_jeonse(args: JeonseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let jeonse_input: JeonseEligibilityInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        JeonseEligibilityInput {
            age: args.age.ok_or("--age is required (or provide --input)")?,
            annual_income: args
                .annual_income
                .ok_or("--annual-income is required (or provide --input)")?,
            is_married: args.married,
            years_married: args.years_married,
            deposit_amount: args
                .deposit
                .ok_or("--deposit is required (or provide --input)")?,
            property_value: args
                .property_value
                .ok_or("--property-value is required (or provide --input)")?,
            requested_amount: args
                .requested
                .ok_or("--requested is required (or provide --input)")?,
        }
    };

    let result = jeonse::evaluate_jeonse(&jeonse_input)?;
    let value = serde_json::to_value(&result)?;

    if let Some(ref path) = args.history {
        let record = SessionRecord::now(
            "jeonse",
            serde_json::to_value(&jeonse_input)?,
            value.clone(),
        );
        history::append_record(path, &record)?;
    }

    Ok(value)
}
