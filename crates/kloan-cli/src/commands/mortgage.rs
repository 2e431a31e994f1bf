use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use kloan_core::eligibility::mortgage::{
    self, MaxLoanInput, MortgageEligibilityInput,
};
use kloan_core::eligibility::policy::EvaluationPolicy;
use kloan_core::session::SessionRecord;
use kloan_core::types::{ApplicantProfile, RateStructure, Region};

use crate::commands::history;
use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum PolicyPreset {
    /// Baseline screening rules
    Standard,
    /// Existing collateral loans counted interest-only, no first-time cap
    CollateralScreen,
    /// Regional stress relief switched off
    NoRegionalRelief,
}

impl PolicyPreset {
    fn to_policy(&self) -> EvaluationPolicy {
        match self {
            PolicyPreset::Standard => EvaluationPolicy::standard(),
            PolicyPreset::CollateralScreen => EvaluationPolicy::collateral_screen(),
            PolicyPreset::NoRegionalRelief => EvaluationPolicy::no_regional_relief(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RegionArg {
    Seoul,
    Gyeonggi,
    Busan,
    Other,
}

impl From<RegionArg> for Region {
    fn from(value: RegionArg) -> Self {
        match value {
            RegionArg::Seoul => Region::Seoul,
            RegionArg::Gyeonggi => Region::Gyeonggi,
            RegionArg::Busan => Region::Busan,
            RegionArg::Other => Region::Other,
        }
    }
}

/// Arguments for full mortgage eligibility screening
#[derive(Args)]
pub struct EvaluateArgs {
    /// Path to JSON input file (applicant, loans, rate structure)
    #[arg(long)]
    pub input: Option<String>,

    /// Policy preset; overrides any policy carried in the input JSON
    #[arg(long)]
    pub policy: Option<PolicyPreset>,

    /// Append the verdict to this session-history file (JSON lines)
    #[arg(long)]
    pub history: Option<String>,
}

/// Arguments for the reverse maximum-loan calculation
#[derive(Args)]
pub struct MaxLoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual gross income (KRW)
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Nominal annual rate for the prospective loan, in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term of the prospective loan, in years
    #[arg(long)]
    pub years: Option<i64>,

    /// Collateral region
    #[arg(long, default_value = "other")]
    pub region: RegionArg,

    /// Appraised property value (KRW)
    #[arg(long, default_value = "0")]
    pub property_value: Decimal,

    /// First-time-buyer LTV treatment
    #[arg(long)]
    pub first_time_buyer: bool,

    /// Policy preset
    #[arg(long)]
    pub policy: Option<PolicyPreset>,

    /// Append the result to this session-history file (JSON lines)
    #[arg(long)]
    pub history: Option<String>,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut eligibility_input: MortgageEligibilityInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file (or piped JSON) is required for evaluation".into());
    };

    if let Some(preset) = args.policy {
        eligibility_input.policy = preset.to_policy();
    }

    let result = mortgage::evaluate_mortgage(&eligibility_input)?;
    let value = serde_json::to_value(&result)?;

    if let Some(ref path) = args.history {
        let record = SessionRecord::now(
            "evaluate",
            serde_json::to_value(&eligibility_input)?,
            value.clone(),
        );
        history::append_record(path, &record)?;
    }

    Ok(value)
}

pub fn run_max_loan(args: MaxLoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut max_loan_input: MaxLoanInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        MaxLoanInput {
            applicant: ApplicantProfile {
                annual_income: args
                    .annual_income
                    .ok_or("--annual-income is required (or provide --input)")?,
                region: args.region.into(),
                is_first_time_buyer: args.first_time_buyer,
                property_value: args.property_value,
                custom_ltv_percent: None,
            },
            existing_loans: vec![],
            nominal_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            rate_structure: RateStructure::fixed(
                args.years.ok_or("--years is required (or provide --input)")?,
            ),
            policy: EvaluationPolicy::standard(),
        }
    };

    if let Some(ref preset) = args.policy {
        max_loan_input.policy = preset.to_policy();
    }

    let result = mortgage::evaluate_max_loan(&max_loan_input)?;
    let value = serde_json::to_value(&result)?;

    if let Some(ref path) = args.history {
        let record = SessionRecord::now(
            "max-loan",
            serde_json::to_value(&max_loan_input)?,
            value.clone(),
        );
        history::append_record(path, &record)?;
    }

    Ok(value)
}
