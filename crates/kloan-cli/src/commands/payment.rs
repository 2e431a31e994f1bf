use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use kloan_core::payment::periodic_payment;
use kloan_core::types::RepaymentType;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RepaymentTypeArg {
    /// Constant total payment per period (annuity)
    EqualInstallment,
    /// Constant principal portion; reports the first-period payment
    EqualPrincipal,
    /// Interest only, principal due at maturity
    InterestOnly,
}

impl From<RepaymentTypeArg> for RepaymentType {
    fn from(value: RepaymentTypeArg) -> Self {
        match value {
            RepaymentTypeArg::EqualInstallment => RepaymentType::EqualInstallment,
            RepaymentTypeArg::EqualPrincipal => RepaymentType::EqualPrincipal,
            RepaymentTypeArg::InterestOnly => RepaymentType::InterestOnly,
        }
    }
}

/// Arguments for a one-off payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal (KRW)
    #[arg(long)]
    pub principal: Decimal,

    /// Annual rate in percent (4.7 = 4.7%)
    #[arg(long)]
    pub rate: Decimal,

    /// Term in years; zero or negative means no schedule
    #[arg(long)]
    pub years: i64,

    /// Repayment schedule
    #[arg(long, default_value = "equal-installment")]
    pub repayment_type: RepaymentTypeArg,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.principal < Decimal::ZERO {
        return Err("--principal cannot be negative".into());
    }
    if args.rate < Decimal::ZERO {
        return Err("--rate cannot be negative".into());
    }

    let monthly = periodic_payment(args.principal, args.rate, args.years, args.repayment_type.into());
    let annual = monthly * dec!(12);

    Ok(serde_json::json!({
        "result": {
            "monthly_payment": monthly.to_string(),
            "annual_payment": annual.to_string(),
        }
    }))
}
