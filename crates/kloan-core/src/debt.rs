use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::payment;
use crate::types::{LoanObligation, Money, Percent};

/// Per-obligation service figures, in input order. Used by callers for the
/// line-by-line breakdown the verdict screens show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObligationService {
    pub monthly_payment: Money,
    pub annual_payment: Money,
    /// Share of annual income this obligation consumes, in percent.
    /// Zero when income is non-positive.
    pub dsr_contribution_percent: Percent,
}

/// Sum of monthly payments across all obligations, each under its own
/// repayment schedule. Order-independent.
pub fn total_monthly_debt_service(obligations: &[LoanObligation]) -> Money {
    obligations
        .iter()
        .map(|o| {
            payment::periodic_payment(
                o.principal,
                o.annual_rate_percent,
                o.term_years,
                o.repayment_type,
            )
        })
        .sum()
}

/// Annualized debt service as a percentage of gross annual income.
/// A non-positive income yields zero rather than an error; the evaluator
/// turns that case into a denial through the capacity path.
pub fn annual_debt_service_ratio(obligations: &[LoanObligation], annual_income: Money) -> Percent {
    if annual_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    total_monthly_debt_service(obligations) * dec!(12) / annual_income * dec!(100)
}

/// Line-by-line service breakdown for display.
pub fn service_breakdown(
    obligations: &[LoanObligation],
    annual_income: Money,
) -> Vec<ObligationService> {
    obligations
        .iter()
        .map(|o| {
            let monthly = payment::periodic_payment(
                o.principal,
                o.annual_rate_percent,
                o.term_years,
                o.repayment_type,
            );
            let annual = monthly * dec!(12);
            let contribution = if annual_income > Decimal::ZERO {
                annual / annual_income * dec!(100)
            } else {
                Decimal::ZERO
            };
            ObligationService {
                monthly_payment: monthly,
                annual_payment: annual,
                dsr_contribution_percent: contribution,
            }
        })
        .collect()
}
