use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::debt::{self, ObligationService};
use crate::eligibility::policy::EvaluationPolicy;
use crate::{payment, rules};
use crate::{
    types::*, KloanError, KloanResult,
};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageEligibilityInput {
    pub applicant: ApplicantProfile,
    #[serde(default)]
    pub existing_loans: Vec<LoanObligation>,
    pub new_loan: LoanObligation,
    pub rate_structure: RateStructure,
    #[serde(default)]
    pub policy: EvaluationPolicy,
}

/// Inputs for the reverse calculator: no proposed principal, only the terms
/// under which the maximum would be borrowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxLoanInput {
    pub applicant: ApplicantProfile,
    #[serde(default)]
    pub existing_loans: Vec<LoanObligation>,
    pub nominal_rate_percent: Percent,
    pub rate_structure: RateStructure,
    #[serde(default)]
    pub policy: EvaluationPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub existing_monthly_debt_service: Money,
    /// Per-obligation service rows for the existing loans, as counted (after
    /// any policy re-typing or stressing), in input order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub existing_loan_breakdown: Vec<ObligationService>,
    pub dsr_limit: Money,
    /// May be negative: the applicant is over the DSR ceiling before any
    /// new loan.
    pub available_monthly_capacity: Money,
    /// Post-stress, post-discount rate used for capacity, in percent.
    pub applied_interest_rate: Percent,
    pub new_loan_monthly_payment: Money,
    pub ltv_cap_amount: Money,
    pub max_loan_by_dsr: Money,
    pub max_loan_by_ltv: Money,
    pub max_loan_final: Money,
    pub approved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxLoanOutput {
    pub existing_monthly_debt_service: Money,
    pub dsr_limit: Money,
    pub available_monthly_capacity: Money,
    pub applied_interest_rate: Percent,
    pub max_loan_by_dsr: Money,
    pub max_loan_by_ltv: Money,
    pub max_loan_final: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Full DSR/LTV screening of a proposed mortgage.
///
/// The pipeline order is fixed: existing debt service, DSR limit, capacity,
/// applied (stressed) rate, new-loan payment, LTV cap, maximum principal per
/// constraint, verdict. Later steps consume earlier intermediates, so the
/// verdict reports every one of them for display.
pub fn evaluate_mortgage(
    input: &MortgageEligibilityInput,
) -> KloanResult<ComputationOutput<EligibilityVerdict>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_profile(&input.applicant)?;
    validate_loans(&input.existing_loans)?;
    validate_loan("new_loan", &input.new_loan)?;
    validate_structure(&input.rate_structure)?;
    validate_policy(&input.policy)?;

    if input.new_loan.term_years > 0
        && input.new_loan.term_years != input.rate_structure.total_term_years
    {
        warnings.push(format!(
            "new_loan.term_years ({}) differs from rate_structure.total_term_years ({}); the rate structure's term governs",
            input.new_loan.term_years, input.rate_structure.total_term_years
        ));
    }

    let core = capacity_pipeline(
        &input.applicant,
        &input.existing_loans,
        input.new_loan.annual_rate_percent,
        &input.rate_structure,
        &input.policy,
        &mut warnings,
    );

    let new_loan_monthly_payment = payment::periodic_payment(
        input.new_loan.principal,
        core.applied_interest_rate,
        input.rate_structure.total_term_years,
        input.new_loan.repayment_type,
    );

    // Both sub-checks must pass. For equal-installment math this agrees with
    // `principal <= max_loan_final`.
    let approved = input.new_loan.principal <= core.max_loan_by_ltv
        && new_loan_monthly_payment <= core.available_monthly_capacity;

    let verdict = EligibilityVerdict {
        existing_monthly_debt_service: core.existing_monthly_debt_service,
        existing_loan_breakdown: core.existing_loan_breakdown,
        dsr_limit: core.dsr_limit,
        available_monthly_capacity: core.available_monthly_capacity,
        applied_interest_rate: core.applied_interest_rate,
        new_loan_monthly_payment,
        ltv_cap_amount: core.max_loan_by_ltv,
        max_loan_by_dsr: core.max_loan_by_dsr,
        max_loan_by_ltv: core.max_loan_by_ltv,
        max_loan_final: core.max_loan_final,
        approved,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "dsr_ratio": input.policy.dsr_ratio.to_string(),
        "stress_multiplier": rules::stress_multiplier(&input.rate_structure).to_string(),
        "applied_ltv_percent": rules::resolve_ltv_percent(&input.applicant).to_string(),
        "existing_loan_repayment_override": input.policy.existing_loan_repayment_override,
    });

    Ok(with_metadata(
        "DSR/LTV mortgage eligibility screening",
        &assumptions,
        warnings,
        elapsed,
        verdict,
    ))
}

/// Reverse calculator: the largest permissible new-loan principal for a
/// rate/term, before any specific amount is requested.
pub fn evaluate_max_loan(
    input: &MaxLoanInput,
) -> KloanResult<ComputationOutput<MaxLoanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_profile(&input.applicant)?;
    validate_loans(&input.existing_loans)?;
    validate_structure(&input.rate_structure)?;
    validate_policy(&input.policy)?;
    if input.nominal_rate_percent < Decimal::ZERO {
        return Err(KloanError::InvalidInput {
            field: "nominal_rate_percent".into(),
            reason: "Rate cannot be negative.".into(),
        });
    }
    if input.nominal_rate_percent > rules::MAX_ANNUAL_RATE_PERCENT {
        return Err(KloanError::InvalidInput {
            field: "nominal_rate_percent".into(),
            reason: format!(
                "Rates above {}% are not accepted.",
                rules::MAX_ANNUAL_RATE_PERCENT
            ),
        });
    }

    let core = capacity_pipeline(
        &input.applicant,
        &input.existing_loans,
        input.nominal_rate_percent,
        &input.rate_structure,
        &input.policy,
        &mut warnings,
    );

    let output = MaxLoanOutput {
        existing_monthly_debt_service: core.existing_monthly_debt_service,
        dsr_limit: core.dsr_limit,
        available_monthly_capacity: core.available_monthly_capacity,
        applied_interest_rate: core.applied_interest_rate,
        max_loan_by_dsr: core.max_loan_by_dsr,
        max_loan_by_ltv: core.max_loan_by_ltv,
        max_loan_final: core.max_loan_final,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "dsr_ratio": input.policy.dsr_ratio.to_string(),
        "stress_multiplier": rules::stress_multiplier(&input.rate_structure).to_string(),
        "applied_ltv_percent": rules::resolve_ltv_percent(&input.applicant).to_string(),
    });

    Ok(with_metadata(
        "Maximum permissible loan (DSR/LTV reverse calculation)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

struct CapacityCore {
    existing_monthly_debt_service: Money,
    existing_loan_breakdown: Vec<ObligationService>,
    dsr_limit: Money,
    available_monthly_capacity: Money,
    applied_interest_rate: Percent,
    max_loan_by_dsr: Money,
    max_loan_by_ltv: Money,
    max_loan_final: Money,
}

fn capacity_pipeline(
    applicant: &ApplicantProfile,
    existing_loans: &[LoanObligation],
    nominal_rate_percent: Percent,
    structure: &RateStructure,
    policy: &EvaluationPolicy,
    warnings: &mut Vec<String>,
) -> CapacityCore {
    let discount = if structure.kind == RateStructureKind::Fixed
        && !policy.apply_discount_to_fixed
    {
        Decimal::ZERO
    } else {
        policy.regional_discounts.discount_for(applicant.region)
    };

    let existing = adjusted_existing_loans(existing_loans, structure, discount, policy);
    let existing_loan_breakdown = debt::service_breakdown(&existing, applicant.annual_income);
    let existing_monthly_debt_service: Money = existing_loan_breakdown
        .iter()
        .map(|row| row.monthly_payment)
        .sum();

    let dsr_limit = applicant.annual_income / dec!(12) * policy.dsr_ratio;
    let available_monthly_capacity = dsr_limit - existing_monthly_debt_service;

    if applicant.annual_income <= Decimal::ZERO {
        warnings.push("annual income is non-positive; all new credit is denied under DSR".into());
    } else if available_monthly_capacity < Decimal::ZERO {
        warnings.push("existing obligations already exceed the DSR ceiling".into());
    }

    let applied_interest_rate =
        rules::applied_stress_rate(nominal_rate_percent, structure, discount);

    let mut ltv_cap = applicant.property_value * rules::resolve_ltv_percent(applicant) / dec!(100);
    if applicant.is_first_time_buyer {
        if let Some(cap) = policy.first_time_buyer_absolute_cap {
            ltv_cap = ltv_cap.min(cap);
        }
    }

    let max_loan_by_dsr = payment::max_principal_from_payment(
        available_monthly_capacity.max(Decimal::ZERO),
        applied_interest_rate,
        structure.total_term_years,
    );

    let max_loan_final = max_loan_by_dsr.min(ltv_cap);

    CapacityCore {
        existing_monthly_debt_service,
        existing_loan_breakdown,
        dsr_limit,
        available_monthly_capacity,
        applied_interest_rate,
        max_loan_by_dsr,
        max_loan_by_ltv: ltv_cap,
        max_loan_final,
    }
}

/// Existing obligations after policy adjustments: optional re-typing to a
/// single repayment schedule and optional stressing of each loan's rate
/// (floored at its own nominal, like the new loan).
fn adjusted_existing_loans(
    existing_loans: &[LoanObligation],
    structure: &RateStructure,
    discount: Percent,
    policy: &EvaluationPolicy,
) -> Vec<LoanObligation> {
    existing_loans
        .iter()
        .map(|loan| {
            let repayment_type = policy
                .existing_loan_repayment_override
                .unwrap_or(loan.repayment_type);
            let annual_rate_percent = if policy.apply_stress_to_existing {
                rules::applied_stress_rate(loan.annual_rate_percent, structure, discount)
            } else {
                loan.annual_rate_percent
            };
            LoanObligation {
                principal: loan.principal,
                annual_rate_percent,
                term_years: loan.term_years,
                repayment_type,
            }
        })
        .collect()
}

fn validate_profile(profile: &ApplicantProfile) -> KloanResult<()> {
    if profile.annual_income < Decimal::ZERO {
        return Err(KloanError::InvalidInput {
            field: "applicant.annual_income".into(),
            reason: "Income cannot be negative.".into(),
        });
    }
    if profile.property_value < Decimal::ZERO {
        return Err(KloanError::InvalidInput {
            field: "applicant.property_value".into(),
            reason: "Property value cannot be negative.".into(),
        });
    }
    if let Some(ltv) = profile.custom_ltv_percent {
        if ltv < Decimal::ZERO || ltv > dec!(100) {
            return Err(KloanError::InvalidInput {
                field: "applicant.custom_ltv_percent".into(),
                reason: "Manual LTV must be between 0 and 100.".into(),
            });
        }
    }
    Ok(())
}

fn validate_loans(loans: &[LoanObligation]) -> KloanResult<()> {
    if loans.len() > rules::MAX_EXISTING_OBLIGATIONS {
        return Err(KloanError::InvalidInput {
            field: "existing_loans".into(),
            reason: format!(
                "At most {} existing obligations are accepted.",
                rules::MAX_EXISTING_OBLIGATIONS
            ),
        });
    }
    for (i, loan) in loans.iter().enumerate() {
        validate_loan(&format!("existing_loans[{i}]"), loan)?;
    }
    Ok(())
}

fn validate_loan(field: &str, loan: &LoanObligation) -> KloanResult<()> {
    if loan.principal < Decimal::ZERO {
        return Err(KloanError::InvalidInput {
            field: format!("{field}.principal"),
            reason: "Principal cannot be negative.".into(),
        });
    }
    if loan.annual_rate_percent < Decimal::ZERO {
        return Err(KloanError::InvalidInput {
            field: format!("{field}.annual_rate_percent"),
            reason: "Rate cannot be negative.".into(),
        });
    }
    if loan.annual_rate_percent > rules::MAX_ANNUAL_RATE_PERCENT {
        return Err(KloanError::InvalidInput {
            field: format!("{field}.annual_rate_percent"),
            reason: format!(
                "Rates above {}% are not accepted.",
                rules::MAX_ANNUAL_RATE_PERCENT
            ),
        });
    }
    if loan.term_years > rules::MAX_TERM_YEARS {
        return Err(KloanError::InvalidInput {
            field: format!("{field}.term_years"),
            reason: format!("Terms above {} years are not accepted.", rules::MAX_TERM_YEARS),
        });
    }
    Ok(())
}

fn validate_structure(structure: &RateStructure) -> KloanResult<()> {
    if structure.fixed_period_years > structure.total_term_years {
        return Err(KloanError::InvalidInput {
            field: "rate_structure.fixed_period_years".into(),
            reason: "Fixed period cannot exceed the total term.".into(),
        });
    }
    if structure.total_term_years > rules::MAX_TERM_YEARS {
        return Err(KloanError::InvalidInput {
            field: "rate_structure.total_term_years".into(),
            reason: format!("Terms above {} years are not accepted.", rules::MAX_TERM_YEARS),
        });
    }
    Ok(())
}

fn validate_policy(policy: &EvaluationPolicy) -> KloanResult<()> {
    if policy.dsr_ratio <= Decimal::ZERO {
        return Err(KloanError::InvalidInput {
            field: "policy.dsr_ratio".into(),
            reason: "DSR ratio must be positive.".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
