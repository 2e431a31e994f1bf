use kloan_core::eligibility::jeonse::{self, ProductTier};
use kloan_core::eligibility::mortgage::{self, MortgageEligibilityInput};
use kloan_core::eligibility::policy::EvaluationPolicy;
use kloan_core::types::*;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Mortgage eligibility scenarios
// ===========================================================================

fn seoul_first_scenario() -> MortgageEligibilityInput {
    // Income 97M/yr, no existing debt, 1B property in Seoul, asking 500M at
    // 4.7% fixed over 30 years.
    MortgageEligibilityInput {
        applicant: ApplicantProfile {
            annual_income: dec!(97_000_000),
            region: Region::Seoul,
            is_first_time_buyer: false,
            property_value: dec!(1_000_000_000),
            custom_ltv_percent: None,
        },
        existing_loans: vec![],
        new_loan: LoanObligation {
            principal: dec!(500_000_000),
            annual_rate_percent: dec!(4.7),
            term_years: 30,
            repayment_type: RepaymentType::EqualInstallment,
        },
        rate_structure: RateStructure::fixed(30),
        policy: EvaluationPolicy::standard(),
    }
}

#[test]
fn test_seoul_scenario_approves_with_ltv_slack() {
    let result = mortgage::evaluate_mortgage(&seoul_first_scenario()).unwrap();
    let v = &result.result;

    assert!(v.approved);
    // DSR limit: 97M / 12 * 40% ≈ 3,233,333
    assert!((v.dsr_limit - dec!(3_233_333)).abs() < dec!(1));
    // LTV cap: 70% of 1B, not binding for a 500M request.
    assert_eq!(v.ltv_cap_amount, dec!(700_000_000));
    assert!(v.max_loan_by_dsr < v.max_loan_by_ltv, "DSR should bind here");
    assert_eq!(v.max_loan_final, v.max_loan_by_dsr);
}

#[test]
fn test_dsr_denial_scenario() {
    // Income 60M/yr with a 300M amortizing loan already in place; a 400M
    // variable-rate request gets stressed to 8.5% and blows the capacity.
    let input = MortgageEligibilityInput {
        applicant: ApplicantProfile {
            annual_income: dec!(60_000_000),
            region: Region::Seoul,
            is_first_time_buyer: false,
            property_value: dec!(800_000_000),
            custom_ltv_percent: None,
        },
        existing_loans: vec![LoanObligation {
            principal: dec!(300_000_000),
            annual_rate_percent: dec!(4),
            term_years: 20,
            repayment_type: RepaymentType::EqualInstallment,
        }],
        new_loan: LoanObligation {
            principal: dec!(400_000_000),
            annual_rate_percent: dec!(5),
            term_years: 30,
            repayment_type: RepaymentType::EqualInstallment,
        },
        rate_structure: RateStructure::variable(30),
        policy: EvaluationPolicy::standard(),
    };
    let result = mortgage::evaluate_mortgage(&input).unwrap();
    let v = &result.result;

    assert_eq!(v.applied_interest_rate, dec!(8.5));
    assert!(!v.approved);
    // LTV alone would have allowed 560M; DSR is the binding constraint.
    assert_eq!(v.max_loan_by_ltv, dec!(560_000_000));
    assert!(v.max_loan_by_dsr < dec!(30_000_000));
    assert_eq!(v.max_loan_final, v.max_loan_by_dsr);
}

#[test]
fn test_zero_income_guard() {
    let mut input = seoul_first_scenario();
    input.applicant.annual_income = Decimal::ZERO;
    let result = mortgage::evaluate_mortgage(&input).unwrap();
    let v = &result.result;

    assert_eq!(v.dsr_limit, Decimal::ZERO);
    assert_eq!(v.available_monthly_capacity, Decimal::ZERO);
    assert_eq!(v.max_loan_by_dsr, Decimal::ZERO);
    assert!(!v.approved);
}

#[test]
fn test_existing_debt_never_increases_dsr_headroom() {
    let clean = mortgage::evaluate_mortgage(&seoul_first_scenario())
        .unwrap()
        .result;

    let mut with_debt = seoul_first_scenario();
    with_debt.existing_loans.push(LoanObligation {
        principal: dec!(100_000_000),
        annual_rate_percent: dec!(5),
        term_years: 10,
        repayment_type: RepaymentType::EqualInstallment,
    });
    let burdened = mortgage::evaluate_mortgage(&with_debt).unwrap().result;

    assert!(burdened.max_loan_by_dsr < clean.max_loan_by_dsr);
    assert!(burdened.max_loan_final <= clean.max_loan_final);
}

#[test]
fn test_mixed_structure_stress_tiers_feed_through() {
    // 24 of 30 years fixed: ratio 0.8 => multiplier 1.0, so the applied rate
    // floors back at nominal once the discount is clipped.
    let mut input = seoul_first_scenario();
    input.rate_structure = RateStructure {
        kind: RateStructureKind::Mixed,
        fixed_period_years: 24,
        total_term_years: 30,
        reset_cycle_months: 0,
    };
    let v = mortgage::evaluate_mortgage(&input).unwrap().result;
    assert_eq!(v.applied_interest_rate, dec!(4.7));

    // 12 of 30 years fixed: ratio 0.4 => multiplier 1.8; Seoul relief 1.5pp.
    input.rate_structure.fixed_period_years = 12;
    let v = mortgage::evaluate_mortgage(&input).unwrap().result;
    assert_eq!(v.applied_interest_rate, dec!(4.7) * dec!(1.8) - dec!(1.5));
}

#[test]
fn test_periodic_structure_stress() {
    let mut input = seoul_first_scenario();
    input.rate_structure = RateStructure {
        kind: RateStructureKind::Periodic,
        fixed_period_years: 0,
        total_term_years: 30,
        reset_cycle_months: 6,
    };
    // 6-month resets: multiplier 1.3 => 6.11%, minus 1.5pp relief => 4.61%,
    // floored at the 4.7% nominal.
    let v = mortgage::evaluate_mortgage(&input).unwrap().result;
    assert_eq!(v.applied_interest_rate, dec!(4.7));
}

#[test]
fn test_verdict_serializes_with_string_amounts() {
    let result = mortgage::evaluate_mortgage(&seoul_first_scenario()).unwrap();
    let value = serde_json::to_value(&result).unwrap();
    // Decimal amounts serialize as strings; approved stays a bool.
    assert!(value["result"]["ltv_cap_amount"].is_string());
    assert_eq!(value["result"]["approved"], serde_json::json!(true));
}

// ===========================================================================
// Jeonse product-tier scenarios
// ===========================================================================

#[test]
fn test_jeonse_youth_happy_path() {
    let input = jeonse::JeonseEligibilityInput {
        age: 28,
        annual_income: dec!(35_000_000),
        is_married: false,
        years_married: 0,
        deposit_amount: dec!(180_000_000),
        property_value: dec!(250_000_000),
        requested_amount: dec!(150_000_000),
    };
    let v = jeonse::evaluate_jeonse(&input).unwrap().result;
    assert_eq!(v.tier, ProductTier::Youth);
    // collateral = min(180M, 200M) = 180M; youth absolute 200M; cap 180M.
    assert_eq!(v.tier_cap, dec!(180_000_000));
    assert!(v.approved);
}

#[test]
fn test_jeonse_newlywed_beats_general_but_not_youth() {
    // Young married applicant under both income caps lands on Youth, the
    // better tier.
    let input = jeonse::JeonseEligibilityInput {
        age: 30,
        annual_income: dec!(45_000_000),
        is_married: true,
        years_married: 1,
        deposit_amount: dec!(100_000_000),
        property_value: dec!(150_000_000),
        requested_amount: dec!(90_000_000),
    };
    let v = jeonse::evaluate_jeonse(&input).unwrap().result;
    assert_eq!(v.tier, ProductTier::Youth);
}

#[test]
fn test_jeonse_collateral_cap_binds_below_absolute() {
    let input = jeonse::JeonseEligibilityInput {
        age: 50,
        annual_income: dec!(90_000_000),
        is_married: false,
        years_married: 0,
        deposit_amount: dec!(450_000_000),
        property_value: dec!(400_000_000),
        requested_amount: dec!(330_000_000),
    };
    let v = jeonse::evaluate_jeonse(&input).unwrap().result;
    assert_eq!(v.tier, ProductTier::General);
    // collateral = min(450M, 320M) = 320M < general absolute 500M.
    assert_eq!(v.tier_cap, dec!(320_000_000));
    assert!(!v.approved);
}
