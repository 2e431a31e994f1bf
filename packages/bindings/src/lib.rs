use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, raw: &str) -> NapiResult<Decimal> {
    Decimal::from_str(raw)
        .map_err(|e| napi::Error::from_reason(format!("{field}: {e}")))
}

// ---------------------------------------------------------------------------
// Mortgage eligibility
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_mortgage(input_json: String) -> NapiResult<String> {
    let input: kloan_core::eligibility::mortgage::MortgageEligibilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = kloan_core::eligibility::mortgage::evaluate_mortgage(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn evaluate_max_loan(input_json: String) -> NapiResult<String> {
    let input: kloan_core::eligibility::mortgage::MaxLoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = kloan_core::eligibility::mortgage::evaluate_max_loan(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Jeonse (lease-deposit) products
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_jeonse(input_json: String) -> NapiResult<String> {
    let input: kloan_core::eligibility::jeonse::JeonseEligibilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        kloan_core::eligibility::jeonse::evaluate_jeonse(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Payment model
// ---------------------------------------------------------------------------

#[napi]
pub fn periodic_payment(
    principal: String,
    annual_rate_percent: String,
    term_years: i64,
    repayment_type: String,
) -> NapiResult<String> {
    let principal = parse_decimal("principal", &principal)?;
    let rate = parse_decimal("annual_rate_percent", &annual_rate_percent)?;
    let repayment_type: kloan_core::types::RepaymentType =
        serde_json::from_value(serde_json::Value::String(repayment_type))
            .map_err(to_napi_error)?;

    let payment =
        kloan_core::payment::periodic_payment(principal, rate, term_years, repayment_type);
    Ok(payment.to_string())
}

#[napi]
pub fn max_principal_from_payment(
    payment_budget: String,
    annual_rate_percent: String,
    term_years: i64,
) -> NapiResult<String> {
    let budget = parse_decimal("payment_budget", &payment_budget)?;
    let rate = parse_decimal("annual_rate_percent", &annual_rate_percent)?;

    let principal =
        kloan_core::payment::max_principal_from_payment(budget, rate, term_years);
    Ok(principal.to_string())
}
