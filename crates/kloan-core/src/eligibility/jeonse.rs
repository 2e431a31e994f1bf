use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{types::*, KloanError, KloanResult};

// ---------------------------------------------------------------------------
// Product-tier tables
// ---------------------------------------------------------------------------

const YOUTH_MAX_AGE: u32 = 34;
const YOUTH_INCOME_CAP: Money = dec!(50_000_000);
const YOUTH_ABSOLUTE_CAP: Money = dec!(200_000_000);

const NEWLYWED_MAX_YEARS_MARRIED: i64 = 7;
const NEWLYWED_INCOME_CAP: Money = dec!(100_000_000);
const NEWLYWED_ABSOLUTE_CAP: Money = dec!(300_000_000);

const GENERAL_ABSOLUTE_CAP: Money = dec!(500_000_000);

/// Share of the property value that can back a lease deposit.
const DEPOSIT_COLLATERAL_RATIO: Decimal = dec!(0.8);

/// Named lease-deposit loan products, best tier first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductTier {
    Youth,
    Newlywed,
    General,
}

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JeonseEligibilityInput {
    pub age: u32,
    pub annual_income: Money,
    #[serde(default)]
    pub is_married: bool,
    /// Years since marriage; meaningful only when `is_married`.
    #[serde(default)]
    pub years_married: i64,
    pub deposit_amount: Money,
    pub property_value: Money,
    pub requested_amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JeonseVerdict {
    pub tier: ProductTier,
    pub tier_absolute_cap: Money,
    /// min(deposit, property value × 80%).
    pub collateral_cap: Money,
    /// Binding cap: min(absolute, collateral).
    pub tier_cap: Money,
    pub approved: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Lease-deposit (jeonse) product-tier screening. A much simpler decision
/// than the mortgage pipeline: pick the best tier the applicant qualifies
/// for, cap the request against it.
pub fn evaluate_jeonse(
    input: &JeonseEligibilityInput,
) -> KloanResult<ComputationOutput<JeonseVerdict>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let (tier, tier_absolute_cap) = select_tier(input);
    let collateral_cap = input
        .deposit_amount
        .min(input.property_value * DEPOSIT_COLLATERAL_RATIO);
    let tier_cap = tier_absolute_cap.min(collateral_cap);
    let approved = input.requested_amount <= tier_cap;

    let verdict = JeonseVerdict {
        tier,
        tier_absolute_cap,
        collateral_cap,
        tier_cap,
        approved,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "deposit_collateral_ratio": DEPOSIT_COLLATERAL_RATIO.to_string(),
    });

    Ok(with_metadata(
        "Jeonse product-tier eligibility",
        &assumptions,
        warnings,
        elapsed,
        verdict,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn select_tier(input: &JeonseEligibilityInput) -> (ProductTier, Money) {
    if input.age <= YOUTH_MAX_AGE && input.annual_income <= YOUTH_INCOME_CAP {
        (ProductTier::Youth, YOUTH_ABSOLUTE_CAP)
    } else if input.is_married
        && input.years_married <= NEWLYWED_MAX_YEARS_MARRIED
        && input.annual_income <= NEWLYWED_INCOME_CAP
    {
        (ProductTier::Newlywed, NEWLYWED_ABSOLUTE_CAP)
    } else {
        (ProductTier::General, GENERAL_ABSOLUTE_CAP)
    }
}

fn validate_input(input: &JeonseEligibilityInput) -> KloanResult<()> {
    for (field, value) in [
        ("annual_income", input.annual_income),
        ("deposit_amount", input.deposit_amount),
        ("property_value", input.property_value),
        ("requested_amount", input.requested_amount),
    ] {
        if value < Decimal::ZERO {
            return Err(KloanError::InvalidInput {
                field: field.into(),
                reason: "Amount cannot be negative.".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
