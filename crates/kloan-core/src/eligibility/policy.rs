use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rules::{self, RegionalDiscountTable};
use crate::types::{Money, RepaymentType};

/// Every knob that varied across the historical calculator variants,
/// consolidated. Each variant becomes a named preset instead of its own
/// copy of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationPolicy {
    /// When set, every existing obligation is re-typed to this schedule
    /// before aggregation. The collateral-screen variant forces
    /// `InterestOnly`; others respect the per-loan entry.
    pub existing_loan_repayment_override: Option<RepaymentType>,
    /// Apply the new loan's stress adjustment to existing obligations too.
    pub apply_stress_to_existing: bool,
    /// Whether the regional relief may touch `Fixed`-rate loans. The
    /// defensive reading is no: the floor at nominal makes it a no-op for
    /// Fixed anyway, and some variants skipped it outright.
    pub apply_discount_to_fixed: bool,
    /// Absolute principal cap layered on top of the LTV ceiling for
    /// first-time buyers. `None` disables the cap.
    pub first_time_buyer_absolute_cap: Option<Money>,
    pub regional_discounts: RegionalDiscountTable,
    /// DSR ceiling as a fraction of gross income (0.4 = 40%).
    pub dsr_ratio: Decimal,
}

impl Default for EvaluationPolicy {
    fn default() -> Self {
        EvaluationPolicy::standard()
    }
}

impl EvaluationPolicy {
    /// The baseline screening rules.
    pub fn standard() -> Self {
        EvaluationPolicy {
            existing_loan_repayment_override: None,
            apply_stress_to_existing: false,
            apply_discount_to_fixed: false,
            first_time_buyer_absolute_cap: Some(rules::FIRST_TIME_BUYER_ABSOLUTE_CAP),
            regional_discounts: RegionalDiscountTable::default(),
            dsr_ratio: rules::DSR_RATIO,
        }
    }

    /// The 담보계산기 (collateral screen) variant: all existing collateral
    /// loans are counted interest-only and no first-time absolute cap
    /// applies.
    pub fn collateral_screen() -> Self {
        EvaluationPolicy {
            existing_loan_repayment_override: Some(RepaymentType::InterestOnly),
            first_time_buyer_absolute_cap: None,
            ..EvaluationPolicy::standard()
        }
    }

    /// Standard rules with the regional stress relief switched off.
    pub fn no_regional_relief() -> Self {
        EvaluationPolicy {
            regional_discounts: RegionalDiscountTable::zero(),
            ..EvaluationPolicy::standard()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_defaults() {
        let p = EvaluationPolicy::standard();
        assert_eq!(p.dsr_ratio, dec!(0.4));
        assert_eq!(p.first_time_buyer_absolute_cap, Some(dec!(600_000_000)));
        assert!(p.existing_loan_repayment_override.is_none());
        assert!(!p.apply_stress_to_existing);
    }

    #[test]
    fn test_collateral_screen_forces_interest_only() {
        let p = EvaluationPolicy::collateral_screen();
        assert_eq!(
            p.existing_loan_repayment_override,
            Some(RepaymentType::InterestOnly)
        );
        assert_eq!(p.first_time_buyer_absolute_cap, None);
    }

    #[test]
    fn test_no_relief_zeroes_table() {
        let p = EvaluationPolicy::no_regional_relief();
        assert_eq!(p.regional_discounts, RegionalDiscountTable::zero());
    }

    #[test]
    fn test_policy_deserializes_from_empty_object() {
        let p: EvaluationPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(p.dsr_ratio, dec!(0.4));
    }
}
