use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{
    ApplicantProfile, Money, Percent, RateStructure, RateStructureKind, Region,
};

// ---------------------------------------------------------------------------
// Regulatory constants
// ---------------------------------------------------------------------------

/// Share of monthly gross income allowed to go to debt service.
pub const DSR_RATIO: Decimal = dec!(0.4);

/// Flat LTV ceiling granted to first-time buyers regardless of region.
pub const FIRST_TIME_BUYER_LTV_PERCENT: Percent = dec!(70);

/// Absolute principal cap for first-time buyers, on top of the LTV ceiling.
pub const FIRST_TIME_BUYER_ABSOLUTE_CAP: Money = dec!(600_000_000);

/// Input forms cap the existing-obligation list at this many rows.
pub const MAX_EXISTING_OBLIGATIONS: usize = 10;

/// Highest annual rate accepted at the boundary, in percent. Keeps the
/// stressed rate inside the range the annuity math can represent.
pub const MAX_ANNUAL_RATE_PERCENT: Percent = dec!(100);

/// Longest loan or structure term accepted at the boundary, in years.
pub const MAX_TERM_YEARS: i64 = 100;

// ---------------------------------------------------------------------------
// LTV tables
// ---------------------------------------------------------------------------

/// Regional LTV ceiling in percent. Unlisted regions take the 기타 default.
pub fn ltv_ceiling(region: Region) -> Percent {
    match region {
        Region::Seoul => dec!(70),
        Region::Gyeonggi => dec!(65),
        Region::Busan => dec!(60),
        Region::Other => dec!(60),
    }
}

/// LTV percent actually applied to an applicant: a manual override wins,
/// then the first-time-buyer ceiling, then the regional table.
pub fn resolve_ltv_percent(profile: &ApplicantProfile) -> Percent {
    if let Some(custom) = profile.custom_ltv_percent {
        custom
    } else if profile.is_first_time_buyer {
        FIRST_TIME_BUYER_LTV_PERCENT
    } else {
        ltv_ceiling(profile.region)
    }
}

// ---------------------------------------------------------------------------
// Stress-rate rules
// ---------------------------------------------------------------------------

/// Multiplier applied to the nominal rate for DSR capacity. The less of the
/// loan's life is rate-fixed, the harsher the stress.
pub fn stress_multiplier(structure: &RateStructure) -> Decimal {
    match structure.kind {
        RateStructureKind::Fixed => dec!(1.0),
        RateStructureKind::Variable => dec!(2.0),
        RateStructureKind::Mixed => {
            let ratio = if structure.total_term_years <= 0 {
                Decimal::ZERO
            } else {
                Decimal::from(structure.fixed_period_years)
                    / Decimal::from(structure.total_term_years)
            };
            if ratio >= dec!(0.8) {
                dec!(1.0)
            } else if ratio >= dec!(0.6) {
                dec!(1.4)
            } else if ratio >= dec!(0.4) {
                dec!(1.8)
            } else {
                dec!(2.0)
            }
        }
        RateStructureKind::Periodic => {
            if structure.reset_cycle_months >= 12 {
                dec!(1.4)
            } else if structure.reset_cycle_months >= 6 {
                dec!(1.3)
            } else {
                dec!(1.2)
            }
        }
    }
}

/// Flat discount, in percentage points, subtracted from the stressed rate.
/// Designated high-price regions get the larger relief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalDiscountTable {
    pub high_price: Percent,
    pub standard: Percent,
}

impl Default for RegionalDiscountTable {
    fn default() -> Self {
        RegionalDiscountTable {
            high_price: dec!(1.5),
            standard: dec!(0.75),
        }
    }
}

impl RegionalDiscountTable {
    /// Table with all relief switched off.
    pub fn zero() -> Self {
        RegionalDiscountTable {
            high_price: Decimal::ZERO,
            standard: Decimal::ZERO,
        }
    }

    pub fn discount_for(&self, region: Region) -> Percent {
        match region {
            Region::Seoul => self.high_price,
            _ => self.standard,
        }
    }
}

/// Rate used for DSR capacity: nominal × stress multiplier, minus the
/// regional discount, floored at the nominal customer rate. The relief must
/// never push the applied rate below what the customer actually pays.
pub fn applied_stress_rate(
    nominal_rate_percent: Percent,
    structure: &RateStructure,
    discount_percent: Percent,
) -> Percent {
    let stressed = nominal_rate_percent * stress_multiplier(structure);
    (stressed - discount_percent).max(nominal_rate_percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn mixed(fixed_years: i64, total_years: i64) -> RateStructure {
        RateStructure {
            kind: RateStructureKind::Mixed,
            fixed_period_years: fixed_years,
            total_term_years: total_years,
            reset_cycle_months: 0,
        }
    }

    fn periodic(reset_months: i64) -> RateStructure {
        RateStructure {
            kind: RateStructureKind::Periodic,
            fixed_period_years: 0,
            total_term_years: 30,
            reset_cycle_months: reset_months,
        }
    }

    #[test]
    fn test_ltv_table() {
        assert_eq!(ltv_ceiling(Region::Seoul), dec!(70));
        assert_eq!(ltv_ceiling(Region::Gyeonggi), dec!(65));
        assert_eq!(ltv_ceiling(Region::Busan), dec!(60));
        assert_eq!(ltv_ceiling(Region::Other), dec!(60));
    }

    #[test]
    fn test_resolve_ltv_precedence() {
        let mut profile = ApplicantProfile {
            annual_income: dec!(50_000_000),
            region: Region::Busan,
            is_first_time_buyer: true,
            property_value: dec!(400_000_000),
            custom_ltv_percent: Some(dec!(55)),
        };
        // custom override beats everything
        assert_eq!(resolve_ltv_percent(&profile), dec!(55));
        // first-time beats the regional table
        profile.custom_ltv_percent = None;
        assert_eq!(resolve_ltv_percent(&profile), dec!(70));
        // regional table otherwise
        profile.is_first_time_buyer = false;
        assert_eq!(resolve_ltv_percent(&profile), dec!(60));
    }

    #[test]
    fn test_fixed_and_variable_multipliers() {
        assert_eq!(stress_multiplier(&RateStructure::fixed(30)), dec!(1.0));
        assert_eq!(stress_multiplier(&RateStructure::variable(30)), dec!(2.0));
    }

    #[test]
    fn test_mixed_tier_boundaries() {
        assert_eq!(stress_multiplier(&mixed(8, 10)), dec!(1.0)); // exactly 0.8
        assert_eq!(stress_multiplier(&mixed(79, 100)), dec!(1.4)); // 0.79, just under
        assert_eq!(stress_multiplier(&mixed(6, 10)), dec!(1.4));
        assert_eq!(stress_multiplier(&mixed(4, 10)), dec!(1.8));
        assert_eq!(stress_multiplier(&mixed(3, 10)), dec!(2.0));
    }

    #[test]
    fn test_mixed_zero_term_worst_tier() {
        assert_eq!(stress_multiplier(&mixed(5, 0)), dec!(2.0));
    }

    #[test]
    fn test_periodic_tiers() {
        assert_eq!(stress_multiplier(&periodic(12)), dec!(1.4));
        assert_eq!(stress_multiplier(&periodic(24)), dec!(1.4));
        assert_eq!(stress_multiplier(&periodic(6)), dec!(1.3));
        assert_eq!(stress_multiplier(&periodic(3)), dec!(1.2));
    }

    #[test]
    fn test_applied_rate_variable_with_discount() {
        // 5% variable: stressed 10%, Seoul relief 1.5pp -> 8.5%
        let rate = applied_stress_rate(dec!(5), &RateStructure::variable(30), dec!(1.5));
        assert_eq!(rate, dec!(8.5));
    }

    #[test]
    fn test_applied_rate_floors_at_nominal() {
        // Fixed: stressed = nominal; discount would undercut the customer
        // rate, so the floor holds.
        let rate = applied_stress_rate(dec!(4.7), &RateStructure::fixed(30), dec!(1.5));
        assert_eq!(rate, dec!(4.7));
    }
}
