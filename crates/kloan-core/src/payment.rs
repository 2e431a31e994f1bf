use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent, RepaymentType};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Monthly rate as a fraction, from an annual percent figure.
fn monthly_rate(annual_rate_percent: Percent) -> Decimal {
    annual_rate_percent / HUNDRED / MONTHS_PER_YEAR
}

/// One month of interest on `principal`. Multiplies before dividing so that
/// round figures stay exact (300M at 4% is exactly 1,000,000, not a
/// repeating-decimal neighbour of it).
fn monthly_interest(principal: Money, annual_rate_percent: Percent) -> Money {
    principal * annual_rate_percent / (HUNDRED * MONTHS_PER_YEAR)
}

/// Periodic (monthly) payment for a loan under the given repayment schedule.
///
/// Degenerate cases are defined, not errors: a non-positive term yields zero
/// (no schedule), and a zero rate under `EqualInstallment` degrades to linear
/// payoff. Inputs are assumed non-negative; the evaluation boundary rejects
/// anything else before it reaches here.
///
/// `EqualPrincipal` reports the first-period payment only, not a full
/// declining schedule. That is the reference figure the screening rules use.
pub fn periodic_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: i64,
    repayment_type: RepaymentType,
) -> Money {
    if term_years <= 0 {
        return Decimal::ZERO;
    }

    let r = monthly_rate(annual_rate_percent);
    let months = term_years.saturating_mul(12);
    let n = Decimal::from(months);

    match repayment_type {
        RepaymentType::EqualInstallment => {
            if r.is_zero() {
                principal / n
            } else {
                // (1+r)^n can exceed Decimal's range for extreme rates or
                // terms; the annuity converges to P*r there (the principal
                // share of each payment vanishes).
                match (Decimal::ONE + r).checked_powi(months) {
                    Some(factor) => principal * r * (factor / (factor - Decimal::ONE)),
                    None => principal * r,
                }
            }
        }
        RepaymentType::EqualPrincipal => principal / n + monthly_interest(principal, annual_rate_percent),
        RepaymentType::InterestOnly => monthly_interest(principal, annual_rate_percent),
    }
}

/// Inverse of the `EqualInstallment` formula: the largest principal whose
/// monthly annuity payment fits inside `payment_budget`.
///
/// A non-positive budget or term yields zero — never a negative principal.
pub fn max_principal_from_payment(
    payment_budget: Money,
    annual_rate_percent: Percent,
    term_years: i64,
) -> Money {
    if payment_budget <= Decimal::ZERO || term_years <= 0 {
        return Decimal::ZERO;
    }

    let r = monthly_rate(annual_rate_percent);
    let months = term_years.saturating_mul(12);
    let n = Decimal::from(months);

    if r.is_zero() {
        payment_budget * n
    } else {
        // Same range guard as the forward formula; the inverse converges to
        // budget / r.
        match (Decimal::ONE + r).checked_powi(months) {
            Some(factor) => payment_budget * ((factor - Decimal::ONE) / factor) / r,
            None => payment_budget / r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_equal_installment_standard() {
        // 500M KRW, 4.7%, 30 years: the standard annuity tables put the
        // monthly payment right around 2,593,000 KRW.
        let pmt = periodic_payment(
            dec!(500_000_000),
            dec!(4.7),
            30,
            RepaymentType::EqualInstallment,
        );
        assert!((pmt - dec!(2_593_000)).abs() < dec!(2_000), "got {pmt}");
    }

    #[test]
    fn test_equal_installment_zero_rate_is_linear() {
        let pmt = periodic_payment(dec!(120_000_000), dec!(0), 10, RepaymentType::EqualInstallment);
        // 120M over 120 months
        assert_eq!(pmt, dec!(1_000_000));
    }

    #[test]
    fn test_equal_installment_continuity_near_zero_rate() {
        // As rate -> 0 the annuity converges to principal / months.
        let linear = periodic_payment(dec!(120_000_000), dec!(0), 10, RepaymentType::EqualInstallment);
        let near = periodic_payment(dec!(120_000_000), dec!(0.0001), 10, RepaymentType::EqualInstallment);
        assert!((near - linear).abs() < dec!(1_000), "near={near} linear={linear}");
    }

    #[test]
    fn test_equal_principal_first_period() {
        // P/n + P*r = 100M/120 + 100M * (0.06/12) = 833,333.33... + 500,000
        let pmt = periodic_payment(dec!(100_000_000), dec!(6), 10, RepaymentType::EqualPrincipal);
        let expected = dec!(100_000_000) / dec!(120) + dec!(500_000);
        assert_eq!(pmt, expected);
    }

    #[test]
    fn test_interest_only() {
        // 300M at 4%: monthly interest = 300M * 0.04 / 12 = 1,000,000
        let pmt = periodic_payment(dec!(300_000_000), dec!(4), 20, RepaymentType::InterestOnly);
        assert_eq!(pmt, dec!(1_000_000));
    }

    #[test]
    fn test_non_positive_term_is_zero() {
        for ty in [
            RepaymentType::EqualInstallment,
            RepaymentType::EqualPrincipal,
            RepaymentType::InterestOnly,
        ] {
            assert_eq!(periodic_payment(dec!(100_000_000), dec!(5), 0, ty), Decimal::ZERO);
            assert_eq!(periodic_payment(dec!(100_000_000), dec!(5), -3, ty), Decimal::ZERO);
        }
    }

    #[test]
    fn test_max_principal_round_trip() {
        for (p, rate, years) in [
            (dec!(500_000_000), dec!(4.7), 30_i64),
            (dec!(120_000_000), dec!(3.2), 15),
            (dec!(50_000_000), dec!(7.9), 5),
        ] {
            let pmt = periodic_payment(p, rate, years, RepaymentType::EqualInstallment);
            let back = max_principal_from_payment(pmt, rate, years);
            assert!((back - p).abs() < dec!(1), "p={p} back={back}");
        }
    }

    #[test]
    fn test_max_principal_zero_rate() {
        // budget * months
        let p = max_principal_from_payment(dec!(1_000_000), dec!(0), 10);
        assert_eq!(p, dec!(120_000_000));
    }

    #[test]
    fn test_max_principal_non_positive_budget() {
        assert_eq!(max_principal_from_payment(dec!(0), dec!(4.7), 30), Decimal::ZERO);
        assert_eq!(
            max_principal_from_payment(dec!(-500_000), dec!(4.7), 30),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_extreme_rate_saturates_to_interest_limit() {
        // 600%/yr: r = 0.5/mo, and 1.5^360 is far beyond Decimal's range.
        // The annuity limit is P*r = 250M.
        let pmt = periodic_payment(
            dec!(500_000_000),
            dec!(600),
            30,
            RepaymentType::EqualInstallment,
        );
        assert_eq!(pmt, dec!(250_000_000));
    }

    #[test]
    fn test_huge_term_does_not_abort() {
        // months saturates instead of wrapping; the factor guard then takes
        // the P*r limit: 100M * (6/1200) = 500,000.
        let pmt = periodic_payment(
            dec!(100_000_000),
            dec!(6),
            i64::MAX,
            RepaymentType::EqualInstallment,
        );
        assert_eq!(pmt, dec!(500_000));
    }

    #[test]
    fn test_max_principal_extreme_rate_saturates() {
        // Inverse limit is budget / r = 1M / 0.5.
        let p = max_principal_from_payment(dec!(1_000_000), dec!(600), 30);
        assert_eq!(p, dec!(2_000_000));
    }

    #[test]
    fn test_payment_monotone_in_principal() {
        let small = periodic_payment(dec!(100_000_000), dec!(5), 20, RepaymentType::EqualInstallment);
        let large = periodic_payment(dec!(200_000_000), dec!(5), 20, RepaymentType::EqualInstallment);
        assert!(large > small);
    }
}
