use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values, denominated in KRW. Wraps Decimal to prevent
/// accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed in percent (4.7 = 4.7%), matching the regulatory tables
/// and the customer-facing quotes. Never as fractions.
pub type Percent = Decimal;

/// Supported collateral regions. Serde names follow the Korean labels used
/// by the input forms; anything outside the table falls into `Other` (기타).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "서울")]
    Seoul,
    #[serde(rename = "경기")]
    Gyeonggi,
    #[serde(rename = "부산")]
    Busan,
    #[default]
    #[serde(rename = "기타")]
    Other,
}

/// Conventional mortgage repayment schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepaymentType {
    /// Constant total payment per period (annuity).
    EqualInstallment,
    /// Constant principal portion, declining total payment.
    EqualPrincipal,
    /// Interest only, principal due at maturity.
    InterestOnly,
}

/// How a loan's interest rate behaves over its life. Drives the stress
/// multiplier used for DSR capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateStructureKind {
    Fixed,
    Mixed,
    Variable,
    Periodic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateStructure {
    pub kind: RateStructureKind,
    /// Years the rate stays fixed. Only meaningful for `Mixed`.
    #[serde(default)]
    pub fixed_period_years: i64,
    pub total_term_years: i64,
    /// Months between rate resets. Only meaningful for `Periodic`.
    #[serde(default)]
    pub reset_cycle_months: i64,
}

impl RateStructure {
    pub fn fixed(total_term_years: i64) -> Self {
        RateStructure {
            kind: RateStructureKind::Fixed,
            fixed_period_years: total_term_years,
            total_term_years,
            reset_cycle_months: 0,
        }
    }

    pub fn variable(total_term_years: i64) -> Self {
        RateStructure {
            kind: RateStructureKind::Variable,
            fixed_period_years: 0,
            total_term_years,
            reset_cycle_months: 0,
        }
    }
}

/// An existing or proposed debt instrument. Constructed fresh per
/// evaluation; immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanObligation {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    /// Zero or negative means "no schedule": the periodic payment is zero.
    pub term_years: i64,
    pub repayment_type: RepaymentType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub annual_income: Money,
    pub region: Region,
    #[serde(default)]
    pub is_first_time_buyer: bool,
    pub property_value: Money,
    /// Manual LTV override in percent (0–100). Wins over the regional table
    /// and the first-time-buyer ceiling when supplied.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub custom_ltv_percent: Option<Percent>,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
