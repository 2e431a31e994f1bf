pub mod debt;
pub mod eligibility;
pub mod error;
pub mod payment;
pub mod rules;
pub mod session;
pub mod types;

pub use error::KloanError;
pub use types::*;

/// Standard result type for all kloan operations
pub type KloanResult<T> = Result<T, KloanError>;
