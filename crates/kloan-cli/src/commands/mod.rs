pub mod history;
pub mod jeonse;
pub mod mortgage;
pub mod payment;
