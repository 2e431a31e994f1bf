pub mod jeonse;
pub mod mortgage;
pub mod policy;
