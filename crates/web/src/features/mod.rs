pub mod export;
pub mod payments;
