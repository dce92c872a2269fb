//! Allocation of profile cut orders to warehouse offcuts, in-run leftovers
//! and new bars.

pub mod optimizer;
pub mod recommend;
pub mod types;

pub use optimizer::{BatchStats, Optimizer};
pub use recommend::recommend_waste;
pub use types::*;
