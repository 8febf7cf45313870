//! Trend fitting.
//!
//! Responsibilities:
//!
//! - split rows into training / evaluation partitions (seeded, reproducible)
//! - fit the linear sales trend on the training partition
//! - report fit diagnostics for both partitions

pub mod split;
pub mod trend;

pub use split::*;
pub use trend::*;
