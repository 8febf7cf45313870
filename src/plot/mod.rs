//! Chart rendering for reconciled forecasts.

pub mod chart;

pub use chart::*;
