//! `sales-forecast` library crate.
//!
//! The binary (`salesfc`) is a thin wrapper around this library so that:
//!
//! - the forecasting engine is testable without spawning processes
//! - the engine can sit behind other front-ends (an upload handler, a batch job)
//! - every invocation owns its own state, so callers may run many in parallel

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod forecast;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;

pub use app::pipeline::{ForecastRun, run_engine, run_forecast};
pub use domain::{EngineConfig, ForecastRecord, InsightSet};
pub use error::EngineError;
