//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - validated input rows and tables (`SalesRecord`, `SalesTable`)
//! - fit outputs (`TrendModel`, `TrendFit`, `FitQuality`)
//! - forecast outputs (`ForecastPoint`, `ProductLine`, `ForecastRecord`, `InsightSet`)
//! - run configuration (`EngineConfig`, `ForecastConfig`)

pub mod types;

pub use types::*;
