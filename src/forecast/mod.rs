//! Forecast projection and reconciliation onto product lines.

pub mod projector;
pub mod reconcile;

pub use projector::*;
pub use reconcile::*;
