//! Deterministic train/evaluation split.
//!
//! Rows are shuffled with a seeded `StdRng`, the first `ceil(n * test_fraction)`
//! shuffled rows become the evaluation partition and the rest the training
//! partition. Identical input and seed always yield the identical split.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::warn;

use crate::error::EngineError;

/// Row indices of each partition (indices into the table's records).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split `n` rows into training and evaluation partitions.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Result<Split, EngineError> {
    if n == 0 {
        return Err(EngineError::InsufficientData { rows: 0, needed: 1 });
    }
    if !(test_fraction.is_finite() && (0.0..1.0).contains(&test_fraction)) {
        return Err(EngineError::data_type(format!(
            "invalid test fraction {test_fraction} (must be in [0, 1))"
        )));
    }

    let n_test = (n as f64 * test_fraction).ceil() as usize;

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    if n_test >= n {
        // Only reachable for a single row: holding it out would leave nothing to fit.
        warn!(rows = n, "table too small for a hold-out partition; training on all rows");
        return Ok(Split {
            train: indices,
            test: Vec::new(),
        });
    }

    let train = indices.split_off(n_test);
    Ok(Split { train, test: indices })
}
