//! Linear trend fitting: `sales = intercept + slope * year`.
//!
//! Given the validated records and a train/evaluation split we:
//! - solve an OLS problem on the training rows only
//! - report SSE / RMSE / R² on both partitions
//!
//! Years are centered on the training mean before solving. This keeps the
//! design matrix well conditioned (years are large numbers) and makes a
//! single-year training set degrade to `slope = 0`, `intercept = mean(sales)`.

use nalgebra::{DMatrix, DVector};
use tracing::{debug, warn};

use crate::domain::{FitQuality, SalesRecord, TrendFit, TrendModel};
use crate::error::EngineError;
use crate::fit::split::Split;
use crate::math::{fit_stats, solve_least_squares};

/// Fit the trend on the training partition of `records`.
pub fn fit_trend(records: &[SalesRecord], split: &Split) -> Result<TrendFit, EngineError> {
    let train: Vec<&SalesRecord> = split.train.iter().filter_map(|&i| records.get(i)).collect();
    if train.is_empty() {
        return Err(EngineError::InsufficientData {
            rows: records.len(),
            needed: 1,
        });
    }

    let n = train.len();
    let year_mean = train.iter().map(|r| f64::from(r.year)).sum::<f64>() / n as f64;

    let mut design = DMatrix::<f64>::zeros(n, 2);
    let mut y = DVector::<f64>::zeros(n);
    for (i, r) in train.iter().enumerate() {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = f64::from(r.year) - year_mean;
        y[i] = r.sales;
    }

    if train.iter().all(|r| r.year == train[0].year) {
        warn!(year = train[0].year, "all training rows share one year; trend is flat");
    }

    let beta = solve_least_squares(&design, &y)
        .ok_or_else(|| EngineError::data_type("trend regression is ill-conditioned"))?;

    let slope = beta[1];
    let intercept = beta[0] - slope * year_mean;
    if !(slope.is_finite() && intercept.is_finite()) {
        return Err(EngineError::data_type("trend regression produced non-finite coefficients"));
    }

    let model = TrendModel { slope, intercept };
    let train_quality = quality(&model, train.iter().copied());

    let test: Vec<&SalesRecord> = split.test.iter().filter_map(|&i| records.get(i)).collect();
    let holdout = if test.is_empty() {
        None
    } else {
        Some(quality(&model, test.iter().copied()))
    };

    debug!(
        slope,
        intercept,
        train_rmse = train_quality.rmse,
        holdout_rmse = holdout.as_ref().map(|q| q.rmse),
        "fitted sales trend"
    );

    Ok(TrendFit {
        model,
        train: train_quality,
        holdout,
    })
}

fn quality<'a>(model: &TrendModel, rows: impl Iterator<Item = &'a SalesRecord>) -> FitQuality {
    let (observed, predicted): (Vec<f64>, Vec<f64>) =
        rows.map(|r| (r.sales, model.predict(r.year))).unzip();
    let (sse, rmse, r2) = fit_stats(&observed, &predicted);
    FitQuality {
        sse,
        rmse,
        r2,
        n: observed.len(),
    }
}
