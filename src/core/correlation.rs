/// Correlation against English letter frequencies
///
/// The score is built from the regression slope of the observed distribution
/// against the reference one, mapped through `1 / (10b² - 20b + 11)`. It peaks at
/// exactly 1 when the slope is 1. It is not a correlation coefficient and is not
/// clamped.

use log::warn;

use crate::core::error::{AnalysisError, Result};
use crate::core::reference::{is_letter_table, ranked_frequencies};
use crate::core::table::FrequencyTable;
use crate::core::transforms::normalize;

/// Score `table` against English. `Ok(None)` when the table is not keyed by A-Z.
///
/// Values are paired position by position: the table's current order against the
/// reference ranking.
pub fn correlation(table: &FrequencyTable) -> Result<Option<f64>> {
    if !is_letter_table(table) {
        warn!("Correlation needs a table keyed by A-Z; skipping");
        return Ok(None);
    }

    let normalized = normalize(table)?;
    let observed: Vec<f64> = normalized.values().collect();
    let reference: Vec<f64> = ranked_frequencies().collect();

    let slope = regression_slope(&observed, &reference)?;
    Ok(Some(slope_score(slope)))
}

/// Least-squares slope `Sxy / Sxx` over paired samples
pub fn regression_slope(x: &[f64], y: &[f64]) -> Result<f64> {
    let n = x.len().min(y.len()) as f64;

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_xx: f64 = x.iter().map(|a| a * a).sum();

    let s_xx = sum_xx - (sum_x * sum_x) / n;
    let s_xy = sum_xy - (sum_x * sum_y) / n;

    if s_xx == 0.0 {
        return Err(AnalysisError::DegenerateStatistics { operation: "correlate" });
    }
    Ok(s_xy / s_xx)
}

/// Map a slope onto a score that is 1 at slope 1
pub fn slope_score(slope: f64) -> f64 {
    1.0 / (10.0 * slope.powi(2) - 20.0 * slope + 11.0)
}
