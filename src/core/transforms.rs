/// Statistical transforms over frequency tables
///
/// All transforms return new tables; the source table is never touched.

use crate::core::error::{AnalysisError, Result};
use crate::core::table::{ScaledTable, Table, TableValue};

/// Stand-in for log(0) in log-rescaled output
pub const LOG_ZERO_SENTINEL: f64 = -1.0;

/// Scale values so they sum to 1
pub fn normalize<V: TableValue>(table: &Table<V>) -> Result<ScaledTable> {
    let total = table.total();
    if total == 0.0 {
        return Err(AnalysisError::DegenerateStatistics { operation: "normalise" });
    }
    Ok(table.map_values(|v| v.as_f64() / total))
}

/// Replace each positive value with its logarithm in `base`; zero and below become
/// [`LOG_ZERO_SENTINEL`]
pub fn log_rescale<V: TableValue>(table: &Table<V>, base: u32) -> Result<ScaledTable> {
    if base < 2 {
        return Err(AnalysisError::invalid(format!(
            "log base must be at least 2, got {}",
            base
        )));
    }
    let base = f64::from(base);
    Ok(table.map_values(|v| {
        let v = v.as_f64();
        if v > 0.0 {
            v.log(base)
        } else {
            LOG_ZERO_SENTINEL
        }
    }))
}

/// Drop entries whose value is exactly zero
pub fn strip_zeros<V: TableValue>(table: &Table<V>) -> Table<V> {
    table.filtered(|_, v| !v.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::FrequencyTable;

    fn sample() -> FrequencyTable {
        let mut table = FrequencyTable::new();
        table.insert("E", 100);
        table.insert("T", 10);
        table.insert("Q", 0);
        table
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let normalized = normalize(&sample()).unwrap();
        assert!((normalized.total() - 1.0).abs() < 1e-12);
        assert_eq!(normalized.get("Q"), Some(0.0));
        assert_eq!(normalized.keys().collect::<Vec<_>>(), vec!["E", "T", "Q"]);
    }

    #[test]
    fn test_normalize_zero_table_fails() {
        let table: FrequencyTable = Table::with_keys(["A", "B"], 0);
        let err = normalize(&table).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateStatistics { .. }));
    }

    #[test]
    fn test_log_rescale_uses_sentinel_for_zero() {
        let logged = log_rescale(&sample(), 10).unwrap();
        assert!((logged.get("E").unwrap() - 2.0).abs() < 1e-12);
        assert!((logged.get("T").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(logged.get("Q"), Some(LOG_ZERO_SENTINEL));
        assert_eq!(format!("{}", logged.get("Q").unwrap()), "-1");
    }

    #[test]
    fn test_log_rescale_rejects_bad_base() {
        assert!(log_rescale(&sample(), 1).is_err());
        assert!(log_rescale(&sample(), 0).is_err());
    }

    #[test]
    fn test_strip_zeros_keeps_source() {
        let table = sample();
        let stripped = strip_zeros(&table);
        assert_eq!(stripped.len(), 2);
        assert_eq!(table.len(), 3);
    }
}
