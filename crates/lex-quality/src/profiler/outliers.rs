//! IQR-based outlier detection for numeric columns.
//!
//! Quartiles are read directly from the sorted sample at `floor(n * 0.25)`
//! and `floor(n * 0.75)`, without interpolation between ranks.

use crate::config::AnalysisConfig;
use crate::types::Value;
use crate::utils::parse_number;
use serde::Serialize;

/// Outlier fence derived from a numeric sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fence {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl Fence {
    /// True when `value` lies strictly outside the fence.
    pub fn excludes(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Result of a detection pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutlierReport {
    pub fence: Option<Fence>,
    /// Every outlier, in ascending order.
    pub outliers: Vec<f64>,
}

impl OutlierReport {
    pub fn count(&self) -> usize {
        self.outliers.len()
    }
}

/// Detects values outside the `[Q1 - k*IQR, Q3 + k*IQR]` fence.
#[derive(Debug, Clone, Copy)]
pub struct OutlierDetector {
    min_values: usize,
    multiplier: f64,
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl OutlierDetector {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            min_values: config.min_outlier_values,
            multiplier: config.iqr_multiplier,
        }
    }

    /// Detect outliers among the numeric-parseable values of a column.
    ///
    /// Values that do not parse as finite numbers are skipped. Fewer than
    /// `min_values` numbers yields an empty report.
    pub fn detect(&self, values: &[&Value]) -> OutlierReport {
        let numbers: Vec<f64> = values.iter().filter_map(|v| numeric_value(v)).collect();
        self.detect_numbers(numbers)
    }

    pub fn detect_numbers(&self, mut numbers: Vec<f64>) -> OutlierReport {
        if numbers.len() < self.min_values.max(1) {
            return OutlierReport::default();
        }

        numbers.sort_by(f64::total_cmp);
        let fence = self.fence(&numbers);
        let outliers = numbers.into_iter().filter(|n| fence.excludes(*n)).collect();

        OutlierReport {
            fence: Some(fence),
            outliers,
        }
    }

    /// Build the fence from an ascending, non-empty sample.
    fn fence(&self, sorted: &[f64]) -> Fence {
        let n = sorted.len() as f64;
        let q1 = sorted[(n * 0.25).floor() as usize];
        let q3 = sorted[(n * 0.75).floor() as usize];
        let iqr = q3 - q1;

        Fence {
            q1,
            q3,
            iqr,
            lower: q1 - self.multiplier * iqr,
            upper: q3 + self.multiplier * iqr,
        }
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) if n.is_finite() => Some(*n),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(numbers: &[f64]) -> OutlierReport {
        OutlierDetector::default().detect_numbers(numbers.to_vec())
    }

    #[test]
    fn test_reference_fence() {
        let report = detect(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
        let fence = report.fence.unwrap();

        assert_eq!(fence.q1, 2.0);
        assert_eq!(fence.q3, 5.0);
        assert_eq!(fence.iqr, 3.0);
        assert_eq!(fence.lower, -2.5);
        assert_eq!(fence.upper, 9.5);
        assert_eq!(report.outliers, vec![100.0]);
    }

    #[test]
    fn test_unsorted_input_and_low_outliers() {
        let report = detect(&[10.0, -500.0, 11.0, 12.0, 13.0, 14.0, 12.0, 11.0]);
        assert_eq!(report.outliers, vec![-500.0]);
    }

    #[test]
    fn test_too_few_values() {
        let report = detect(&[1.0, 2.0, 1000.0]);
        assert!(report.fence.is_none());
        assert_eq!(report.count(), 0);
    }

    #[test]
    fn test_constant_column_has_no_outliers() {
        let report = detect(&[7.0; 10]);
        assert_eq!(report.count(), 0);
    }

    #[test]
    fn test_detect_parses_strings_and_skips_non_numbers() {
        let raw = vec![
            Value::from("1"),
            Value::from(2.0),
            Value::from("3"),
            Value::from("n/a"),
            Value::from(" 4 "),
            Value::from("5"),
            Value::from("100"),
        ];
        let refs: Vec<&Value> = raw.iter().collect();
        let report = OutlierDetector::default().detect(&refs);
        assert_eq!(report.outliers, vec![100.0]);
    }

    #[test]
    fn test_inliers_stay_within_original_fence() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 250.0, -90.0];
        let report = detect(&data);
        let fence = report.fence.unwrap();
        assert_eq!(report.outliers, vec![-90.0, 250.0]);

        let kept: Vec<f64> = data.iter().copied().filter(|v| !fence.excludes(*v)).collect();
        assert_eq!(kept.len(), data.len() - report.count());

        // The tighter fence of the remaining values flags nothing new
        let rerun = detect(&kept);
        assert!(rerun.fence.is_some());
        assert!(rerun.outliers.iter().all(|v| !fence.excludes(*v)));
        assert_eq!(rerun.count(), 0);
    }

    #[test]
    fn test_custom_multiplier() {
        let config = AnalysisConfig::builder().iqr_multiplier(50.0).build().unwrap();
        let report =
            OutlierDetector::from_config(&config).detect_numbers(vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
        assert_eq!(report.count(), 0);
    }
}
