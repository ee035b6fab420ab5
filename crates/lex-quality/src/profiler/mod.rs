//! Column and dataset profiling.
//!
//! This module turns a parsed [`Dataset`] into a [`DatasetAnalysis`]:
//! - Type inference for columns
//! - Missing, unique and duplicate counts
//! - Outlier detection for numeric columns
//! - Format validation against the inferred type

mod format_validation;
mod outliers;
mod type_inference;

use crate::config::AnalysisConfig;
use crate::types::{ColumnAnalysis, DataType, Dataset, DatasetAnalysis, Value};
use crate::utils::percent;
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::{debug, info};

pub use format_validation::{FormatIssues, FormatValidator};
pub use outliers::{Fence, OutlierDetector, OutlierReport};
pub use type_inference::{TypeInferencer, classify_value};

/// Computes a [`ColumnAnalysis`] for one column.
#[derive(Debug, Clone)]
pub struct ColumnAnalyzer {
    config: AnalysisConfig,
    inferencer: TypeInferencer,
    outlier_detector: OutlierDetector,
    format_validator: FormatValidator,
}

impl Default for ColumnAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl ColumnAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            inferencer: TypeInferencer::from_config(&config),
            outlier_detector: OutlierDetector::from_config(&config),
            format_validator: FormatValidator::from_config(&config),
            config,
        }
    }

    /// Analyze the values of one column, given in row order.
    ///
    /// Uniqueness is counted over the string forms of non-missing values,
    /// while `duplicate_count` is `total_rows - unique_count` over all rows.
    /// Outlier and format-issue percentages divide by the non-missing count.
    pub fn analyze(&self, column_name: &str, values: &[&Value]) -> ColumnAnalysis {
        let total_rows = values.len();
        let present: Vec<&Value> = values.iter().copied().filter(|v| !v.is_missing()).collect();
        let missing_count = total_rows - present.len();

        let unique_count = present
            .iter()
            .map(|v| v.stringify())
            .collect::<HashSet<_>>()
            .len();
        let duplicate_count = total_rows - unique_count;

        let sample = &present[..present.len().min(self.config.column_sample_size)];
        let data_type = self.inferencer.infer(sample);

        let outliers = if data_type == DataType::Number {
            self.outlier_detector.detect(&present)
        } else {
            OutlierReport::default()
        };
        let format_issues = self.format_validator.validate(&present, data_type);

        debug!(
            "Column '{}': type={}, missing={}, unique={}, outliers={}, format_issues={}",
            column_name,
            data_type,
            missing_count,
            unique_count,
            outliers.count(),
            format_issues.count
        );

        ColumnAnalysis {
            column_name: column_name.to_string(),
            data_type,
            total_rows,
            missing_count,
            missing_percent: percent(missing_count, total_rows),
            unique_count,
            unique_percent: percent(unique_count, total_rows),
            duplicate_count,
            duplicate_percent: percent(duplicate_count, total_rows),
            outliers_count: outliers.count(),
            outliers_percent: percent(outliers.count(), present.len()),
            outlier_values: outliers
                .outliers
                .iter()
                .take(self.config.max_outlier_values)
                .copied()
                .collect(),
            format_issues_count: format_issues.count,
            format_issues_percent: percent(format_issues.count, present.len()),
            examples: present
                .iter()
                .take(self.config.max_examples)
                .map(|v| (*v).clone())
                .collect(),
        }
    }
}

/// Runs the [`ColumnAnalyzer`] over every column of a dataset.
#[derive(Debug, Clone, Default)]
pub struct DatasetAnalyzer {
    column_analyzer: ColumnAnalyzer,
}

impl DatasetAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            column_analyzer: ColumnAnalyzer::new(config),
        }
    }

    /// Analyze every column, in the column order of the first row.
    ///
    /// An empty dataset produces an analysis with no rows and no columns.
    pub fn analyze(&self, dataset: &Dataset) -> DatasetAnalysis {
        if dataset.is_empty() {
            debug!("Empty dataset, nothing to analyze");
            return DatasetAnalysis::empty();
        }

        let mut columns = IndexMap::new();
        for name in dataset.column_names() {
            let values = dataset.column_values(name);
            columns.insert(name.to_string(), self.column_analyzer.analyze(name, &values));
        }

        let analysis = DatasetAnalysis::new(columns, dataset.len());
        info!(
            "Analyzed dataset: {} rows x {} columns",
            analysis.row_count, analysis.column_count
        );
        analysis
    }
}

/// Analyze a dataset with the default configuration.
pub fn analyze_dataset(dataset: &Dataset) -> DatasetAnalysis {
    DatasetAnalyzer::default().analyze(dataset)
}
