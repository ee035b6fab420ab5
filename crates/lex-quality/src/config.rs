//! Configuration types for the quality analysis engine.
//!
//! This module provides configuration options using the builder pattern.
//! The defaults reproduce the reference numbers downstream consumers depend
//! on; changing them changes the literal output.

use serde::{Deserialize, Serialize};

/// Configuration for dataset analysis.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_quality::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .column_sample_size(50)
///     .iqr_multiplier(3.0)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of leading non-missing values handed to type inference per column.
    /// Default: 20
    pub column_sample_size: usize,

    /// Hard cap on the sample the type inferencer will look at.
    /// Default: 100
    pub max_inference_sample: usize,

    /// Fraction of the sample the winning type must exceed (strictly).
    /// Default: 0.5
    pub majority_threshold: f64,

    /// Minimum numeric values required before outliers are computed.
    /// Default: 4
    pub min_outlier_values: usize,

    /// Multiplier applied to the IQR when building the outlier fence.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Number of outlier values retained in `outlierValues`.
    /// Default: 5
    pub max_outlier_values: usize,

    /// Number of failing values retained by the format validator.
    /// Default: 10
    pub max_format_issue_samples: usize,

    /// Number of raw values retained in `examples`.
    /// Default: 5
    pub max_examples: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            column_sample_size: 20,
            max_inference_sample: 100,
            majority_threshold: 0.5,
            min_outlier_values: 4,
            iqr_multiplier: 1.5,
            max_outlier_values: 5,
            max_format_issue_samples: 10,
            max_examples: 5,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let sizes = [
            ("column_sample_size", self.column_sample_size),
            ("max_inference_sample", self.max_inference_sample),
            ("min_outlier_values", self.min_outlier_values),
            ("max_outlier_values", self.max_outlier_values),
            ("max_format_issue_samples", self.max_format_issue_samples),
            ("max_examples", self.max_examples),
        ];
        for (field, value) in sizes {
            if value == 0 {
                return Err(ConfigValidationError::InvalidSampleSize {
                    field: field.to_string(),
                });
            }
        }

        if !(0.0..1.0).contains(&self.majority_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "majority_threshold".to_string(),
                value: self.majority_threshold,
            });
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(ConfigValidationError::InvalidMultiplier(self.iqr_multiplier));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be in [0.0, 1.0))")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid sample size for '{field}' (must be at least 1)")]
    InvalidSampleSize { field: String },

    #[error("Invalid IQR multiplier: {0} (must be a finite, non-negative number)")]
    InvalidMultiplier(f64),
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    column_sample_size: Option<usize>,
    max_inference_sample: Option<usize>,
    majority_threshold: Option<f64>,
    min_outlier_values: Option<usize>,
    iqr_multiplier: Option<f64>,
    max_outlier_values: Option<usize>,
    max_format_issue_samples: Option<usize>,
    max_examples: Option<usize>,
}

impl AnalysisConfigBuilder {
    /// Set how many non-missing values per column feed type inference.
    pub fn column_sample_size(mut self, size: usize) -> Self {
        self.column_sample_size = Some(size);
        self
    }

    /// Set the inferencer's own sample cap.
    pub fn max_inference_sample(mut self, size: usize) -> Self {
        self.max_inference_sample = Some(size);
        self
    }

    /// Set the majority threshold for type inference.
    ///
    /// # Arguments
    /// * `threshold` - Value in [0.0, 1.0); the winning tally must be strictly greater
    pub fn majority_threshold(mut self, threshold: f64) -> Self {
        self.majority_threshold = Some(threshold);
        self
    }

    /// Set the minimum number of numeric values for outlier detection.
    pub fn min_outlier_values(mut self, count: usize) -> Self {
        self.min_outlier_values = Some(count);
        self
    }

    /// Set the IQR multiplier for the outlier fence.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    pub fn max_outlier_values(mut self, count: usize) -> Self {
        self.max_outlier_values = Some(count);
        self
    }

    pub fn max_format_issue_samples(mut self, count: usize) -> Self {
        self.max_format_issue_samples = Some(count);
        self
    }

    pub fn max_examples(mut self, count: usize) -> Self {
        self.max_examples = Some(count);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            column_sample_size: self.column_sample_size.unwrap_or(defaults.column_sample_size),
            max_inference_sample: self
                .max_inference_sample
                .unwrap_or(defaults.max_inference_sample),
            majority_threshold: self.majority_threshold.unwrap_or(defaults.majority_threshold),
            min_outlier_values: self.min_outlier_values.unwrap_or(defaults.min_outlier_values),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            max_outlier_values: self.max_outlier_values.unwrap_or(defaults.max_outlier_values),
            max_format_issue_samples: self
                .max_format_issue_samples
                .unwrap_or(defaults.max_format_issue_samples),
            max_examples: self.max_examples.unwrap_or(defaults.max_examples),
        };

        config.validate()?;
        Ok(config)
    }
}
