//! Type inference by per-value classification and majority vote.

use crate::config::AnalysisConfig;
use crate::types::{DataType, Value};
use crate::utils::{is_boolean_literal, is_date, is_email, is_number, is_url};

/// Tie-break order: on equal tallies the earlier entry wins.
const VOTE_ORDER: [DataType; 5] = [
    DataType::Number,
    DataType::Boolean,
    DataType::Email,
    DataType::Url,
    DataType::Date,
];

/// Classifies a column sample into a semantic [`DataType`].
#[derive(Debug, Clone, Copy)]
pub struct TypeInferencer {
    max_sample: usize,
    majority_threshold: f64,
}

impl Default for TypeInferencer {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl TypeInferencer {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            max_sample: config.max_inference_sample,
            majority_threshold: config.majority_threshold,
        }
    }

    /// Infer the type of a sample of non-missing values.
    ///
    /// Only the first `max_sample` values are considered. The winning type
    /// must strictly exceed `majority_threshold` of the sample size, otherwise
    /// the column is `Text`. An empty sample is `Unknown`.
    pub fn infer(&self, values: &[&Value]) -> DataType {
        let sample = &values[..values.len().min(self.max_sample)];
        if sample.is_empty() {
            return DataType::Unknown;
        }

        let mut tallies = [0usize; VOTE_ORDER.len()];
        for value in sample {
            if let Some(kind) = classify_value(value)
                && let Some(slot) = VOTE_ORDER.iter().position(|t| *t == kind)
            {
                tallies[slot] += 1;
            }
        }

        // Strict `>` keeps the first of equal tallies.
        let mut best = 0;
        for (slot, &count) in tallies.iter().enumerate().skip(1) {
            if count > tallies[best] {
                best = slot;
            }
        }

        if tallies[best] as f64 > sample.len() as f64 * self.majority_threshold {
            VOTE_ORDER[best]
        } else {
            DataType::Text
        }
    }
}

/// Classify one value, checking boolean, number, email, url, date in turn.
///
/// Returns `None` for values that match none of them.
pub fn classify_value(value: &Value) -> Option<DataType> {
    let normalized = value.stringify().trim().to_lowercase();

    if is_boolean_literal(&normalized) {
        Some(DataType::Boolean)
    } else if is_number(&normalized) {
        Some(DataType::Number)
    } else if is_email(&normalized) {
        Some(DataType::Email)
    } else if is_url(&normalized) {
        Some(DataType::Url)
    } else if is_date(&normalized) {
        Some(DataType::Date)
    } else {
        None
    }
}
