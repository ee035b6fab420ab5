//! Rule-based remediation suggestions per column issue.

use crate::quality::IssueKind;
use crate::types::ColumnAnalysis;
use serde::{Deserialize, Serialize};

/// A fixed-text remediation suggestion for one issue category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub message: String,
    pub actions: Vec<String>,
}

impl Recommendation {
    fn new(kind: IssueKind, count: usize) -> Self {
        let (message, actions): (String, [&str; 3]) = match kind {
            IssueKind::Missing => (
                format!("Handle {count} missing values"),
                [
                    "Remove rows with missing data",
                    "Impute with average (for numeric) or mode",
                    "Mark as \"unknown\"",
                ],
            ),
            IssueKind::Duplicate => (
                format!("Address {count} duplicate values"),
                [
                    "Remove exact duplicates",
                    "Normalize values (trim, lowercase)",
                    "Consolidate variants (e.g., \"USA\" vs \"US\")",
                ],
            ),
            IssueKind::Outlier => (
                format!("Review {count} potential outliers"),
                [
                    "Validate against business rules",
                    "Remove if erroneous",
                    "Keep if legitimate",
                ],
            ),
            IssueKind::Format => (
                format!("Fix {count} format inconsistencies"),
                [
                    "Standardize formatting",
                    "Use regex validation",
                    "Apply consistent parsing rules",
                ],
            ),
        };

        Self {
            kind,
            message,
            actions: actions.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// One recommendation per issue category present in the column, in the
/// order missing, duplicates, outliers, format.
pub fn recommendations_for(column: &ColumnAnalysis) -> Vec<Recommendation> {
    IssueKind::present_in(column)
        .into_iter()
        .map(|kind| Recommendation::new(kind, kind.count_in(column)))
        .collect()
}
