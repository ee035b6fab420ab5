use crate::quality::{IssueRanker, QualityScorer, RankedColumn, type_distribution};
use crate::reporting::{Recommendation, recommendations_for};
use crate::types::{DataType, DatasetAnalysis, QualityMetrics};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// Everything the engine produces for one dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    /// When the report was assembled
    pub generated_at: DateTime<Utc>,
    /// Source file, when the dataset came from one
    pub input_file: Option<String>,
    pub analysis: DatasetAnalysis,
    pub metrics: QualityMetrics,
    /// Columns with issues, most issue categories first
    pub column_issues: Vec<RankedColumn>,
    pub type_distribution: IndexMap<DataType, usize>,
    /// Only columns with at least one recommendation appear
    pub recommendations: IndexMap<String, Vec<Recommendation>>,
}

impl QualityReport {
    pub fn new(analysis: DatasetAnalysis, input_file: Option<&str>) -> Self {
        let metrics = QualityScorer::score(&analysis);
        let column_issues = IssueRanker::rank(&analysis);
        let type_distribution = type_distribution(&analysis);
        let recommendations = analysis
            .columns
            .iter()
            .map(|(name, column)| (name.clone(), recommendations_for(column)))
            .filter(|(_, recs)| !recs.is_empty())
            .collect();

        Self {
            generated_at: Utc::now(),
            input_file: input_file.map(str::to_string),
            analysis,
            metrics,
            column_issues,
            type_distribution,
            recommendations,
        }
    }
}
