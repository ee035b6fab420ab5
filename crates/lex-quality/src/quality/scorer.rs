use crate::types::{ColumnAnalysis, DatasetAnalysis, QualityMetrics, ScoreLevel};
use tracing::debug;

/// Aggregates per-column statistics into dataset-level quality scores.
///
/// - completeness: share of non-missing cells over the whole grid
/// - consistency: per-column share of values that are present and well-formed
/// - accuracy: per-column share of values that are neither outliers nor malformed
///
/// The composite score is the rounded mean of the three unrounded components.
pub struct QualityScorer;

impl QualityScorer {
    pub fn score(analysis: &DatasetAnalysis) -> QualityMetrics {
        let completeness = Self::completeness(analysis);
        let consistency = Self::column_mean(analysis, |col| {
            col.missing_count + col.format_issues_count
        });
        let accuracy = Self::column_mean(analysis, |col| {
            col.outliers_count + col.format_issues_count
        });

        let composite_score = to_score((completeness + consistency + accuracy) / 3.0);
        let score_level = ScoreLevel::from_score(composite_score);

        debug!(
            "Quality scores: completeness={:.2}, consistency={:.2}, accuracy={:.2}, composite={}",
            completeness, consistency, accuracy, composite_score
        );

        QualityMetrics {
            completeness: to_score(completeness),
            consistency: to_score(consistency),
            accuracy: to_score(accuracy),
            composite_score,
            score_level,
            summary: score_level.summary().to_string(),
        }
    }

    fn completeness(analysis: &DatasetAnalysis) -> f64 {
        let total_cells = analysis.row_count * analysis.column_count;
        if total_cells == 0 {
            return 100.0;
        }

        let missing_cells: usize = analysis.columns.values().map(|c| c.missing_count).sum();
        100.0 - (missing_cells as f64 / total_cells as f64) * 100.0
    }

    /// Mean over columns of `(total_rows - bad) / total_rows * 100`.
    ///
    /// No columns scores 100, as does a column with no rows.
    fn column_mean(analysis: &DatasetAnalysis, bad: impl Fn(&ColumnAnalysis) -> usize) -> f64 {
        if analysis.columns.is_empty() {
            return 100.0;
        }

        let sum: f64 = analysis
            .columns
            .values()
            .map(|col| {
                if col.total_rows == 0 {
                    100.0
                } else {
                    let good = col.total_rows.saturating_sub(bad(col));
                    good as f64 / col.total_rows as f64 * 100.0
                }
            })
            .sum();
        sum / analysis.columns.len() as f64
    }
}

fn to_score(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}
