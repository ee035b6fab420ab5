use crate::types::{ColumnAnalysis, DataType, DatasetAnalysis};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Category of column-level problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    #[serde(rename = "missing")]
    Missing,
    #[serde(rename = "duplicates")]
    Duplicate,
    #[serde(rename = "outliers")]
    Outlier,
    #[serde(rename = "format")]
    Format,
}

impl IssueKind {
    pub const ALL: [IssueKind; 4] = [
        IssueKind::Missing,
        IssueKind::Duplicate,
        IssueKind::Outlier,
        IssueKind::Format,
    ];

    /// Number of affected values in a column for this category.
    pub fn count_in(&self, column: &ColumnAnalysis) -> usize {
        match self {
            IssueKind::Missing => column.missing_count,
            IssueKind::Duplicate => column.duplicate_count,
            IssueKind::Outlier => column.outliers_count,
            IssueKind::Format => column.format_issues_count,
        }
    }

    /// Categories with a strictly positive count, in canonical order.
    pub fn present_in(column: &ColumnAnalysis) -> Vec<IssueKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| kind.count_in(column) > 0)
            .collect()
    }
}

/// A column with at least one kind of issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedColumn {
    #[serde(flatten)]
    pub column: ColumnAnalysis,
    pub issue_count: usize,
    pub issues: Vec<IssueKind>,
}

/// Orders columns by how many issue categories they exhibit.
pub struct IssueRanker;

impl IssueRanker {
    /// Columns with at least one issue, most categories first.
    ///
    /// Ties keep the original column order.
    pub fn rank(analysis: &DatasetAnalysis) -> Vec<RankedColumn> {
        let mut ranked: Vec<RankedColumn> = analysis
            .columns
            .values()
            .filter_map(|column| {
                let issues = IssueKind::present_in(column);
                (!issues.is_empty()).then(|| RankedColumn {
                    column: column.clone(),
                    issue_count: issues.len(),
                    issues,
                })
            })
            .collect();

        // `sort_by` is stable
        ranked.sort_by(|a, b| b.issue_count.cmp(&a.issue_count));
        ranked
    }
}

/// Number of columns per inferred type, keyed in first-seen order.
pub fn type_distribution(analysis: &DatasetAnalysis) -> IndexMap<DataType, usize> {
    let mut distribution = IndexMap::new();
    for column in analysis.columns.values() {
        *distribution.entry(column.data_type).or_insert(0) += 1;
    }
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn column(
        name: &str,
        data_type: DataType,
        missing: usize,
        duplicate: usize,
        outliers: usize,
        format: usize,
    ) -> ColumnAnalysis {
        ColumnAnalysis {
            column_name: name.to_string(),
            data_type,
            total_rows: 10,
            missing_count: missing,
            missing_percent: 0.0,
            unique_count: 10 - duplicate,
            unique_percent: 0.0,
            duplicate_count: duplicate,
            duplicate_percent: 0.0,
            outliers_count: outliers,
            outliers_percent: 0.0,
            outlier_values: vec![],
            format_issues_count: format,
            format_issues_percent: 0.0,
            examples: vec![],
        }
    }

    fn analysis(columns: Vec<ColumnAnalysis>) -> DatasetAnalysis {
        DatasetAnalysis::new(
            columns
                .into_iter()
                .map(|c| (c.column_name.clone(), c))
                .collect(),
            10,
        )
    }

    #[test]
    fn test_rank_filters_and_orders() {
        let ranked = IssueRanker::rank(&analysis(vec![
            column("clean", DataType::Number, 0, 0, 0, 0),
            column("one_a", DataType::Text, 1, 0, 0, 0),
            column("three", DataType::Number, 2, 2, 1, 0),
            column("one_b", DataType::Text, 0, 5, 0, 0),
            column("four", DataType::Number, 1, 3, 1, 2),
        ]));

        let order: Vec<(&str, usize)> = ranked
            .iter()
            .map(|r| (r.column.column_name.as_str(), r.issue_count))
            .collect();
        assert_eq!(
            order,
            vec![("four", 4), ("three", 3), ("one_a", 1), ("one_b", 1)]
        );
        assert_eq!(
            ranked[1].issues,
            vec![IssueKind::Missing, IssueKind::Duplicate, IssueKind::Outlier]
        );
    }

    #[test]
    fn test_rank_clean_dataset() {
        let ranked = IssueRanker::rank(&analysis(vec![column("a", DataType::Text, 0, 0, 0, 0)]));
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_ranked_column_serializes_flat() {
        let ranked = IssueRanker::rank(&analysis(vec![column("a", DataType::Email, 0, 0, 0, 2)]));
        let json = serde_json::to_value(&ranked[0]).unwrap();

        assert_eq!(json["columnName"], "a");
        assert_eq!(json["formatIssuesCount"], 2);
        assert_eq!(json["issueCount"], 1);
        assert_eq!(json["issues"], serde_json::json!(["format"]));
    }

    #[test]
    fn test_type_distribution() {
        let distribution = type_distribution(&analysis(vec![
            column("a", DataType::Text, 0, 0, 0, 0),
            column("b", DataType::Number, 0, 0, 0, 0),
            column("c", DataType::Text, 0, 0, 0, 0),
        ]));

        let entries: Vec<(DataType, usize)> = distribution.into_iter().collect();
        assert_eq!(entries, vec![(DataType::Text, 2), (DataType::Number, 1)]);
    }
}
