use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{QualityError, Result};

// ============================================================================
// Input model
// ============================================================================

/// A single cell value.
///
/// Serialized untagged, so a `Value` reads and writes as a plain JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Value {
    /// Missing means null or the empty string. Whitespace-only strings are present.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// String form used for uniqueness and for text-based classification.
    pub fn stringify(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

static NULL_VALUE: Value = Value::Null;

/// One record: column name to value, in column order.
pub type Row = IndexMap<String, Value>;

/// An ordered sequence of rows sharing the column set of the first row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names taken from the first row.
    pub fn column_names(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All values of one column in row order; absent keys read as `Null`.
    pub fn column_values<'a>(&'a self, column: &str) -> Vec<&'a Value> {
        self.rows
            .iter()
            .map(|row| row.get(column).unwrap_or(&NULL_VALUE))
            .collect()
    }
}

impl FromIterator<Row> for Dataset {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ============================================================================
// Analysis model
// ============================================================================

/// Semantic type inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Number,
    Boolean,
    Email,
    Url,
    Date,
    Text,
    Unknown,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::Email => "email",
            DataType::Url => "url",
            DataType::Date => "date",
            DataType::Text => "text",
            DataType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-column quality statistics.
///
/// Field names are a stable contract for renderers and prompt builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAnalysis {
    pub column_name: String,
    pub data_type: DataType,
    pub total_rows: usize,
    pub missing_count: usize,
    pub missing_percent: f64,
    pub unique_count: usize,
    pub unique_percent: f64,
    pub duplicate_count: usize,
    pub duplicate_percent: f64,
    pub outliers_count: usize,
    pub outliers_percent: f64,
    pub outlier_values: Vec<f64>,
    pub format_issues_count: usize,
    pub format_issues_percent: f64,
    pub examples: Vec<Value>,
}

/// Result of analyzing a whole dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetAnalysis {
    pub columns: IndexMap<String, ColumnAnalysis>,
    pub row_count: usize,
    pub column_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl DatasetAnalysis {
    pub fn new(columns: IndexMap<String, ColumnAnalysis>, row_count: usize) -> Self {
        Self {
            column_count: columns.len(),
            columns,
            row_count,
            timestamp: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(IndexMap::new(), 0)
    }

    /// Look up one column's analysis by name.
    pub fn column(&self, name: &str) -> Result<&ColumnAnalysis> {
        self.columns
            .get(name)
            .ok_or_else(|| QualityError::ColumnNotFound(name.to_string()))
    }
}

// `timestamp` is informational and excluded from equality.
impl PartialEq for DatasetAnalysis {
    fn eq(&self, other: &Self) -> bool {
        self.row_count == other.row_count
            && self.column_count == other.column_count
            && self.columns == other.columns
    }
}

/// Qualitative band for a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreLevel {
    /// Inclusive lower bounds evaluated top-down.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 90 => ScoreLevel::Excellent,
            s if s >= 70 => ScoreLevel::Good,
            s if s >= 50 => ScoreLevel::Fair,
            _ => ScoreLevel::Poor,
        }
    }

    /// Fixed summary sentence for the level.
    pub fn summary(&self) -> &'static str {
        match self {
            ScoreLevel::Excellent => {
                "Dataset is in excellent condition with minimal quality issues."
            }
            ScoreLevel::Good => {
                "Dataset is in good condition with some quality issues to address."
            }
            ScoreLevel::Fair => {
                "Dataset has fair quality with several issues that should be fixed."
            }
            ScoreLevel::Poor => "Dataset has significant quality issues that require attention.",
        }
    }
}

impl fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScoreLevel::Excellent => "Excellent",
            ScoreLevel::Good => "Good",
            ScoreLevel::Fair => "Fair",
            ScoreLevel::Poor => "Poor",
        };
        f.write_str(name)
    }
}

/// Aggregated dataset quality scores, each on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub completeness: u32,
    pub consistency: u32,
    pub accuracy: u32,
    pub composite_score: u32,
    pub score_level: ScoreLevel,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values() {
        assert!(Value::Null.is_missing());
        assert!(Value::from("").is_missing());
        assert!(!Value::from(" ").is_missing());
        assert!(!Value::from(0.0).is_missing());
        assert!(!Value::from(false).is_missing());
    }

    #[test]
    fn test_stringify() {
        assert_eq!(Value::from(1.0).stringify(), "1");
        assert_eq!(Value::from(2.5).stringify(), "2.5");
        assert_eq!(Value::from(true).stringify(), "true");
        assert_eq!(Value::from("Alice").stringify(), "Alice");
    }

    #[test]
    fn test_value_json_shape() {
        let values = vec![
            Value::Null,
            Value::from(true),
            Value::from(3.5),
            Value::from("x"),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,true,3.5,"x"]"#);
    }

    #[test]
    fn test_dataset_column_values_fill_absent_keys() {
        let mut first = Row::new();
        first.insert("a".to_string(), Value::from(1.0));
        first.insert("b".to_string(), Value::from("x"));
        let mut second = Row::new();
        second.insert("a".to_string(), Value::from(2.0));

        let dataset = Dataset::new(vec![first, second]);
        assert_eq!(dataset.column_names(), vec!["a", "b"]);
        assert_eq!(
            dataset.column_values("b"),
            vec![&Value::from("x"), &Value::Null]
        );
    }

    #[test]
    fn test_score_level_boundaries() {
        assert_eq!(ScoreLevel::from_score(100), ScoreLevel::Excellent);
        assert_eq!(ScoreLevel::from_score(90), ScoreLevel::Excellent);
        assert_eq!(ScoreLevel::from_score(89), ScoreLevel::Good);
        assert_eq!(ScoreLevel::from_score(70), ScoreLevel::Good);
        assert_eq!(ScoreLevel::from_score(69), ScoreLevel::Fair);
        assert_eq!(ScoreLevel::from_score(50), ScoreLevel::Fair);
        assert_eq!(ScoreLevel::from_score(49), ScoreLevel::Poor);
        assert_eq!(ScoreLevel::from_score(0), ScoreLevel::Poor);
    }

    #[test]
    fn test_data_type_serialization() {
        assert_eq!(serde_json::to_string(&DataType::Email).unwrap(), r#""email""#);
        assert_eq!(serde_json::to_string(&DataType::Url).unwrap(), r#""url""#);
        assert_eq!(DataType::Number.to_string(), "number");
    }

    #[test]
    fn test_column_lookup() {
        let analysis = DatasetAnalysis::empty();
        let err = analysis.column("missing").unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }
}
