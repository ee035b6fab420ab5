//! Dataset ingestion from JSON documents, polars DataFrames and files.
//!
//! This is the only place where input shape is checked. Rows that are not
//! flat records are rejected with [`QualityError::MalformedRow`]; the
//! analysis engine downstream never fails.

use crate::error::{QualityError, Result, ResultExt};
use crate::types::{Dataset, Row, Value};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::{DataFrame, DataType as PolarsDataType, SerReader, Series};
use serde_json::Value as JsonValue;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

impl Dataset {
    /// Build a dataset from a parsed JSON document.
    ///
    /// Accepts an array of records, an object whose `data` field is an array
    /// of records, or a single record. Any other top-level value yields an
    /// empty dataset.
    pub fn from_json(document: JsonValue) -> Result<Self> {
        let records = match document {
            JsonValue::Array(items) => items,
            JsonValue::Object(mut map) => {
                let data = match map.get_mut("data") {
                    Some(JsonValue::Array(items)) => Some(std::mem::take(items)),
                    _ => None,
                };
                data.unwrap_or_else(|| vec![JsonValue::Object(map)])
            }
            other => {
                warn!(
                    "Top-level JSON {} is not a dataset, treating as empty",
                    json_kind(&other)
                );
                return Ok(Self::default());
            }
        };

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| row_from_json(index, record))
            .collect::<Result<Vec<Row>>>()
            .map(Self::new)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json(serde_json::from_str(json)?)
    }

    /// Build a dataset from a polars DataFrame, column by column.
    ///
    /// String, boolean and numeric columns map to the matching [`Value`];
    /// other dtypes are cast to strings first.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let mut rows: Vec<Row> = (0..df.height())
            .map(|_| Row::with_capacity(df.width()))
            .collect();

        for column in df.get_columns() {
            let name = column.name().to_string();
            let values = series_values(column.as_materialized_series())
                .context(format!("Converting column '{name}'"))?;
            for (row, value) in rows.iter_mut().zip(values) {
                row.insert(name.clone(), value);
            }
        }

        Ok(Self::new(rows))
    }
}

fn row_from_json(index: usize, record: JsonValue) -> Result<Row> {
    let fields = match record {
        JsonValue::Object(fields) => fields,
        other => {
            return Err(QualityError::MalformedRow {
                row: index,
                reason: format!("expected an object, found {}", json_kind(&other)),
            });
        }
    };

    let mut row = Row::with_capacity(fields.len());
    for (key, field) in fields {
        let value = match field {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => {
                Value::Number(n.as_f64().ok_or_else(|| QualityError::MalformedRow {
                    row: index,
                    reason: format!("field '{key}' is not representable as a number"),
                })?)
            }
            JsonValue::String(s) => Value::String(s),
            nested => {
                return Err(QualityError::MalformedRow {
                    row: index,
                    reason: format!("field '{key}' is {}, expected a scalar", json_kind(&nested)),
                });
            }
        };
        row.insert(key, value);
    }
    Ok(row)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

fn is_numeric_dtype(dtype: &PolarsDataType) -> bool {
    matches!(
        dtype,
        PolarsDataType::Int8
            | PolarsDataType::Int16
            | PolarsDataType::Int32
            | PolarsDataType::Int64
            | PolarsDataType::UInt8
            | PolarsDataType::UInt16
            | PolarsDataType::UInt32
            | PolarsDataType::UInt64
            | PolarsDataType::Float32
            | PolarsDataType::Float64
    )
}

fn series_values(series: &Series) -> polars::error::PolarsResult<Vec<Value>> {
    let dtype = series.dtype();

    if dtype == &PolarsDataType::String {
        return Ok(series.str()?.into_iter().map(Value::from).collect());
    }
    if dtype == &PolarsDataType::Boolean {
        return Ok(series.bool()?.into_iter().map(Value::from).collect());
    }
    if is_numeric_dtype(dtype) {
        let floats = series.cast(&PolarsDataType::Float64)?;
        return Ok(floats.f64()?.into_iter().map(Value::from).collect());
    }

    debug!(
        "Casting column '{}' of dtype {:?} to strings",
        series.name(),
        dtype
    );
    let strings = series.cast(&PolarsDataType::String)?;
    Ok(strings.str()?.into_iter().map(Value::from).collect())
}

// =============================================================================
// File loading
// =============================================================================

/// Read CSV with a header row, keeping every column as a string.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).context(format!("Reading {}", path.display()))?;
    let dataset = parse_csv(&content).context(format!("Parsing {}", path.display()))?;

    info!("Loaded CSV {}: {} rows", path.display(), dataset.len());
    Ok(dataset)
}

/// Parse CSV text held in memory, keeping every column as a string.
///
/// Blank lines are skipped. A line of bare delimiters is still a row.
pub fn parse_csv(content: &str) -> Result<Dataset> {
    let text: String = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .flat_map(|line| [line, "\n"])
        .collect();

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(text))
        .finish()?;

    Dataset::from_dataframe(&df)
}

/// Read a JSON document and convert it with [`Dataset::from_json`].
pub fn load_json(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).context(format!("Reading {}", path.display()))?;
    let dataset =
        Dataset::from_json_str(&content).context(format!("Parsing {}", path.display()))?;

    info!("Loaded JSON {}: {} rows", path.display(), dataset.len());
    Ok(dataset)
}

/// Load a dataset, choosing the reader from the file extension.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" | "txt" => load_csv(path),
        "json" => load_json(path),
        other => Err(QualityError::UnsupportedFormat(if other.is_empty() {
            path.display().to_string()
        } else {
            other.to_string()
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, DataFrame};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_from_json_array() {
        let dataset = Dataset::from_json(json!([
            { "name": "Ada", "age": 36, "active": true, "email": null },
            { "name": "Linus", "age": 54.5, "active": false, "email": "l@k.org" }
        ]))
        .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.column_names(), vec!["name", "age", "active", "email"]);
        assert_eq!(dataset.rows()[0]["age"], Value::Number(36.0));
        assert_eq!(dataset.rows()[0]["email"], Value::Null);
        assert_eq!(dataset.rows()[1]["active"], Value::Bool(false));
    }

    #[test]
    fn test_from_json_data_wrapper_and_single_object() {
        let wrapped = Dataset::from_json(json!({ "data": [{ "a": 1 }, { "a": 2 }] })).unwrap();
        assert_eq!(wrapped.len(), 2);

        let single = Dataset::from_json(json!({ "a": 1, "b": "x" })).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_from_json_scalar_is_empty() {
        assert!(Dataset::from_json(json!(42)).unwrap().is_empty());
        assert!(Dataset::from_json(json!("rows")).unwrap().is_empty());
        assert!(Dataset::from_json(json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_from_json_rejects_non_object_row() {
        let err = Dataset::from_json(json!([{ "a": 1 }, [1, 2]])).unwrap_err();
        assert!(matches!(err, QualityError::MalformedRow { row: 1, .. }));
    }

    #[test]
    fn test_from_json_rejects_nested_field() {
        let err = Dataset::from_json(json!([{ "a": { "b": 1 } }])).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_ROW");
        assert!(err.to_string().contains("field 'a' is an object"));
    }

    #[test]
    fn test_from_dataframe() {
        let df = DataFrame::new(vec![
            Column::new("city".into(), &[Some("Oslo"), None, Some("Lima")]),
            Column::new("pop".into(), &[Some(700i64), Some(1), None]),
            Column::new("capital".into(), &[true, false, true]),
        ])
        .unwrap();

        let dataset = Dataset::from_dataframe(&df).unwrap();
        assert_eq!(dataset.column_names(), vec!["city", "pop", "capital"]);
        assert_eq!(
            dataset.column_values("city"),
            vec![&Value::from("Oslo"), &Value::Null, &Value::from("Lima")]
        );
        assert_eq!(dataset.rows()[0]["pop"], Value::Number(700.0));
        assert_eq!(dataset.rows()[2]["pop"], Value::Null);
        assert_eq!(dataset.rows()[1]["capital"], Value::Bool(false));
    }

    #[test]
    fn test_parse_csv_keeps_strings() {
        let dataset = parse_csv("id,score\n1,10\n2,\n3,abc\n").unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.rows()[0]["id"], Value::from("1"));
        assert!(dataset.rows()[1]["score"].is_missing());
        assert_eq!(dataset.rows()[2]["score"], Value::from("abc"));
    }

    #[test]
    fn test_parse_csv_skips_blank_lines() {
        let dataset = parse_csv("a,b\n1,x\n\n2,y\n   \n").unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[1]["a"], Value::from("2"));

        let metrics = crate::quality::QualityScorer::score(&crate::profiler::analyze_dataset(
            &dataset,
        ));
        assert_eq!(metrics.completeness, 100);
    }

    #[test]
    fn test_parse_csv_keeps_delimiter_only_row() {
        let dataset = parse_csv("a,b\n1,x\n,\n").unwrap();

        assert_eq!(dataset.len(), 2);
        assert!(dataset.rows()[1]["a"].is_missing());
        assert!(dataset.rows()[1]["b"].is_missing());
    }

    #[test]
    fn test_load_dataset_unsupported_extension() {
        let err = load_dataset("report.xlsx").unwrap_err();
        assert!(matches!(err, QualityError::UnsupportedFormat(ext) if ext == "xlsx"));
    }
}
