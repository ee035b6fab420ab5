//! Dataset Quality Analysis Library
//!
//! A dataset quality engine built with Rust: it infers each column's semantic
//! type, measures missingness, duplication, outliers and format conformance,
//! and aggregates the results into composite quality scores.
//!
//! # Overview
//!
//! - **Profiling**: Majority-vote type inference, IQR outlier detection, and
//!   strict format re-validation per column
//! - **Scoring**: Completeness, consistency and accuracy rolled into a
//!   composite 0-100 score with a qualitative level
//! - **Ranking**: Columns ordered by how many kinds of issues they carry
//! - **Reporting**: Type distribution and rule-based recommendations bundled
//!   into one serializable report
//! - **Ingestion**: JSON documents and CSV files (via Polars) into [`Dataset`]
//!
//! The engine is a pure function from a [`Dataset`] to a [`DatasetAnalysis`]
//! and [`QualityMetrics`]. It performs no I/O and never fails; malformed input
//! is rejected at the ingestion boundary.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_quality::{Dataset, DatasetAnalyzer, IssueRanker, QualityScorer};
//! use serde_json::json;
//!
//! let dataset = Dataset::from_json(json!([
//!     { "email": "a@b.com", "age": 31 },
//!     { "email": "bad",     "age": 29 },
//!     { "email": "c@d.org", "age": null },
//! ]))?;
//!
//! let analysis = DatasetAnalyzer::default().analyze(&dataset);
//! let metrics = QualityScorer::score(&analysis);
//!
//! println!("Score: {} ({})", metrics.composite_score, metrics.score_level);
//! for column in IssueRanker::rank(&analysis) {
//!     println!("{}: {} issue types", column.column.column_name, column.issue_count);
//! }
//! ```
//!
//! # Configuration
//!
//! Use [`AnalysisConfig`] to change sample sizes and thresholds. The defaults
//! reproduce the reference numbers that downstream consumers rely on.
//!
//! ```rust,ignore
//! use lex_quality::{AnalysisConfig, DatasetAnalyzer};
//!
//! let config = AnalysisConfig::builder()
//!     .column_sample_size(50)
//!     .iqr_multiplier(3.0)
//!     .build()?;
//!
//! let analysis = DatasetAnalyzer::new(config).analyze(&dataset);
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{QualityError, Result as QualityResult, ResultExt};
pub use loader::{load_csv, load_dataset, load_json, parse_csv};
pub use profiler::{
    ColumnAnalyzer, DatasetAnalyzer, Fence, FormatIssues, FormatValidator, OutlierDetector,
    OutlierReport, TypeInferencer, analyze_dataset,
};
pub use quality::{IssueKind, IssueRanker, QualityScorer, RankedColumn, type_distribution};
pub use reporting::{QualityReport, Recommendation, recommendations_for};
pub use types::{
    ColumnAnalysis, DataType, Dataset, DatasetAnalysis, QualityMetrics, Row, ScoreLevel, Value,
};
