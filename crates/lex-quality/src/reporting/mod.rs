//! Report assembly module.
//!
//! This module bundles the outputs of the engine into one serializable
//! document for the CLI and for downstream consumers (renderers, prompt
//! builders).
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_quality::{DatasetAnalyzer, QualityReport};
//!
//! let analysis = DatasetAnalyzer::default().analyze(&dataset);
//! let report = QualityReport::new(analysis, Some("data/customers.csv"));
//!
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

mod recommendations;
mod report;

pub use recommendations::{Recommendation, recommendations_for};
pub use report::QualityReport;
