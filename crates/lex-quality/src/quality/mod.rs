//! Data quality scoring module.
//!
//! This module aggregates a [`DatasetAnalysis`](crate::types::DatasetAnalysis)
//! into composite quality scores and orders columns by how many kinds of
//! issues they carry.

mod ranking;
mod scorer;

pub use ranking::{IssueKind, IssueRanker, RankedColumn, type_distribution};
pub use scorer::QualityScorer;
