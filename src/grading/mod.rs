//! Rank-based grading and grade aggregation.
//!
//! This module validates rank records, converts them to percentiles, maps
//! the percentiles to grades through a boundary table, and averages grades
//! across a batch while recording every subject it had to skip.

pub mod aggregate;
pub mod engine;
pub mod grade;
pub mod table;
pub mod types;
pub mod utility;
pub mod validate;

pub use engine::GradeEngine;
pub use table::{GradeBoundary, GradeTable, Scale};
pub use types::{AggregateResult, GradeReport, GradedSubject, SkipKind, SkippedSubject, Subject};
