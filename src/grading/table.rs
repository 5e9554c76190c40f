//! Percentile-to-grade boundary tables.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{CalculationError, ConfigError};

/// Percentile ceilings of the 9-tier scale, best grade first.
static NINE_TIER: &[(f64, u8)] = &[
    (4.0, 1),
    (11.0, 2),
    (23.0, 3),
    (40.0, 4),
    (60.0, 5),
    (77.0, 6),
    (89.0, 7),
    (96.0, 8),
    (100.0, 9),
];

/// Percentile ceilings of the 5-tier scale, best grade first.
static FIVE_TIER: &[(f64, u8)] = &[
    (10.0, 1),
    (34.0, 2),
    (66.0, 3),
    (90.0, 4),
    (100.0, 5),
];

/// The two supported grading scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Nine,
    Five,
}

impl Scale {
    pub fn table(self) -> GradeTable {
        let (name, rows) = match self {
            Scale::Nine => ("9-tier", NINE_TIER),
            Scale::Five => ("5-tier", FIVE_TIER),
        };
        GradeTable::unchecked(
            name,
            rows.iter()
                .map(|&(max_percentile, grade)| GradeBoundary {
                    max_percentile,
                    grade,
                })
                .collect(),
        )
    }
}

impl FromStr for Scale {
    type Err = ConfigError;

    /// Accepts `9`/`nine` and `5`/`five`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "9" | "nine" => Ok(Scale::Nine),
            "5" | "five" => Ok(Scale::Five),
            _ => Err(ConfigError::InvalidScale(s.to_string())),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Nine => write!(f, "9"),
            Scale::Five => write!(f, "5"),
        }
    }
}

/// Every percentile up to and including `max_percentile` earns `grade`,
/// unless an earlier boundary already matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBoundary {
    pub max_percentile: f64,
    pub grade: u8,
}

/// On-disk shape of a custom table.
#[derive(Deserialize)]
struct TableFile {
    #[serde(default = "default_table_name")]
    name: String,
    boundaries: Vec<GradeBoundary>,
}

fn default_table_name() -> String {
    "custom".to_string()
}

/// An ordered boundary table for one scale.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeTable {
    name: String,
    boundaries: Vec<GradeBoundary>,
}

impl GradeTable {
    pub(crate) fn unchecked(name: &str, boundaries: Vec<GradeBoundary>) -> Self {
        GradeTable {
            name: name.to_string(),
            boundaries,
        }
    }

    /// Builds a table after checking that the boundaries are ascending,
    /// lie in `(0, 100]`, carry positive grades and end at 100.
    pub fn from_boundaries(name: &str, boundaries: Vec<GradeBoundary>) -> Result<Self, ConfigError> {
        let invalid = |msg: String| Err(ConfigError::InvalidTable(msg));

        if boundaries.is_empty() {
            return invalid("table has no boundaries".into());
        }

        let mut previous = 0.0;
        for (i, b) in boundaries.iter().enumerate() {
            if !(b.max_percentile > 0.0 && b.max_percentile <= 100.0) {
                return invalid(format!(
                    "boundary {i}: percentile {} is outside (0, 100]",
                    b.max_percentile
                ));
            }
            if b.max_percentile <= previous {
                return invalid(format!(
                    "boundary {i}: percentile {} does not exceed {}",
                    b.max_percentile, previous
                ));
            }
            if b.grade == 0 {
                return invalid(format!("boundary {i}: grade must be positive"));
            }
            previous = b.max_percentile;
        }

        if previous != 100.0 {
            return invalid(format!("last boundary is {previous}, expected 100"));
        }

        Ok(Self::unchecked(name, boundaries))
    }

    /// Loads and validates a custom table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read grade table {}", path.display()))?;
        let file: TableFile = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse grade table {}", path.display()))?;
        Ok(Self::from_boundaries(&file.name, file.boundaries)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn boundaries(&self) -> &[GradeBoundary] {
        &self.boundaries
    }

    /// Returns the grade of the first boundary at or above `percentile`.
    ///
    /// Falls back to the last boundary's grade when nothing matches.
    pub fn lookup(&self, percentile: f64) -> Result<u8, CalculationError> {
        let last = self.boundaries.last().ok_or(CalculationError::EmptyTable)?;
        if !percentile.is_finite() {
            return Err(CalculationError::NonFinitePercentile(percentile));
        }

        Ok(self
            .boundaries
            .iter()
            .find(|b| percentile <= b.max_percentile)
            .unwrap_or(last)
            .grade)
    }

    /// Human-readable percentile range for each grade, best grade first.
    pub fn describe(&self) -> Vec<String> {
        let mut lower = None;
        self.boundaries
            .iter()
            .map(|b| {
                let text = match lower {
                    None => format!("top {}% or better", b.max_percentile),
                    Some(low) => format!("{}%–{}%", low, b.max_percentile),
                };
                lower = Some(b.max_percentile);
                text
            })
            .collect()
    }
}
