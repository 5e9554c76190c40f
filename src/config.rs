//! Runtime settings resolved from the environment.
//!
//! ```text
//! GRADE_SCALE=5                      # "9" (default) or "5"
//! GRADE_TABLE_PATH=tables/custom.json
//! LOG_FILE_PATH=logs/rank_grader.log
//! ```

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::error::ConfigError;
use crate::grading::{GradeEngine, GradeTable, Scale};

pub const DEFAULT_LOG_FILE_PATH: &str = "logs/rank_grader.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub scale: Scale,
    /// A custom table replaces the scale's built-in table when set.
    pub table_path: Option<PathBuf>,
    pub log_file_path: String,
}

impl Settings {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scale = match lookup("GRADE_SCALE") {
            Some(s) => s.parse()?,
            None => Scale::Nine,
        };

        Ok(Settings {
            scale,
            table_path: lookup("GRADE_TABLE_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            log_file_path: lookup("LOG_FILE_PATH")
                .unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
        })
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        scale: Option<&str>,
        table_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(s) = scale {
            self.scale = s.parse()?;
        }
        if table_path.is_some() {
            self.table_path = table_path;
        }
        Ok(self)
    }

    /// Builds the grading engine these settings describe.
    pub fn engine(&self) -> Result<GradeEngine> {
        match &self.table_path {
            Some(path) => {
                let table = GradeTable::load(path)?;
                info!(table = table.name(), path = %path.display(), "Using custom grade table");
                Ok(GradeEngine::with_table(table))
            }
            None => Ok(GradeEngine::new(self.scale)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.scale, Scale::Nine);
        assert_eq!(settings.table_path, None);
        assert_eq!(settings.log_file_path, DEFAULT_LOG_FILE_PATH);
    }

    #[test]
    fn test_reads_environment() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("GRADE_SCALE", "5"),
            ("GRADE_TABLE_PATH", "tables/custom.json"),
            ("LOG_FILE_PATH", "/tmp/grader.log"),
        ]))
        .unwrap();
        assert_eq!(settings.scale, Scale::Five);
        assert_eq!(settings.table_path, Some(PathBuf::from("tables/custom.json")));
        assert_eq!(settings.log_file_path, "/tmp/grader.log");
    }

    #[test]
    fn test_invalid_scale_fails_at_construction() {
        let err = Settings::from_lookup(lookup_from(&[("GRADE_SCALE", "7")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidScale("7".into()));
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::from_lookup(lookup_from(&[("GRADE_SCALE", "9")]))
            .unwrap()
            .with_overrides(Some("five"), None)
            .unwrap();
        assert_eq!(settings.scale, Scale::Five);
        assert_eq!(settings.engine().unwrap().table().name(), "5-tier");
    }

    #[test]
    fn test_missing_custom_table_is_an_error() {
        let settings = Settings::from_lookup(lookup_from(&[(
            "GRADE_TABLE_PATH",
            "/nonexistent/rank_grader_table.json",
        )]))
        .unwrap();
        assert!(settings.engine().is_err());
    }
}
