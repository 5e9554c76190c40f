//! Loading subject records from CSV and JSON files.
//!
//! Each record is deserialized on its own. A record that does not fit the
//! [`Subject`] shape is rejected with a reason and loading carries on.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use crate::grading::types::{SkipKind, SkippedSubject, Subject};

/// Subjects read from a file, plus the records that could not be read.
#[derive(Debug, Default)]
pub struct LoadedSubjects {
    pub subjects: Vec<Subject>,
    pub rejected: Vec<SkippedSubject>,
}

impl LoadedSubjects {
    fn reject(&mut self, name: String, reason: &str) {
        warn!(record = %name, reason, "Rejected subject record");
        self.rejected
            .push(SkippedSubject::new(&name, reason, SkipKind::Malformed));
    }
}

/// Reads subjects from `path`, choosing the format by file extension.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, has an unsupported
/// extension, or is not structurally CSV / a JSON array.
pub fn load_subjects(path: impl AsRef<Path>) -> Result<LoadedSubjects> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let loaded = match extension.as_deref() {
        Some("csv") => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            parse_csv(file)?
        }
        Some("json") => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse_json(&content)?
        }
        _ => bail!(
            "unsupported subject file {}: expected .csv or .json",
            path.display()
        ),
    };

    debug!(
        path = %path.display(),
        subjects = loaded.subjects.len(),
        rejected = loaded.rejected.len(),
        "Loaded subject records"
    );
    Ok(loaded)
}

/// Parses CSV with a header row naming the [`Subject`] fields.
pub fn parse_csv<R: Read>(reader: R) -> Result<LoadedSubjects> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers().context("failed to read CSV header")?.clone();
    let name_column = headers.iter().position(|h| h == "name");

    let mut loaded = LoadedSubjects::default();

    for (i, result) in rdr.records().enumerate() {
        let label = format!("row {}", i + 1);
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                loaded.reject(label, &e.to_string());
                continue;
            }
        };

        match record.deserialize::<Subject>(Some(&headers)) {
            Ok(subject) => loaded.subjects.push(subject),
            Err(e) => {
                let name = name_column
                    .and_then(|c| record.get(c))
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
                    .unwrap_or(label);
                loaded.reject(name, &e.to_string());
            }
        }
    }

    Ok(loaded)
}

/// Parses a JSON array of [`Subject`] objects.
pub fn parse_json(content: &str) -> Result<LoadedSubjects> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(content).context("subject file must be a JSON array")?;

    let mut loaded = LoadedSubjects::default();

    for (i, entry) in entries.into_iter().enumerate() {
        let name = entry
            .get("name")
            .and_then(|n| n.as_str())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("entry {}", i + 1));

        match serde_json::from_value::<Subject>(entry) {
            Ok(subject) => loaded.subjects.push(subject),
            Err(e) => loaded.reject(name, &e.to_string()),
        }
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_valid_rows() {
        let data = "name,unit,rank,same_rank,completer\nmath,4,1,1,100\nenglish, 3 ,10,2,100\n";
        let loaded = parse_csv(data.as_bytes()).unwrap();

        assert!(loaded.rejected.is_empty());
        assert_eq!(
            loaded.subjects,
            vec![
                Subject::new("math", 4, 1, 1, 100),
                Subject::new("english", 3, 10, 2, 100),
            ]
        );
    }

    #[test]
    fn test_parse_csv_rejects_bad_rows_and_continues() {
        let data = "name,unit,rank,same_rank,completer\n\
                    math,4,first,1,100\n\
                    ,4,1,1\n\
                    english,3,10,1,100\n";
        let loaded = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(loaded.subjects, vec![Subject::new("english", 3, 10, 1, 100)]);
        assert_eq!(loaded.rejected.len(), 2);
        assert_eq!(loaded.rejected[0].name, "math");
        assert_eq!(loaded.rejected[0].kind, SkipKind::Malformed);
        assert_eq!(loaded.rejected[1].name, "row 2");
    }

    #[test]
    fn test_parse_csv_keeps_out_of_range_values_for_validation() {
        let data = "name,unit,rank,same_rank,completer\nmath,4,-3,1,0\n";
        let loaded = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(loaded.subjects, vec![Subject::new("math", 4, -3, 1, 0)]);
    }

    #[test]
    fn test_parse_json_mixed_entries() {
        let data = r#"[
            {"name": "math", "unit": 4, "rank": 1, "sameRank": 1, "completer": 100},
            {"name": "art", "unit": 2, "rank": 1},
            {"unit": 2, "rank": 1, "same_rank": 1, "completer": 10},
            {"name": "english", "unit": 3, "rank": 10, "same_rank": 1, "completer": 100}
        ]"#;
        let loaded = parse_json(data).unwrap();

        assert_eq!(loaded.subjects.len(), 2);
        assert_eq!(loaded.subjects[1].name, "english");
        let names: Vec<_> = loaded.rejected.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["art", "entry 3"]);
    }

    #[test]
    fn test_parse_json_requires_array() {
        assert!(parse_json(r#"{"name": "math"}"#).is_err());
    }

    #[test]
    fn test_load_subjects_rejects_unknown_extension() {
        let err = load_subjects("subjects.txt").unwrap_err();
        assert!(err.to_string().contains("expected .csv or .json"));
    }
}
