//! Classification egress - writes per-snapshot reports to file
//!
//! Reports are written in JSONL format (one JSON object per line) to the
//! file specified in config. The directory is rendered as presentation
//! entries - resident fields plus icon and fire-unit membership - derived
//! at write time, never mutated into the records themselves.

use crate::domain::{Alert, UnitId};
use crate::services::Classified;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info};

/// One directory line as presented to responders
#[derive(Debug, Serialize)]
pub struct DirectoryEntry<'a> {
    pub name: &'a str,
    pub dob: &'a str,
    pub unit: UnitId,
    pub medical_conditions: &'a str,
    pub icon: &'static str,
    pub in_fire_unit: bool,
}

/// Full classification report for one snapshot
#[derive(Debug, Serialize)]
pub struct ClassificationReport<'a> {
    pub site: &'a str,
    pub fetched_at: DateTime<Utc>,
    pub alerts: &'a [Alert],
    pub directory: Vec<DirectoryEntry<'a>>,
    pub fire_units: Vec<i64>,
}

impl<'a> ClassificationReport<'a> {
    /// Build the presentation view for one classified snapshot.
    pub fn new(
        site: &'a str,
        fetched_at: DateTime<Utc>,
        classified: &'a Classified,
        fire_units: &HashSet<i64>,
    ) -> Self {
        // Sorted so identical snapshots produce identical lines
        let mut units: Vec<i64> = fire_units.iter().copied().collect();
        units.sort_unstable();

        let directory = classified
            .directory
            .iter()
            .map(|resident| DirectoryEntry {
                name: &resident.name,
                dob: &resident.dob,
                unit: resident.unit,
                medical_conditions: &resident.medical_conditions,
                icon: resident.icon(),
                in_fire_unit: resident.unit.number().is_some_and(|n| fire_units.contains(&n)),
            })
            .collect();

        Self { site, fetched_at, alerts: &classified.alerts, directory, fire_units: units }
    }
}

/// Egress writer for classification reports
pub struct Egress {
    file_path: String,
}

impl Egress {
    pub fn new(file_path: &str) -> Self {
        info!(file_path = %file_path, "egress_initialized");
        Self { file_path: file_path.to_string() }
    }

    /// Write a report to the egress file
    /// Returns true if successful, false otherwise
    pub fn write_report(&self, report: &ClassificationReport) -> bool {
        let json = match serde_json::to_string(report) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "report_serialize_failed");
                return false;
            }
        };

        match self.append_line(&json) {
            Ok(()) => {
                info!(
                    site = %report.site,
                    alerts = %report.alerts.len(),
                    directory = %report.directory.len(),
                    fire_units = ?report.fire_units,
                    "report_egressed"
                );
                true
            }
            Err(e) => {
                error!(site = %report.site, error = %e, "report_egress_failed");
                false
            }
        }
    }

    /// Append a line to the egress file
    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let path = Path::new(&self.file_path);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        writeln!(file, "{}", line)?;
        debug!(file = %self.file_path, bytes = %line.len(), "egress_written");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{aggregate, fire_units};
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn classified() -> Classified {
        let snapshot = json!({
            "d1": {"Unit": 5, "Is On": true, "Fire Detected": true, "Is Exit": false},
            "p1": {"Name": "Jane", "DOB": "1990-01-01", "Unit": 5, "Medical Conditions": "Mobility"},
            "p2": {"Name": "Ann", "DOB": "1950-02-02", "Unit": 2, "Medical Conditions": ""}
        });
        aggregate(snapshot.as_object().unwrap())
    }

    #[test]
    fn test_egress_new() {
        let egress = Egress::new("test.jsonl");
        assert_eq!(egress.file_path, "test.jsonl");
    }

    #[test]
    fn test_report_marks_residents_in_fire_units() {
        let out = classified();
        let units = fire_units(&out.alerts);
        let report = ClassificationReport::new("site-a", Utc::now(), &out, &units);

        assert_eq!(report.fire_units, vec![5]);
        assert_eq!(report.directory.len(), 2);
        assert!(report.directory[0].in_fire_unit);
        assert_eq!(report.directory[0].icon, "personmobility.png");
        assert!(!report.directory[1].in_fire_unit);
        assert_eq!(report.directory[1].icon, "person.png");
    }

    #[test]
    fn test_write_report() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("classifications.jsonl");
        let file_str = file_path.to_str().unwrap();

        let egress = Egress::new(file_str);
        let out = classified();
        let units = fire_units(&out.alerts);
        let report = ClassificationReport::new("site-a", Utc::now(), &out, &units);

        assert!(egress.write_report(&report));

        // Verify file was created and contains valid JSON
        let content = fs::read_to_string(&file_path).unwrap();
        assert!(content.ends_with('\n'));

        let parsed: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(parsed["site"], "site-a");
        assert_eq!(parsed["alerts"][0]["type"], "fire");
        assert_eq!(parsed["alerts"][0]["message"], "Unit 5, d1: Fire Detected");
        assert_eq!(parsed["fire_units"], json!([5]));
        assert_eq!(parsed["directory"][0]["in_fire_unit"], true);
    }

    #[test]
    fn test_write_appends_one_line_per_report() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("classifications.jsonl");
        let file_str = file_path.to_str().unwrap();

        let egress = Egress::new(file_str);
        let out = classified();
        let units = fire_units(&out.alerts);

        egress.write_report(&ClassificationReport::new("site-a", Utc::now(), &out, &units));
        egress.write_report(&ClassificationReport::new("site-a", Utc::now(), &out, &units));

        let content = fs::read_to_string(&file_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        for line in lines {
            let _parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        }
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let nested_path = dir.path().join("nested").join("dir").join("classifications.jsonl");
        let file_str = nested_path.to_str().unwrap();

        let egress = Egress::new(file_str);
        let out = classified();
        let units = fire_units(&out.alerts);
        let report = ClassificationReport::new("site-a", Utc::now(), &out, &units);

        assert!(egress.write_report(&report));
        assert!(nested_path.exists());
    }
}
