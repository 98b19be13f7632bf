use std::fs::{self, OpenOptions};
use std::path::Path;
use log::info;
use crate::error::Result;
use crate::extractor::JobRecord;

/// Written in place of any field that could not be found.
pub const NOT_AVAILABLE: &str = "N/A";

pub const CSV_HEADERS: [&str; 6] = ["title", "company", "location", "salary", "summary", "url"];

impl JobRecord {
    /// CSV row in `CSV_HEADERS` order.
    pub fn to_row(&self) -> [&str; 6] {
        [
            self.title.as_str(),
            or_na(&self.company),
            or_na(&self.location),
            or_na(&self.salary),
            or_na(&self.summary),
            or_na(&self.url),
        ]
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

/// Append `records` to the CSV at `path`. The header goes in only when this
/// call creates the file. Returns the number of rows written.
pub fn save_records<P: AsRef<Path>>(records: &[JobRecord], path: P) -> Result<usize> {
    let path = path.as_ref();
    if records.is_empty() {
        info!("No jobs to save");
        return Ok(0);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_exists = path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if !file_exists {
        csv_writer.write_record(CSV_HEADERS)?;
    }
    for record in records {
        csv_writer.write_record(record.to_row())?;
    }
    csv_writer.flush()?;

    info!("Saved {} jobs to {}", records.len(), path.display());
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            company: Some("Acme, Inc.".to_string()),
            location: None,
            salary: None,
            summary: Some("Says \"hello\"\nthen leaves".to_string()),
            url: Some("https://ca.indeed.com/viewjob?jk=1".to_string()),
        }
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        rdr.records()
            .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("job.csv");

        assert_eq!(save_records(&[record("A"), record("B")], &path).unwrap(), 2);
        assert_eq!(save_records(&[record("C")], &path).unwrap(), 1);

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], CSV_HEADERS.to_vec());
        let titles: Vec<&str> = rows[1..].iter().map(|r| r[0].as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn absent_fields_become_sentinel_and_text_is_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.csv");
        save_records(&[record("Rust Dev")], &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("title,company,location,salary,summary,url"));
        assert!(raw.contains("\"Acme, Inc.\""));
        assert!(raw.contains("\"Says \"\"hello\"\"\nthen leaves\""));

        let rows = read_rows(&path);
        assert_eq!(
            rows[1],
            vec![
                "Rust Dev",
                "Acme, Inc.",
                "N/A",
                "N/A",
                "Says \"hello\"\nthen leaves",
                "https://ca.indeed.com/viewjob?jk=1",
            ]
        );
    }

    #[test]
    fn empty_batch_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.csv");
        assert_eq!(save_records(&[], &path).unwrap(), 0);
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_target_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        fs::write(&blocker, "not a directory").unwrap();
        assert!(save_records(&[record("A")], blocker.join("job.csv")).is_err());
    }
}
