use crate::config::ReportFormat;
use crate::error::AppError;
use crate::hashing::{self, FileHashes};
use crate::processor::ScanSummary;
use chrono::{Local, SecondsFormat};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const CSV_HEADER: [&str; 9] = [
    "OutputFile",
    "OutputFormat",
    "TotalAttempted",
    "TotalProcessed",
    "TotalWithErrors",
    "MD5",
    "SHA1",
    "SHA256",
    "GeneratedAt",
];

/// Summary of one scan run and the identity of the report it produced.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Manifest {
    pub output_file: String,
    pub output_format: String,
    pub total_attempted: usize,
    pub total_processed: usize,
    pub total_with_errors: usize,
    pub output_file_hashes: FileHashes,
    pub generated_at: String,
}

impl Manifest {
    /// Hashes the report at `report_path`; a report that cannot be hashed leaves the hashes empty.
    pub fn build(report_path: &Path, format: ReportFormat, summary: &ScanSummary) -> Self {
        let output_file_hashes = hashing::hash_file(report_path).unwrap_or_else(|e| {
            log::warn!(
                "Could not calculate hashes of output file {}: {}",
                report_path.display(),
                e
            );
            FileHashes::default()
        });

        Self {
            output_file: report_path.to_string_lossy().to_string(),
            output_format: format.as_str().to_string(),
            total_attempted: summary.attempted,
            total_processed: summary.processed,
            total_with_errors: summary.errored,
            output_file_hashes,
            generated_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn write(&self, path: &Path, format: ReportFormat) -> Result<(), AppError> {
        let file = File::create(path)?;
        match format {
            ReportFormat::Csv => self.write_csv(file)?,
            ReportFormat::Json => self.write_json(file)?,
        }
        log::info!("Manifest written to: {}", path.display());
        Ok(())
    }

    fn write_csv<W: Write>(&self, writer: W) -> Result<(), AppError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CSV_HEADER)?;
        csv_writer.write_record([
            self.output_file.clone(),
            self.output_format.clone(),
            self.total_attempted.to_string(),
            self.total_processed.to_string(),
            self.total_with_errors.to_string(),
            self.output_file_hashes.md5.clone(),
            self.output_file_hashes.sha1.clone(),
            self.output_file_hashes.sha256.clone(),
            self.generated_at.clone(),
        ])?;
        csv_writer.flush()?;
        Ok(())
    }

    fn write_json<W: Write>(&self, writer: W) -> Result<(), AppError> {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn summary() -> ScanSummary {
        ScanSummary {
            attempted: 5,
            processed: 4,
            errored: 1,
            records: Vec::new(),
        }
    }

    #[test]
    fn test_build_hashes_the_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("report.csv");
        fs::write(&report, b"abc").unwrap();

        let manifest = Manifest::build(&report, ReportFormat::Csv, &summary());
        assert_eq!(manifest.total_attempted, 5);
        assert_eq!(manifest.total_processed, 4);
        assert_eq!(manifest.total_with_errors, 1);
        assert_eq!(manifest.output_format, "csv");
        assert_eq!(manifest.output_file_hashes.md5, "900150983cd24fb0d6963f7d28e17f72");
        assert!(!manifest.generated_at.is_empty());
    }

    #[test]
    fn test_missing_report_leaves_hashes_empty() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::build(&dir.path().join("missing.json"), ReportFormat::Json, &summary());
        assert_eq!(manifest.output_file_hashes, FileHashes::default());
    }

    #[test]
    fn test_json_manifest_keys() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("report.json");
        fs::write(&report, b"[]").unwrap();
        let manifest = Manifest::build(&report, ReportFormat::Json, &summary());

        let target = dir.path().join("report-manifest.json");
        manifest.write(&target, ReportFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&fs::read(&target).unwrap()).unwrap();
        assert_eq!(value["total_attempted"], 5);
        assert_eq!(value["total_with_errors"], 1);
        assert_eq!(value["output_format"], "json");
        assert_eq!(value["output_file_hashes"]["sha1"], manifest.output_file_hashes.sha1.as_str());
    }

    #[test]
    fn test_csv_manifest_rows() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("report.csv");
        fs::write(&report, b"abc").unwrap();
        let manifest = Manifest::build(&report, ReportFormat::Csv, &summary());

        let mut out = Vec::new();
        manifest.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert!(lines[1].contains(",csv,5,4,1,900150983cd24fb0d6963f7d28e17f72,"));
    }
}
