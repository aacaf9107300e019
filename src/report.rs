use crate::config::ReportFormat;
use crate::error::AppError;
use crate::metadata::{FileInfoData, COLUMNS};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_report(path: &Path, format: ReportFormat, records: &[FileInfoData]) -> Result<(), AppError> {
    let file = File::create(path)?;
    match format {
        ReportFormat::Csv => write_csv(file, records)?,
        ReportFormat::Json => write_json(file, records)?,
    }
    log::info!("{} report written to: {}", format.as_str().to_uppercase(), path.display());
    Ok(())
}

/// Header row first, always, then one row per record.
pub fn write_csv<W: Write>(writer: W, records: &[FileInfoData]) -> Result<(), AppError> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(COLUMNS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(writer: W, records: &[FileInfoData]) -> Result<(), AppError> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
