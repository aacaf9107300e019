use crate::config::AppConfig;
use crate::error::AppError;
use crate::extractor::{self, ExifMetadata, ExtractOptions, MetadataError};
use crate::hashing;
use crate::metadata::{FileAttributes, FileInfoData};
use crate::walker;
use chrono::{DateTime, Local, SecondsFormat};
use std::fs::{self, File, FileType, Metadata};
use std::io::{BufReader, Seek};
use std::path::Path;

#[derive(Debug)]
pub struct ProcessedFile {
    pub info: FileInfoData,
    pub warning: Option<MetadataError>,
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    pub attempted: usize,
    pub processed: usize,
    pub errored: usize,
    pub records: Vec<FileInfoData>,
}

/// Per-file failures are counted and logged; they never stop the scan.
pub fn start_processing(config: &AppConfig) -> ScanSummary {
    log::info!(
        "Processing directory: {} (recursive: {})",
        config.scan_directory,
        config.recursive
    );

    let options = ExtractOptions::with_exposure_decimal(config.exposure_decimal);
    let mut summary = ScanSummary::default();
    for path in walker::candidate_paths(config) {
        summary.attempted += 1;
        log::debug!("Processing file started for: {:?}", path);
        match process_file(&path, &options) {
            Ok(Some(processed)) => {
                if let Some(warning) = &processed.warning {
                    log::warn!("Could not decode metadata of {:?}: {}", path, warning);
                }
                log::trace!("Built record for {:?}: {:?}", path, processed.info);
                summary.records.push(processed.info);
                summary.processed += 1;
            }
            Ok(None) => log::debug!("Skipping directory {:?}", path),
            Err(e) => {
                log::warn!("Failed to process file {:?}: {}", path, e);
                summary.errored += 1;
            }
        }
    }

    log::info!("All files processed.");
    summary
}

/// Returns `Ok(None)` for a directory. Missing metadata is not an error; any
/// failure to stat, open, rewind or read the file is.
pub fn process_file(path: &Path, options: &ExtractOptions) -> Result<Option<ProcessedFile>, AppError> {
    let stat = fs::metadata(path).map_err(|source| AppError::Stat {
        path: path.to_path_buf(),
        source,
    })?;
    if stat.is_dir() {
        return Ok(None);
    }

    let file = File::open(path).map_err(|source| AppError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    log::trace!("Extracting EXIF data for: {:?}", path);
    let (metadata, warning) = match extractor::extract_metadata(&mut reader, options) {
        Ok(metadata) => (metadata, None),
        Err(e) if e.is_expected() => {
            log::trace!("No EXIF data found for {:?}: {}", path, e);
            (ExifMetadata::default(), None)
        }
        Err(e) => (ExifMetadata::default(), Some(e)),
    };

    reader.rewind().map_err(|source| AppError::Rewind {
        path: path.to_path_buf(),
        source,
    })?;

    log::trace!("Calculating hashes for: {:?}", path);
    let hashes = hashing::hash_reader(&mut reader).map_err(|source| AppError::Hash {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Calculated SHA-256 for {:?}: {}", path, hashes.sha256);

    let attributes = file_attributes(path, &stat)?;
    Ok(Some(ProcessedFile {
        info: FileInfoData::new(attributes, hashes, metadata),
        warning,
    }))
}

fn file_attributes(path: &Path, stat: &Metadata) -> Result<FileAttributes, AppError> {
    let stat_error = |source| AppError::Stat {
        path: path.to_path_buf(),
        source,
    };
    let modified = stat.modified().map_err(stat_error)?;
    let link = fs::symlink_metadata(path).map_err(stat_error)?;
    let absolute = std::path::absolute(path).map_err(stat_error)?;

    Ok(FileAttributes {
        file_name: path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default(),
        file_path: absolute.to_string_lossy().to_string(),
        file_size: stat.len(),
        last_modified: DateTime::<Local>::from(modified).to_rfc3339_opts(SecondsFormat::Secs, true),
        permissions: permission_string(stat, &link.file_type()),
    })
}

fn type_char(file_type: &FileType) -> char {
    if file_type.is_dir() {
        'd'
    } else if file_type.is_symlink() {
        'L'
    } else {
        '-'
    }
}

/// `ls`-style mode string, e.g. `-rw-r--r--`.
#[cfg(unix)]
fn permission_string(stat: &Metadata, file_type: &FileType) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = stat.permissions().mode();
    let mut out = String::with_capacity(10);
    out.push(type_char(file_type));
    for (shift, symbol) in (0..9).rev().zip("rwxrwxrwx".chars()) {
        out.push(if mode & (1 << shift) != 0 { symbol } else { '-' });
    }
    out
}

#[cfg(not(unix))]
fn permission_string(stat: &Metadata, file_type: &FileType) -> String {
    let bits = if stat.permissions().readonly() {
        "r--r--r--"
    } else {
        "rw-rw-rw-"
    };
    format!("{}{}", type_char(file_type), bits)
}
