use crate::gps::GpsMetadata;
use crate::rational::{format_fraction, Rendering};
use crate::tags::{ExifField, TagSource};
use exif::Reader;
use std::fmt;
use std::io::{BufRead, ErrorKind, Seek};
use thiserror::Error;

/// Decode failures that only mean "this file carries no usable metadata".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    MissingMarker,
    UnsupportedFormat,
    Truncated,
    InvalidPointer,
    EndOfStream,
}

impl fmt::Display for Absence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Absence::MissingMarker => "metadata marker missing",
            Absence::UnsupportedFormat => "unsupported data format",
            Absence::Truncated => "truncated tag value",
            Absence::InvalidPointer => "invalid directory pointer",
            Absence::EndOfStream => "end of stream",
        };
        f.write_str(reason)
    }
}

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("no EXIF data ({0})")]
    Absent(Absence),

    #[error("could not decode EXIF data: {0}")]
    Anomaly(#[source] exif::Error),
}

impl MetadataError {
    pub fn is_expected(&self) -> bool {
        matches!(self, MetadataError::Absent(_))
    }
}

impl From<exif::Error> for MetadataError {
    fn from(err: exif::Error) -> Self {
        match classify(&err) {
            Some(absence) => MetadataError::Absent(absence),
            None => MetadataError::Anomaly(err),
        }
    }
}

fn classify(err: &exif::Error) -> Option<Absence> {
    match err {
        exif::Error::NotFound(_) => Some(Absence::MissingMarker),
        exif::Error::NotSupported(_) => Some(Absence::UnsupportedFormat),
        exif::Error::Io(io) if io.kind() == ErrorKind::UnexpectedEof => Some(Absence::EndOfStream),
        // The library only reports a static message for malformed containers.
        exif::Error::InvalidFormat(message) => classify_message(message),
        _ => None,
    }
}

fn classify_message(message: &str) -> Option<Absence> {
    let lowered = message.to_ascii_lowercase();
    if lowered == "unknown image format" {
        Some(Absence::UnsupportedFormat)
    } else if lowered.starts_with("truncated") {
        Some(Absence::Truncated)
    } else if lowered.contains("pointer") || lowered.contains("offset") {
        Some(Absence::InvalidPointer)
    } else {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraMetadata {
    pub make: Option<String>,
    pub model: Option<String>,
    pub date_time: Option<String>,
    pub image_width: Option<String>,
    pub image_height: Option<String>,
    pub iso: Option<String>,
    pub aperture: Option<String>,
    pub exposure_time: Option<String>,
    pub focal_length: Option<String>,
    pub orientation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub exposure: Rendering,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            exposure: Rendering::Fraction,
        }
    }
}

impl ExtractOptions {
    pub fn with_exposure_decimal(exposure_decimal: bool) -> Self {
        let exposure = if exposure_decimal {
            Rendering::ExposureDecimal
        } else {
            Rendering::Fraction
        };
        Self { exposure }
    }
}

impl CameraMetadata {
    pub fn resolve<S: TagSource + ?Sized>(tags: &S, options: &ExtractOptions) -> Self {
        Self {
            make: tags.text(ExifField::Make),
            model: tags.text(ExifField::Model),
            date_time: tags
                .text(ExifField::DateTimeOriginal)
                .or_else(|| tags.text(ExifField::DateTime)),
            image_width: integer_text(tags, ExifField::PixelWidth),
            image_height: integer_text(tags, ExifField::PixelHeight),
            iso: integer_text(tags, ExifField::Iso),
            aperture: rational_text(tags, ExifField::FNumber, Rendering::Decimal, "f/"),
            exposure_time: rational_text(tags, ExifField::ExposureTime, options.exposure, ""),
            focal_length: rational_text(tags, ExifField::FocalLength, Rendering::Decimal, ""),
            orientation: tags.integer(ExifField::Orientation).map(orientation_label),
        }
    }
}

fn integer_text<S: TagSource + ?Sized>(tags: &S, field: ExifField) -> Option<String> {
    tags.integer(field).map(|value| value.to_string())
}

fn rational_text<S: TagSource + ?Sized>(
    tags: &S,
    field: ExifField,
    rendering: Rendering,
    prefix: &str,
) -> Option<String> {
    tags.fraction(field, 0)
        .map(|fraction| format_fraction(fraction, rendering, prefix))
}

pub fn orientation_label(code: i64) -> String {
    match code {
        1 => "Normal".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExifMetadata {
    pub camera: CameraMetadata,
    pub gps: GpsMetadata,
}

impl ExifMetadata {
    pub fn resolve<S: TagSource + ?Sized>(tags: &S, options: &ExtractOptions) -> Self {
        Self {
            camera: CameraMetadata::resolve(tags, options),
            gps: GpsMetadata::resolve(tags),
        }
    }
}

/// Decodes the embedded metadata block from the start of `reader`.
///
/// The reader is left wherever decoding stopped; callers rewind before reusing it.
pub fn extract_metadata<R: BufRead + Seek>(
    reader: &mut R,
    options: &ExtractOptions,
) -> Result<ExifMetadata, MetadataError> {
    let exif = Reader::new().read_from_container(reader)?;
    log::trace!("Decoded {} EXIF fields", exif.fields().count());
    Ok(ExifMetadata::resolve(&exif, options))
}
