use crate::rational::Fraction;
use exif::{Exif, In, Tag, Value};

/// The closed set of tags the scanner reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExifField {
    Make,
    Model,
    DateTimeOriginal,
    DateTime,
    PixelWidth,
    PixelHeight,
    Iso,
    Orientation,
    FNumber,
    ExposureTime,
    FocalLength,
    GpsLatitude,
    GpsLatitudeRef,
    GpsLongitude,
    GpsLongitudeRef,
    GpsAltitude,
    GpsAltitudeRef,
    GpsDateStamp,
    GpsTimeStamp,
}

impl ExifField {
    pub fn tag(self) -> Tag {
        match self {
            ExifField::Make => Tag::Make,
            ExifField::Model => Tag::Model,
            ExifField::DateTimeOriginal => Tag::DateTimeOriginal,
            ExifField::DateTime => Tag::DateTime,
            ExifField::PixelWidth => Tag::PixelXDimension,
            ExifField::PixelHeight => Tag::PixelYDimension,
            ExifField::Iso => Tag::PhotographicSensitivity,
            ExifField::Orientation => Tag::Orientation,
            ExifField::FNumber => Tag::FNumber,
            ExifField::ExposureTime => Tag::ExposureTime,
            ExifField::FocalLength => Tag::FocalLength,
            ExifField::GpsLatitude => Tag::GPSLatitude,
            ExifField::GpsLatitudeRef => Tag::GPSLatitudeRef,
            ExifField::GpsLongitude => Tag::GPSLongitude,
            ExifField::GpsLongitudeRef => Tag::GPSLongitudeRef,
            ExifField::GpsAltitude => Tag::GPSAltitude,
            ExifField::GpsAltitudeRef => Tag::GPSAltitudeRef,
            ExifField::GpsDateStamp => Tag::GPSDateStamp,
            ExifField::GpsTimeStamp => Tag::GPSTimeStamp,
        }
    }
}

/// Typed, optional access to the fields of a decoded metadata block.
pub trait TagSource {
    fn text(&self, field: ExifField) -> Option<String>;

    /// Integer decoding of the first component, without any fraction fallback.
    fn direct_integer(&self, field: ExifField) -> Option<i64>;

    fn fraction(&self, field: ExifField, index: usize) -> Option<Fraction>;

    /// Accepts a fraction only when its denominator is exactly 1.
    fn integer(&self, field: ExifField) -> Option<i64> {
        self.direct_integer(field).or_else(|| {
            self.fraction(field, 0)
                .filter(|fraction| fraction.denominator == 1)
                .map(|fraction| fraction.numerator)
        })
    }

    fn coordinates(&self) -> Option<(f64, f64)> {
        let latitude = degrees(self, ExifField::GpsLatitude)?;
        let longitude = degrees(self, ExifField::GpsLongitude)?;
        let latitude_ref = self.text(ExifField::GpsLatitudeRef)?;
        let longitude_ref = self.text(ExifField::GpsLongitudeRef)?;

        let latitude = if latitude_ref == "S" { -latitude } else { latitude };
        let longitude = if longitude_ref == "W" { -longitude } else { longitude };
        Some((latitude, longitude))
    }
}

fn degrees<S: TagSource + ?Sized>(source: &S, field: ExifField) -> Option<f64> {
    let degrees = source.fraction(field, 0)?.to_f64()?;
    let minutes = source.fraction(field, 1)?.to_f64()?;
    let seconds = source.fraction(field, 2)?.to_f64()?;
    Some(degrees + minutes / 60.0 + seconds / 3600.0)
}

fn clean_text(raw: &str) -> String {
    raw.trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .trim_matches('"')
        .to_string()
}

impl TagSource for Exif {
    fn text(&self, field: ExifField) -> Option<String> {
        let entry = self.get_field(field.tag(), In::PRIMARY)?;
        match &entry.value {
            Value::Ascii(parts) => {
                let first = parts.first()?;
                Some(clean_text(&String::from_utf8_lossy(first)))
            }
            _ => Some(clean_text(&entry.display_value().to_string())),
        }
    }

    fn direct_integer(&self, field: ExifField) -> Option<i64> {
        let entry = self.get_field(field.tag(), In::PRIMARY)?;
        match &entry.value {
            Value::Byte(_) | Value::Short(_) | Value::Long(_) => {
                entry.value.get_uint(0).map(i64::from)
            }
            Value::SByte(values) => values.first().map(|v| i64::from(*v)),
            Value::SShort(values) => values.first().map(|v| i64::from(*v)),
            Value::SLong(values) => values.first().map(|v| i64::from(*v)),
            _ => None,
        }
    }

    fn fraction(&self, field: ExifField, index: usize) -> Option<Fraction> {
        let entry = self.get_field(field.tag(), In::PRIMARY)?;
        match &entry.value {
            Value::Rational(values) => values.get(index).map(Fraction::from),
            Value::SRational(values) => values.get(index).map(Fraction::from),
            _ => None,
        }
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Clone)]
    pub enum TagValue {
        Text(String),
        Integer(i64),
        Fractions(Vec<Fraction>),
    }

    /// In-memory tag table for exercising extraction without an image.
    #[derive(Debug, Default, Clone)]
    pub struct TagTable {
        values: HashMap<ExifField, TagValue>,
    }

    impl TagTable {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_text(mut self, field: ExifField, value: &str) -> Self {
            self.values.insert(field, TagValue::Text(value.to_string()));
            self
        }

        pub fn with_integer(mut self, field: ExifField, value: i64) -> Self {
            self.values.insert(field, TagValue::Integer(value));
            self
        }

        pub fn with_fractions(mut self, field: ExifField, values: &[(i64, i64)]) -> Self {
            let fractions = values.iter().map(|(n, d)| Fraction::new(*n, *d)).collect();
            self.values.insert(field, TagValue::Fractions(fractions));
            self
        }

        pub fn with_coordinates(self) -> Self {
            self.with_fractions(ExifField::GpsLatitude, &[(52, 1), (22, 1), (4512, 100)])
                .with_text(ExifField::GpsLatitudeRef, "N")
                .with_fractions(ExifField::GpsLongitude, &[(4, 1), (53, 1), (5556, 100)])
                .with_text(ExifField::GpsLongitudeRef, "E")
        }
    }

    impl TagSource for TagTable {
        fn text(&self, field: ExifField) -> Option<String> {
            match self.values.get(&field)? {
                TagValue::Text(value) => Some(value.clone()),
                _ => None,
            }
        }

        fn direct_integer(&self, field: ExifField) -> Option<i64> {
            match self.values.get(&field)? {
                TagValue::Integer(value) => Some(*value),
                _ => None,
            }
        }

        fn fraction(&self, field: ExifField, index: usize) -> Option<Fraction> {
            match self.values.get(&field)? {
                TagValue::Fractions(values) => values.get(index).copied(),
                _ => None,
            }
        }
    }
}
