use crate::tags::{ExifField, TagSource};
use url::form_urlencoded;

const MAPS_BASE_URL: &str = "https://www.google.com/maps?q=";

/// Positional fields derived from the GPS sub-directory.
///
/// Everything is `None` unless latitude and longitude both resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpsMetadata {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub altitude: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub maps_link: Option<String>,
}

impl GpsMetadata {
    pub fn resolve<S: TagSource + ?Sized>(tags: &S) -> Self {
        let Some((latitude, longitude)) = tags.coordinates() else {
            log::trace!("GPS coordinates not resolvable, skipping GPS fields");
            return Self::default();
        };

        let latitude = format!("{:.6}", latitude);
        let longitude = format!("{:.6}", longitude);
        let maps_link = maps_link(&latitude, &longitude);

        Self {
            altitude: altitude(tags),
            date: tags.text(ExifField::GpsDateStamp),
            time: timestamp(tags),
            maps_link: Some(maps_link),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }
}

pub fn maps_link(latitude: &str, longitude: &str) -> String {
    let latitude: String = form_urlencoded::byte_serialize(latitude.as_bytes()).collect();
    let longitude: String = form_urlencoded::byte_serialize(longitude.as_bytes()).collect();
    format!("{}{},{}", MAPS_BASE_URL, latitude, longitude)
}

fn altitude<S: TagSource + ?Sized>(tags: &S) -> Option<String> {
    let meters = tags.fraction(ExifField::GpsAltitude, 0)?.to_f64()?;
    let below_sea_level = tags.integer(ExifField::GpsAltitudeRef) == Some(1);
    let suffix = if below_sea_level { " (Below Sea Level)" } else { "" };
    Some(format!("{:.2}{}", meters, suffix))
}

// All three parts or nothing.
fn timestamp<S: TagSource + ?Sized>(tags: &S) -> Option<String> {
    let mut parts = [0i64; 3];
    for (index, part) in parts.iter_mut().enumerate() {
        let fraction = tags.fraction(ExifField::GpsTimeStamp, index)?;
        let value = fraction.to_f64()?;
        *part = fraction.exact_integer().unwrap_or(value.trunc() as i64);
    }
    let [hours, minutes, seconds] = parts;
    Some(format!("{:02}:{:02}:{:02}", hours, minutes, seconds))
}
