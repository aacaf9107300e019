// src/metadata.rs

use crate::extractor::ExifMetadata;
use crate::hashing::FileHashes;
use serde::Serialize;

/// Report columns, in output order.
pub const COLUMNS: [&str; 24] = [
    "FileName",
    "FilePath",
    "FileSize",
    "LastModified",
    "Permissions",
    "MD5",
    "SHA1",
    "SHA256",
    "Make",
    "Model",
    "DateTime",
    "ImageWidth",
    "ImageHeight",
    "ISO",
    "Aperture",
    "ExposureTime",
    "FocalLength",
    "Orientation",
    "GPSLatitude",
    "GPSLongitude",
    "GPSAltitude",
    "GPSDate",
    "GPSTime",
    "GoogleMapsLink",
];

/// Filesystem attributes gathered before the file is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttributes {
    pub file_name: String,
    pub file_path: String,
    pub file_size: u64,
    pub last_modified: String,
    pub permissions: String,
}

/// One row of the report. Absent metadata is an empty string, never a missing key.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FileInfoData {
    #[serde(rename = "FileName")]
    pub file_name: String,
    #[serde(rename = "FilePath")]
    pub file_path: String,
    #[serde(rename = "FileSize")]
    pub file_size: u64,
    #[serde(rename = "LastModified")]
    pub last_modified: String,
    #[serde(rename = "Permissions")]
    pub permissions: String,
    #[serde(rename = "MD5")]
    pub md5: String,
    #[serde(rename = "SHA1")]
    pub sha1: String,
    #[serde(rename = "SHA256")]
    pub sha256: String,
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "DateTime")]
    pub date_time: String,
    #[serde(rename = "ImageWidth")]
    pub image_width: String,
    #[serde(rename = "ImageHeight")]
    pub image_height: String,
    #[serde(rename = "ISO")]
    pub iso: String,
    #[serde(rename = "Aperture")]
    pub aperture: String,
    #[serde(rename = "ExposureTime")]
    pub exposure_time: String,
    #[serde(rename = "FocalLength")]
    pub focal_length: String,
    #[serde(rename = "Orientation")]
    pub orientation: String,
    #[serde(rename = "GPSLatitude")]
    pub gps_latitude: String,
    #[serde(rename = "GPSLongitude")]
    pub gps_longitude: String,
    #[serde(rename = "GPSAltitude")]
    pub gps_altitude: String,
    #[serde(rename = "GPSDate")]
    pub gps_date: String,
    #[serde(rename = "GPSTime")]
    pub gps_time: String,
    #[serde(rename = "GoogleMapsLink")]
    pub google_maps_link: String,
}

impl FileInfoData {
    pub fn new(attributes: FileAttributes, hashes: FileHashes, metadata: ExifMetadata) -> Self {
        let ExifMetadata { camera, gps } = metadata;
        Self {
            file_name: attributes.file_name,
            file_path: attributes.file_path,
            file_size: attributes.file_size,
            last_modified: attributes.last_modified,
            permissions: attributes.permissions,
            md5: hashes.md5,
            sha1: hashes.sha1,
            sha256: hashes.sha256,
            make: camera.make.unwrap_or_default(),
            model: camera.model.unwrap_or_default(),
            date_time: camera.date_time.unwrap_or_default(),
            image_width: camera.image_width.unwrap_or_default(),
            image_height: camera.image_height.unwrap_or_default(),
            iso: camera.iso.unwrap_or_default(),
            aperture: camera.aperture.unwrap_or_default(),
            exposure_time: camera.exposure_time.unwrap_or_default(),
            focal_length: camera.focal_length.unwrap_or_default(),
            orientation: camera.orientation.unwrap_or_default(),
            gps_latitude: gps.latitude.unwrap_or_default(),
            gps_longitude: gps.longitude.unwrap_or_default(),
            gps_altitude: gps.altitude.unwrap_or_default(),
            gps_date: gps.date.unwrap_or_default(),
            gps_time: gps.time.unwrap_or_default(),
            google_maps_link: gps.maps_link.unwrap_or_default(),
        }
    }
}
