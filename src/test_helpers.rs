//! Shared test utilities for the meatspace test suite.
//!
//! Provides a writer for small synthetic EXIF JPEGs, a site-root fixture
//! laid out the way the page builder expects, and a recording mock
//! [`MetadataReader`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let site = setup_site(&[("alley.jpg", ExifFixture::alley())]);
//! let path = site.path().join("assets/photos/alley.jpg");
//! let snap = crate::exif::read_snapshot(&path).unwrap();
//! assert_eq!(snap.iso_speed, 200);
//! ```

use img_parts::jpeg::{Jpeg, markers};
use img_parts::{Bytes, ImageEXIF};
use little_exif::exif_tag::ExifTag;
use little_exif::filetype::FileExtension;
use little_exif::metadata::Metadata;
use little_exif::rational::uR64;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use crate::exif::{ExifError, ExifSnapshot, MetadataReader, Rational};

// =========================================================================
// Synthetic JPEG writer
// =========================================================================

/// APP1 marker, length and `Exif\0\0` header that `as_u8_vec` puts in
/// front of the TIFF block. `Jpeg::set_exif` adds its own.
const APP1_EXIF_PREFIX_LEN: usize = 10;

/// EXIF fields to embed in a synthetic JPEG. `None` leaves the tag out.
#[derive(Debug, Clone)]
pub struct ExifFixture {
    pub exposure_time: Option<(u32, u32)>,
    pub f_number: Option<(u32, u32)>,
    /// Every value is written, so `vec![200, 200]` gives an ISO entry with
    /// a count of 2.
    pub iso_speed: Option<Vec<u16>>,
    /// `DateTimeOriginal` in the Exif sub-IFD.
    pub date_time: Option<&'static str>,
    /// `DateTime` in IFD0.
    pub modify_date: Option<&'static str>,
}

impl ExifFixture {
    /// 1/250s at f2.8, ISO 200.
    pub fn alley() -> Self {
        Self {
            exposure_time: Some((1, 250)),
            f_number: Some((28, 10)),
            iso_speed: Some(vec![200]),
            date_time: Some("2012:06:01 18:30:00"),
            modify_date: Some("2012:06:01 18:30:00"),
        }
    }

    fn metadata(&self) -> Metadata {
        let rational = |(nominator, denominator): (u32, u32)| vec![uR64 { nominator, denominator }];

        let mut metadata = Metadata::new();
        if let Some(exposure) = self.exposure_time {
            metadata.set_tag(ExifTag::ExposureTime(rational(exposure)));
        }
        if let Some(f_number) = self.f_number {
            metadata.set_tag(ExifTag::FNumber(rational(f_number)));
        }
        if let Some(iso) = &self.iso_speed {
            metadata.set_tag(ExifTag::ISO(iso.clone()));
        }
        if let Some(date) = self.date_time {
            metadata.set_tag(ExifTag::DateTimeOriginal(date.to_string()));
        }
        if let Some(date) = self.modify_date {
            metadata.set_tag(ExifTag::ModifyDate(date.to_string()));
        }
        metadata
    }
}

fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, marker];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// SOI, JFIF APP0, two comments, EOI. No image data; only the segment
/// structure is valid.
fn skeleton_jpeg() -> Jpeg {
    let jfif = [b'J', b'F', b'I', b'F', 0, 1, 1, 0, 0, 1, 0, 1, 0, 0];
    let mut bytes = vec![0xFF, markers::SOI];
    bytes.extend_from_slice(&segment(markers::APP0, &jfif));
    bytes.extend_from_slice(&segment(markers::COM, b"meatspace test fixture"));
    bytes.extend_from_slice(&segment(markers::COM, &[b'.'; 64]));
    bytes.extend_from_slice(&[0xFF, markers::EOI]);
    Jpeg::from_bytes(Bytes::from(bytes)).unwrap()
}

/// Write a minimal JPEG whose APP1 segment carries the fixture's EXIF.
pub fn write_jpeg(path: &Path, fixture: &ExifFixture) {
    let app1 = fixture.metadata().as_u8_vec(FileExtension::JPEG);
    let tiff = app1[APP1_EXIF_PREFIX_LEN..].to_vec();

    let mut jpeg = skeleton_jpeg();
    jpeg.set_exif(Some(Bytes::from(tiff)));
    std::fs::write(path, jpeg.encoder().bytes()).unwrap();
}

/// Write a minimal JFIF JPEG with no EXIF segment at all.
pub fn write_jpeg_without_exif(path: &Path) {
    std::fs::write(path, skeleton_jpeg().encoder().bytes()).unwrap();
}

// =========================================================================
// Site fixture
// =========================================================================

/// Create a temp site root with `assets/photos/` populated with the given
/// synthetic photos. Names may contain `/` for nested directories.
pub fn setup_site(photos: &[(&str, ExifFixture)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let photos_dir = tmp.path().join("assets/photos");
    std::fs::create_dir_all(&photos_dir).unwrap();
    for (name, fixture) in photos {
        let path = photos_dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        write_jpeg(&path, fixture);
    }
    tmp
}

// =========================================================================
// Mock reader
// =========================================================================

/// Snapshot for the canonical alley photo: 1/250s, f2.8, ISO 200.
pub fn alley_snapshot() -> ExifSnapshot {
    ExifSnapshot {
        exposure_time: Rational::new(1, 250).unwrap(),
        iso_speed: 200,
        date_time: Some("2012:06:01 18:30:00".to_string()),
        f_number: 2.8,
    }
}

/// Mock reader keyed by file name. Records every path it is asked for.
/// Unknown names fail the way a missing file would.
#[derive(Default)]
pub struct MockReader {
    pub snapshots: HashMap<String, ExifSnapshot>,
    pub reads: Mutex<Vec<PathBuf>>,
}

impl MockReader {
    pub fn with(entries: &[(&str, ExifSnapshot)]) -> Self {
        Self {
            snapshots: entries
                .iter()
                .map(|(name, snap)| (name.to_string(), snap.clone()))
                .collect(),
            reads: Mutex::new(Vec::new()),
        }
    }

    pub fn get_reads(&self) -> Vec<PathBuf> {
        self.reads.lock().unwrap().clone()
    }
}

impl MetadataReader for MockReader {
    fn read_snapshot(&self, path: &Path) -> Result<ExifSnapshot, ExifError> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.snapshots.get(&name).cloned().ok_or_else(|| {
            ExifError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no mock snapshot for {name}"),
            ))
        })
    }
}
