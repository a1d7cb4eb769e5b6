//! Photo directory audit.
//!
//! Walks the photos directory and reads the EXIF snapshot of every file with
//! a configured photo extension, so a missing exposure/ISO/aperture tag is
//! found before a page build trips over it.

use crate::config::PhotosConfig;
use crate::exif::{ExifError, ExifSnapshot, MetadataReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("photos directory not found: {0}")]
    MissingDir(PathBuf),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One inspected photo.
#[derive(Debug)]
pub struct CheckEntry {
    /// Path relative to the photos directory, `/`-separated. This is the
    /// name a page passes to `display_photo`.
    pub photo: String,
    pub result: Result<ExifSnapshot, ExifError>,
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub entries: Vec<CheckEntry>,
}

impl CheckReport {
    pub fn failures(&self) -> impl Iterator<Item = &CheckEntry> {
        self.entries.iter().filter(|e| e.result.is_err())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_ok(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Inspect every photo under `<root>/<photos.dir>` in file-name order.
pub fn check_photos(
    root: &Path,
    photos: &PhotosConfig,
    reader: &impl MetadataReader,
) -> Result<CheckReport, CheckError> {
    let dir = root.join(&photos.dir);
    if !dir.is_dir() {
        return Err(CheckError::MissingDir(dir));
    }

    let mut report = CheckReport::default();
    for entry in WalkDir::new(&dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_photo = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| photos.matches_extension(e));
        if !is_photo {
            log::debug!("Skipping {}", path.display());
            continue;
        }

        report.entries.push(CheckEntry {
            photo: photo_name(&dir, path),
            result: reader.read_snapshot(path),
        });
    }
    Ok(report)
}

fn photo_name(dir: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(dir).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
