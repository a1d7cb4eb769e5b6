//! Template helpers: the site logo and captioned photos.
//!
//! Both helpers return raw HTML fragments for a page template to splice in
//! verbatim. [`meatspace_logo`] is a constant. [`display_photo`] reads the
//! photo's EXIF data on every call; nothing is cached between calls.
//!
//! [`PhotoRenderer`] is the configurable form: it carries a site root, the
//! `[photos]` config and a [`MetadataReader`]. The free function
//! [`display_photo`] is a `PhotoRenderer` rooted at the current directory
//! with stock defaults and the `nom-exif` reader.

use crate::caption;
use crate::config::PhotosConfig;
use crate::exif::{ExifError, MetadataReader, NomExifReader};
use std::fmt::Display;
use std::path::{Path, PathBuf};

const LOGO: &str = r#"<h1 class="meatspace">meatspace<span>v2</span></h1>"#;

/// The site logo fragment.
pub fn meatspace_logo() -> &'static str {
    LOGO
}

/// Render `photo` (a file name under `assets/photos/` in the current
/// directory) as an `<img>` tag followed by its EXIF caption.
///
/// Fails if the file is missing, is not a JPEG with EXIF data, or lacks
/// the exposure time, ISO or f-number tags.
pub fn display_photo(photo: &str, title: &str, year: impl Display) -> Result<String, ExifError> {
    PhotoRenderer::from_current_dir()?.display_photo(photo, title, year)
}

/// Renders captioned photos for one site.
#[derive(Debug, Clone)]
pub struct PhotoRenderer<R = NomExifReader> {
    root: PathBuf,
    photos: PhotosConfig,
    reader: R,
}

impl PhotoRenderer<NomExifReader> {
    pub fn new(root: impl Into<PathBuf>, photos: PhotosConfig) -> Self {
        Self::with_reader(root, photos, NomExifReader)
    }

    /// Renderer rooted at the process working directory, stock config.
    pub fn from_current_dir() -> Result<Self, ExifError> {
        let root = std::env::current_dir()?;
        Ok(Self::new(root, PhotosConfig::default()))
    }
}

impl<R: MetadataReader> PhotoRenderer<R> {
    pub fn with_reader(root: impl Into<PathBuf>, photos: PhotosConfig, reader: R) -> Self {
        Self {
            root: root.into(),
            photos,
            reader,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk location of `photo`.
    pub fn photo_path(&self, photo: &str) -> PathBuf {
        self.root.join(&self.photos.dir).join(photo)
    }

    /// Public URL of `photo`.
    pub fn photo_url(&self, photo: &str) -> String {
        format!("{}/{}", self.photos.url_prefix.trim_end_matches('/'), photo)
    }

    pub fn display_photo(
        &self,
        photo: &str,
        title: &str,
        year: impl Display,
    ) -> Result<String, ExifError> {
        let path = self.photo_path(photo);
        let snapshot = self.reader.read_snapshot(&path)?;
        log::debug!(
            "{}: {} {}s ISO {}",
            photo,
            snapshot.aperture(),
            snapshot.exposure(),
            snapshot.iso_speed
        );
        Ok(caption::photo_fragment(
            &self.photo_url(photo),
            self.photos.width,
            title,
            &year.to_string(),
            &snapshot,
        ))
    }
}
