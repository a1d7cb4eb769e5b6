//! # meatspace
//!
//! Template helpers for the meatspace v2 photo site. A page builder calls
//! them while rendering and splices the returned HTML into its output:
//!
//! ```text
//! meatspace_logo()                        → <h1 class="meatspace">meatspace<span>v2</span></h1>
//! display_photo("alley.jpg", "Alley", 2012)
//!     assets/photos/alley.jpg ─ EXIF ─→ <img …/><span class="caption">…</span>
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`render`] | The two helpers: [`meatspace_logo`] and [`display_photo`] / [`PhotoRenderer`] |
//! | [`caption`] | Pure formatting of the `<img>` tag and caption span |
//! | [`exif`] | [`ExifSnapshot`] extraction behind the [`MetadataReader`] trait |
//! | [`config`] | `meatspace.toml` loading, validation and stock defaults |
//! | [`check`] | Audit of every photo in the assets directory |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Read Per Call
//!
//! Each caption opens its photo, parses the EXIF block and drops the file
//! handle before formatting. Nothing is cached: editing a photo's metadata
//! shows up on the next build without any invalidation step.
//!
//! ## Raw HTML
//!
//! Fragments are plain strings and caller-supplied titles are interpolated
//! unescaped, so a title may carry its own markup. All interpolation lives
//! in [`caption`].
//!
//! ## Failing Loudly
//!
//! A photo that is missing, unparseable, or lacks exposure, ISO or aperture
//! fails the call. There are no placeholder values; the page builder decides
//! whether that aborts the build.

pub mod caption;
pub mod check;
pub mod config;
pub mod exif;
pub mod output;
pub mod render;

pub use exif::{ExifError, ExifSnapshot, MetadataReader, NomExifReader, Rational};
pub use render::{PhotoRenderer, display_photo, meatspace_logo};

#[cfg(test)]
pub(crate) mod test_helpers;
