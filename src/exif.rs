//! EXIF snapshot extraction.
//!
//! A caption needs four values from a photo's EXIF block:
//!
//! | Field | Tag | IFD |
//! |---|---|---|
//! | exposure time | `ExposureTime` (`0x829A`, RATIONAL) | Exif |
//! | ISO speed | `ISOSpeedRatings` (`0x8827`, SHORT) | Exif |
//! | f-number | `FNumber` (`0x829D`, RATIONAL) | Exif |
//! | date/time | `DateTime` (`0x0132`), else `DateTimeOriginal` (`0x9003`) | IFD0 / Exif |
//!
//! The first three are required: a photo missing any of them fails with
//! [`ExifError::MissingTag`]. The date is optional and never reaches the
//! caption; it is kept on the snapshot for the `exif` CLI command.
//!
//! Reading goes through the [`MetadataReader`] trait so rendering and the
//! photo check can be tested without real image files. The production
//! implementation is [`NomExifReader`], backed by the `nom-exif` crate.

use nom_exif::{EntryValue, Exif, ExifIter, MediaParser, MediaSource};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

const TAG_EXPOSURE_TIME: u16 = 0x829A;
const TAG_F_NUMBER: u16 = 0x829D;
const TAG_ISO_SPEED: u16 = 0x8827;
const TAG_DATE_TIME: u16 = 0x0132;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;

#[derive(Error, Debug)]
pub enum ExifError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("EXIF parse error: {0}")]
    Parse(#[from] nom_exif::Error),
    #[error("missing EXIF tag {0}")]
    MissingTag(&'static str),
    #[error("invalid value for EXIF tag {tag}: {value}")]
    InvalidValue { tag: &'static str, value: String },
}

/// An unsigned EXIF rational.
///
/// Displays in lowest terms, the way a photographer writes a shutter speed:
/// `10/2500` prints as `1/250`. Whole values keep their denominator (`1/1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    /// Build a rational, rejecting a zero denominator.
    pub fn new(numerator: u32, denominator: u32) -> Option<Self> {
        (denominator != 0).then_some(Self {
            numerator,
            denominator,
        })
    }

    pub fn reduced(self) -> Self {
        let divisor = gcd(self.numerator, self.denominator);
        Self {
            numerator: self.numerator / divisor,
            denominator: self.denominator / divisor,
        }
    }

    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.reduced();
        write!(f, "{}/{}", r.numerator, r.denominator)
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

/// The EXIF fields one caption is built from.
///
/// Constructed per read and never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExifSnapshot {
    pub exposure_time: Rational,
    pub iso_speed: u32,
    /// Capture timestamp in EXIF form, `YYYY:MM:DD HH:MM:SS`. Not part of
    /// the caption.
    pub date_time: Option<String>,
    pub f_number: f64,
}

impl ExifSnapshot {
    /// Aperture as `f<value>`, with the value always carrying a decimal
    /// point: `f2.8`, `f4.0`.
    pub fn aperture(&self) -> String {
        format!("f{:?}", self.f_number)
    }

    /// Exposure time as a reduced fraction of a second, without the unit.
    pub fn exposure(&self) -> String {
        self.exposure_time.to_string()
    }
}

/// Source of EXIF snapshots.
pub trait MetadataReader {
    /// Read the snapshot for the image at `path`.
    fn read_snapshot(&self, path: &Path) -> Result<ExifSnapshot, ExifError>;
}

/// [`MetadataReader`] backed by `nom-exif`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NomExifReader;

impl MetadataReader for NomExifReader {
    fn read_snapshot(&self, path: &Path) -> Result<ExifSnapshot, ExifError> {
        read_snapshot(path)
    }
}

/// Open `path`, parse its EXIF block and extract an [`ExifSnapshot`].
///
/// The file handle lives only for the duration of the parse.
pub fn read_snapshot(path: &Path) -> Result<ExifSnapshot, ExifError> {
    log::debug!("Reading EXIF from {}", path.display());
    let exif = {
        let file = File::open(path)?;
        let mut parser = MediaParser::new();
        let ms = MediaSource::seekable(file)?;
        let iter: ExifIter = parser.parse(ms)?;
        Exif::from(iter)
    };
    snapshot_from_exif(&exif)
}

fn snapshot_from_exif(exif: &Exif) -> Result<ExifSnapshot, ExifError> {
    let exposure_time = required_rational(exif, TAG_EXPOSURE_TIME, "ExposureTime")?;
    let f_number = required_rational(exif, TAG_F_NUMBER, "FNumber")?.to_f64();
    let iso_speed = required_integer(exif, TAG_ISO_SPEED, "ISOSpeedRatings")?;

    let date_time = [TAG_DATE_TIME, TAG_DATE_TIME_ORIGINAL]
        .into_iter()
        .find_map(|tag| lookup(exif, tag))
        .map(exif_timestamp)
        .filter(|s| !s.is_empty());

    Ok(ExifSnapshot {
        exposure_time,
        iso_speed,
        date_time,
        f_number,
    })
}

/// Entries from the Exif sub-IFD are reported under IFD0 by `nom-exif`.
fn lookup(exif: &Exif, tag: u16) -> Option<&EntryValue> {
    exif.get_by_ifd_tag_code(0, tag)
}

fn required_rational(exif: &Exif, tag: u16, name: &'static str) -> Result<Rational, ExifError> {
    let value = lookup(exif, tag).ok_or(ExifError::MissingTag(name))?;
    match value {
        EntryValue::URational(r) => Rational::new(r.0, r.1),
        EntryValue::IRational(r) if r.0 >= 0 && r.1 > 0 => Rational::new(r.0 as u32, r.1 as u32),
        _ => None,
    }
    .ok_or_else(|| invalid(name, value))
}

fn required_integer(exif: &Exif, tag: u16, name: &'static str) -> Result<u32, ExifError> {
    let value = lookup(exif, tag).ok_or(ExifError::MissingTag(name))?;
    integer_value(value).ok_or_else(|| invalid(name, value))
}

/// Scalar integers, or the first element of a multi-valued entry. ISO is
/// often written with a count of 2 or 3.
fn integer_value(value: &EntryValue) -> Option<u32> {
    match value {
        EntryValue::U8(v) => Some(u32::from(*v)),
        EntryValue::U16(v) => Some(u32::from(*v)),
        EntryValue::U32(v) => Some(*v),
        EntryValue::U8Array(v) => v.first().map(|x| u32::from(*x)),
        EntryValue::U16Array(v) => v.first().map(|x| u32::from(*x)),
        EntryValue::U32Array(v) => v.first().copied(),
        _ => None,
    }
}

/// `nom-exif` hands back parsed timestamps; put them back into the
/// `YYYY:MM:DD HH:MM:SS` form the tag stores.
fn exif_timestamp(value: &EntryValue) -> String {
    const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
    match value {
        EntryValue::Time(t) => t.format(EXIF_DATE_FORMAT).to_string(),
        EntryValue::NaiveDateTime(t) => t.format(EXIF_DATE_FORMAT).to_string(),
        EntryValue::Text(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn invalid(tag: &'static str, value: &EntryValue) -> ExifError {
    ExifError::InvalidValue {
        tag,
        value: value.to_string(),
    }
}
