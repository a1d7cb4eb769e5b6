//! Photo fragment formatting.
//!
//! Turns a resolved image URL, the caller's title and year, and an
//! [`ExifSnapshot`] into the HTML the page template embeds:
//!
//! ```text
//! <img src="/assets/photos/alley.jpg" alt="" width="710" /><span class="caption"><strong>Alley (2012)</strong>  &middot; f2.8 &middot; 1/250s &middot; ISO 200</span>
//! ```
//!
//! Values are interpolated as-is. `title`, `year` and the URL are not
//! HTML-escaped, so markup in a title reaches the page verbatim. Any
//! escaping policy belongs here, not in the EXIF reader.

use crate::exif::ExifSnapshot;

const SEPARATOR: &str = " &middot; ";

/// The `<img>` tag. Alt text is always empty.
pub fn img_tag(src: &str, width: u32) -> String {
    format!(r#"<img src="{src}" alt="" width="{width}" />"#)
}

/// The `<span class="caption">` block: bold `title (year)`, then aperture,
/// exposure and ISO separated by middle dots.
pub fn caption_span(title: &str, year: &str, snapshot: &ExifSnapshot) -> String {
    let settings = [
        snapshot.aperture(),
        format!("{}s", snapshot.exposure()),
        format!("ISO {}", snapshot.iso_speed),
    ]
    .join(SEPARATOR);

    // Two spaces before the first separator.
    format!(r#"<span class="caption"><strong>{title} ({year})</strong> {SEPARATOR}{settings}</span>"#)
}

/// Full photo fragment: image tag followed directly by its caption.
pub fn photo_fragment(
    src: &str,
    width: u32,
    title: &str,
    year: &str,
    snapshot: &ExifSnapshot,
) -> String {
    let mut html = img_tag(src, width);
    html.push_str(&caption_span(title, year, snapshot));
    html
}
