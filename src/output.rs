//! CLI output formatting.
//!
//! Each entity gets a header line (positional index + photo name) followed
//! by indented context lines, matching across commands:
//!
//! ```text
//! 001 alley.jpg
//!     Aperture: f2.8
//!     Exposure: 1/250s
//!     ISO: 200
//!     Date: 2012:06:01 18:30:00
//! 002 broken.jpg
//!     Error: missing EXIF tag ExposureTime
//!
//! Checked 2 photos, 1 failed
//! ```
//!
//! `format_*` functions return `Vec<String>` and do no I/O; `print_*`
//! wrappers write them to stdout.

use crate::check::CheckReport;
use crate::exif::ExifSnapshot;

const INDENT: &str = "    ";

/// `001 alley.jpg`: 1-based position, zero-padded to three digits.
fn entry_header(position: usize, photo: &str) -> String {
    format!("{position:03} {photo}")
}

/// Context lines for one snapshot, `depth` indents deep.
pub fn format_snapshot(snapshot: &ExifSnapshot, depth: usize) -> Vec<String> {
    let pad = INDENT.repeat(depth);
    let mut lines = vec![
        format!("{pad}Aperture: {}", snapshot.aperture()),
        format!("{pad}Exposure: {}s", snapshot.exposure()),
        format!("{pad}ISO: {}", snapshot.iso_speed),
    ];
    if let Some(date) = &snapshot.date_time {
        lines.push(format!("{pad}Date: {date}"));
    }
    lines
}

pub fn format_check_report(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (idx, entry) in report.entries.iter().enumerate() {
        lines.push(entry_header(idx + 1, &entry.photo));
        match &entry.result {
            Ok(snapshot) => lines.extend(format_snapshot(snapshot, 1)),
            Err(e) => lines.push(format!("{INDENT}Error: {e}")),
        }
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(summary_line(report));
    lines
}

fn summary_line(report: &CheckReport) -> String {
    let total = report.entries.len();
    let noun = if total == 1 { "photo" } else { "photos" };
    match report.failure_count() {
        0 => format!("Checked {total} {noun}, all ok"),
        n => format!("Checked {total} {noun}, {n} failed"),
    }
}

pub fn print_snapshot(photo: &str, snapshot: &ExifSnapshot) {
    println!("{photo}");
    for line in format_snapshot(snapshot, 1) {
        println!("{line}");
    }
}

pub fn print_check_report(report: &CheckReport) {
    for line in format_check_report(report) {
        println!("{line}");
    }
}
