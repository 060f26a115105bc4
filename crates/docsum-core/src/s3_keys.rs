//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define where
//! uploads are read from and where summaries are written back to.

pub const DEFAULT_SOURCE_PREFIX: &str = "uploads/";

pub const DEFAULT_DESTINATION_PREFIX: &str = "summaries/";

pub const DEFAULT_SUMMARY_MARKER: &str = "_summary";

pub const SUMMARY_EXTENSION: &str = "txt";

/// Final path segment of a key.
pub fn basename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Lowercased extension of the final path segment, if it has one.
pub fn extension(key: &str) -> Option<String> {
    let name = basename(key);
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
}

/// Basename with its final extension removed. Uses the same split as
/// [`extension`], so `.txt` has an empty stem.
pub fn stem(key: &str) -> &str {
    let name = basename(key);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => stem,
        _ => name,
    }
}

/// Whether the key looks like a summary this pipeline already produced.
pub fn is_summary_key(key: &str, marker: &str) -> bool {
    !marker.is_empty() && key.contains(marker)
}

/// Destination key for the summary of `source_key`.
///
/// `uploads/report.pdf` becomes `summaries/report_summary.txt`. The result
/// depends only on the inputs, so re-delivered events overwrite the same
/// object instead of creating a second one.
pub fn summary_key(source_key: &str, destination_prefix: &str, marker: &str) -> String {
    format!(
        "{destination_prefix}{}{marker}.{SUMMARY_EXTENSION}",
        stem(source_key)
    )
}
