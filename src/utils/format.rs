// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Filename, URL, and byte-size derivation helpers for resource metadata.

use url::Url;

/// Extensions that mark a URL as pointing at a concrete file rather than a page.
const URL_FILE_EXTENSIONS: &[&str] = &[
    "csv", "json", "xml", "pdf", "xlsx", "xls", "doc", "docx", "txt", "zip", "rar", "jpg", "jpeg",
    "png", "gif", "svg", "mp4", "mp3", "avi", "mov", "wmv", "flv", "mkv", "webm", "wav", "flac",
    "aac", "ogg", "m4a", "wma", "ppt", "pptx", "geojson", "kml", "kmz", "shp", "tsv", "rdf", "owl",
    "n3", "ttl",
];

/// Formats with row/column structure that the schema prober understands.
const TABULAR_FORMATS: &[&str] = &["csv", "tsv", "json", "xlsx", "xls", "ods", "geojson"];

/// Format codes and display labels backing the manual override selector
/// for URL resources.
pub const FORMAT_CATALOG: &[(&str, &str)] = &[
    ("csv", "CSV"),
    ("tsv", "TSV"),
    ("json", "JSON"),
    ("geojson", "GeoJSON"),
    ("xlsx", "Excel (XLSX)"),
    ("xls", "Excel (XLS)"),
    ("ods", "OpenDocument Spreadsheet"),
    ("xml", "XML"),
    ("pdf", "PDF"),
    ("txt", "Plain text"),
    ("zip", "ZIP archive"),
    ("website", "Website"),
];

/// Extract the trailing extension of a filename, lowercased.
///
/// Returns `None` when the name contains no dot or ends with one.
pub fn file_extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Format tag for a filename: its extension, or `"unknown"` without one.
pub fn file_format(name: &str) -> String {
    file_extension(name).unwrap_or_else(|| "unknown".to_string())
}

/// Whether a filename's format is row/column structured and worth
/// handing to the schema prober.
pub fn is_tabular_data_format(name: &str) -> bool {
    file_extension(name).is_some_and(|ext| TABULAR_FORMATS.contains(&ext.as_str()))
}

/// Render a byte count with decimal (1000-based) magnitude steps.
///
/// Zero renders as the literal `"0 Bytes"`; otherwise the value is shown
/// with up to `decimals` fractional digits, trailing zeros trimmed.
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB", "PB", "EB"];
    let step = ((bytes as f64).log10() / 3.0).floor() as usize;
    let step = step.min(UNITS.len() - 1);
    let value = bytes as f64 / 1000f64.powi(step as i32);

    let mut rendered = format!("{value:.decimals$}");
    if rendered.contains('.') {
        rendered = rendered.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    format!("{rendered} {}", UNITS[step])
}

/// Classify a URL as a direct file (by trailing path extension) or a website.
///
/// Anything unparseable, extension-less, with an unknown extension, or
/// carrying a query string or fragment maps to `"website"`.
pub fn detect_url_format(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return "website".to_string();
    };

    if let Some(ext) = file_extension(parsed.path())
        && URL_FILE_EXTENSIONS.contains(&ext.as_str())
    {
        return ext;
    }

    "website".to_string()
}

/// Human-oriented title: extension stripped, separators spaced out.
pub fn format_title(name: &str) -> String {
    format_name(name).replace(['_', '-'], " ")
}

/// Resource name with the trailing extension stripped.
pub fn format_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => name.to_string(),
    }
}
