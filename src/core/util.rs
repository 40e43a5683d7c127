//! Common utilities

use std::path::Path;

/// Format a byte count for status output (1.5 KB, 3.2 MB, ...).
pub fn pretty_bytes(n: u64) -> String {
    if n < 1024 {
        return format!("{} B", n);
    }
    let units = ["KB", "MB", "GB", "TB"];
    let mut value = n as f64;
    let mut unit = 0;
    loop {
        value /= 1024.0;
        if value < 1024.0 || unit == units.len() - 1 {
            break;
        }
        unit += 1;
    }
    format!("{:.1} {}", value, units[unit])
}

/// Guess a declared media type from a file extension. Unknown extensions
/// fall back to a generic binary type.
pub fn guess_media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("txt") | Some("md") => "text/plain",
        Some("csv") => "text/csv",
        Some("tsv") => "text/tab-separated-values",
        Some("json") => "application/json",
        Some("html") | Some("htm") => "text/html",
        Some("xml") => "application/xml",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("parquet") => "application/octet-stream",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}
