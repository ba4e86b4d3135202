// src/utils.rs

/// Reduce a name to ASCII letters, digits, `-` and `_` for use in a download
/// file name. `None` when nothing usable is left.
pub fn normalize_download_name(name: &str) -> Option<String> {
    let mut normalized = String::with_capacity(name.len());
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            normalized.push(c);
        } else if !normalized.ends_with('_') {
            normalized.push('_');
        }
    }

    let normalized = normalized.trim_matches('_');
    (!normalized.is_empty()).then(|| normalized.to_string())
}

/// Get file extension in lowercase
pub fn file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Strip directories a browser may leave in an uploaded file name
pub fn bare_file_name(raw: &str) -> &str {
    raw.rsplit(['/', '\\']).next().unwrap_or(raw)
}

/// Byte count as megabytes with two decimals ("1.50 MB")
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Trim trailing slashes so endpoint paths can be appended directly
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
