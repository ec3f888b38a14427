//! Static extension → MIME type table.
//!
//! The local adapter answers `mime_type` from this table alone; the object
//! store uses it to set `Content-Type` when writing.

use crate::path;

/// MIME type for a file extension (without the dot, case-insensitive).
///
/// Returns `None` for unknown extensions.
pub fn from_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext.to_ascii_lowercase().as_str() {
        // Text
        "txt" | "text" | "log" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "md" | "markdown" => "text/markdown",
        "xml" => "text/xml",
        "ics" => "text/calendar",
        "yaml" | "yml" => "application/yaml",
        "toml" => "application/toml",

        // Scripts and data
        "js" | "mjs" => "text/javascript",
        "json" => "application/json",
        "wasm" => "application/wasm",
        "pdf" => "application/pdf",
        "rtf" => "application/rtf",

        // Archives
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "7z" => "application/x-7z-compressed",
        "bin" => "application/octet-stream",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "ico" => "image/vnd.microsoft.icon",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",

        // Audio and video
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        _ => return None,
    };
    Some(mime)
}

/// MIME type for a path, derived from its extension.
///
/// Unknown or missing extensions yield an empty string.
pub fn for_path(path: &str) -> &'static str {
    path::extension(path)
        .and_then(from_extension)
        .unwrap_or("")
}
