//! Directory listing rendering
//!
//! Produces the self-contained HTML document a directory request is
//! answered with: subdirectories plus allow-listed files, sorted by name,
//! each with an absolute link, a local last-modified timestamp and a
//! humanized size.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use anyhow::Context;
use chrono::{DateTime, Local};

use crate::files::resolver::PathResolver;

/// A single row of a directory listing. Built transiently while
/// rendering, never persisted.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_dir: bool,
    /// Size in bytes; directories carry none
    pub size: Option<u64>,
    pub modified: SystemTime,
}

/// Enumerates the servable entries of `dir` in lexicographic order:
/// every subdirectory plus every file whose extension is allow-listed.
/// Everything else is excluded from the listing.
pub fn collect_entries(dir: &Path, resolver: &PathResolver) -> anyhow::Result<Vec<DirectoryEntry>> {
    let mut entries = Vec::new();

    for entry in
        fs::read_dir(dir).with_context(|| format!("failed to read directory {}", dir.display()))?
    {
        let entry = entry?;
        let meta = entry.metadata()?;

        // Non-UTF-8 names are not addressable by a request path
        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(_) => continue,
        };

        if meta.is_dir() {
            entries.push(DirectoryEntry {
                name,
                is_dir: true,
                size: None,
                modified: meta.modified()?,
            });
        } else if meta.is_file() && resolver.is_allowed(&entry.path()) {
            entries.push(DirectoryEntry {
                name,
                is_dir: false,
                size: Some(meta.len()),
                modified: meta.modified()?,
            });
        }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(entries)
}

/// Renders a complete HTML document listing the servable entries of
/// `dir`, the directory the canonical request path `request_path` maps
/// to. Unless the listing is for the root, a synthetic `../` row links to
/// the parent.
pub fn render_listing(
    dir: &Path,
    request_path: &str,
    resolver: &PathResolver,
) -> anyhow::Result<String> {
    let entries = collect_entries(dir, resolver)?;

    let title = escape_html(request_path);
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!("<title>Index of {title}</title>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>Index of {title}</h1>\n"));
    html.push_str("<table>\n");
    html.push_str("<tr><th>Type</th><th>Name</th><th>Last modified</th><th>Size</th></tr>\n");

    if request_path != "/" {
        html.push_str(&format!(
            "<tr><td>DIR</td><td><a href=\"{}\">../</a></td><td></td><td>-</td></tr>\n",
            resolver.absolute_url(&parent_path(request_path))
        ));
    }

    for entry in &entries {
        let link = resolver.absolute_url(&format!(
            "{}/{}",
            request_path.trim_end_matches('/'),
            entry.name
        ));

        let marker = if entry.is_dir {
            "DIR".to_string()
        } else {
            extension_marker(&entry.name)
        };

        let display = if entry.is_dir {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };

        let size = match entry.size {
            Some(bytes) => format_size(bytes),
            None => "-".to_string(),
        };

        html.push_str(&format!(
            "<tr><td>{}</td><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
            marker,
            link,
            escape_html(&display),
            format_timestamp(entry.modified),
            size
        ));
    }

    html.push_str("</table>\n</body>\n</html>\n");

    Ok(html)
}

/// Formats a byte count with binary units, one decimal place above 1024.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Formats a modification time as local `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(t: SystemTime) -> String {
    DateTime::<Local>::from(t)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Canonical path of the parent listing ("/docs/sub" -> "/docs").
fn parent_path(canonical: &str) -> String {
    match canonical.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => canonical[..idx].to_string(),
    }
}

/// Uppercased extension used as the file type marker.
fn extension_marker(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_uppercase())
        .unwrap_or_default()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn parent_of_nested_path() {
        assert_eq!(parent_path("/docs/sub"), "/docs");
        assert_eq!(parent_path("/docs"), "/");
    }
}
