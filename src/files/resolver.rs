//! Canonical path resolution against the document root
//!
//! This module turns percent-decoded request paths into filesystem
//! targets, detecting non-canonical forms (answered with a redirect) and
//! traversal outside the document root (answered as missing).

use std::path::{Path, PathBuf};

use anyhow::Context;
use url::Url;

use crate::config::Config;

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Path was not in canonical form; answer 301 to this absolute URL
    Redirect(String),
    /// Canonical path mapped onto the filesystem
    Target(ResolvedTarget),
}

/// A concrete filesystem object (or absence thereof) a canonical path
/// maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Canonicalized filesystem path; always equal to or a descendant of
    /// the document root
    pub path: PathBuf,
    pub kind: TargetKind,
}

/// Classification of a resolved target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// An existing directory; answered with a listing
    Directory,
    /// An existing file with an allow-listed extension
    File,
    /// Nothing there, or the resolution escaped the document root
    Missing,
    /// An existing file whose extension is not allow-listed
    Disallowed,
}

/// Reduces a request path to canonical form: single leading slash, no
/// empty segments, no trailing slash except for root `/`.
///
/// Idempotent — canonicalizing a canonical path returns it unchanged,
/// which is what keeps the 301 redirect loop-free.
pub fn canonical_form(raw: &str) -> String {
    let mut out = String::new();

    for segment in raw.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(segment);
    }

    if out.is_empty() {
        out.push('/');
    }

    out
}

/// Resolves request paths against a document root.
///
/// Holds only read-only data (canonical root, base URL, allow-list), so a
/// single instance is shared across connections.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    base: Url,
    allowed: Vec<String>,
}

impl PathResolver {
    /// Builds a resolver from configuration.
    ///
    /// The document root must exist; it is canonicalized once so that
    /// containment checks compare canonical paths on both sides.
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let root = std::fs::canonicalize(&cfg.static_files.document_root).with_context(|| {
            format!(
                "document root {} not accessible",
                cfg.static_files.document_root.display()
            )
        })?;

        let base = Url::parse(&format!("http://{}", cfg.server.listen_addr)).with_context(|| {
            format!(
                "listen address {} does not form a valid URL",
                cfg.server.listen_addr
            )
        })?;

        Ok(Self {
            root,
            base,
            allowed: cfg.static_files.allowed_extensions.clone(),
        })
    }

    /// The canonicalized document root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a percent-decoded request path to a redirect or a target.
    pub fn resolve(&self, raw_path: &str) -> Resolution {
        let canonical = canonical_form(raw_path);

        if canonical != raw_path {
            return Resolution::Redirect(self.absolute_url(&canonical));
        }

        Resolution::Target(self.classify(&canonical))
    }

    /// Maps a canonical request path onto the filesystem and classifies it.
    ///
    /// Filesystem canonicalization follows symlinks and collapses `..` at
    /// the OS level. Anything resolving outside the document root reports
    /// `Missing`, indistinguishable from a path that does not exist — this
    /// holds even when a symlink inside the root points outside it.
    fn classify(&self, canonical: &str) -> ResolvedTarget {
        let joined = self.root.join(canonical.trim_start_matches('/'));

        let path = match std::fs::canonicalize(&joined) {
            Ok(p) => p,
            Err(_) => {
                return ResolvedTarget {
                    path: self.root.clone(),
                    kind: TargetKind::Missing,
                };
            }
        };

        if !path.starts_with(&self.root) {
            return ResolvedTarget {
                path: self.root.clone(),
                kind: TargetKind::Missing,
            };
        }

        let kind = match std::fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => TargetKind::Directory,
            Ok(meta) if meta.is_file() => {
                if self.is_allowed(&path) {
                    TargetKind::File
                } else {
                    TargetKind::Disallowed
                }
            }
            _ => TargetKind::Missing,
        };

        ResolvedTarget { path, kind }
    }

    /// Extension gate: only allow-listed suffixes are servable as files.
    pub fn is_allowed(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.allowed.iter().any(|a| a.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }

    /// Builds an absolute URL for a canonical request path, re-encoding
    /// each segment from the configured address and port.
    pub fn absolute_url(&self, canonical: &str) -> String {
        let mut url = self.base.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.clear();
            for segment in canonical.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }

        url.to_string()
    }
}

/// Maps a file extension to the content type it is served with.
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(e) if e.eq_ignore_ascii_case("html") => "text/html",
        Some(e) if e.eq_ignore_ascii_case("png") => "image/png",
        Some(e) if e.eq_ignore_ascii_case("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
