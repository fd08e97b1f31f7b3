//! Static file serving
//!
//! This module implements the filesystem side of the server: canonical
//! path resolution against the document root, target classification,
//! and directory listing rendering.

pub mod listing;
pub mod resolver;

pub use listing::{DirectoryEntry, render_listing};
pub use resolver::{PathResolver, Resolution, ResolvedTarget, TargetKind};
