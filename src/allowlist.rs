//! Allow-list of directories this process may touch
//!
//! The set of roots is canonicalized once at construction and never changes.
//! Every path argument to every tool goes through [`AllowList::authorize`]
//! before any filesystem access; the check is re-applied for each path an
//! operation touches, never cached within a request.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::ToolError;

/// Immutable set of canonicalized root directories.
#[derive(Debug)]
pub struct AllowList {
    roots: Vec<PathBuf>,
}

impl AllowList {
    /// Build the allow-list from raw directory strings.
    ///
    /// Each root must exist and is resolved with `fs::canonicalize` so later
    /// containment checks compare canonical forms. An unresolvable root is a
    /// startup error. An empty list is valid and denies every path.
    pub fn new<I, S>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roots = Vec::new();
        for dir in raw {
            let dir = dir.as_ref();
            let canonical = fs::canonicalize(dir)
                .with_context(|| format!("cannot resolve allowed directory '{dir}'"))?;
            roots.push(canonical);
        }
        Ok(Self { roots })
    }

    /// Roots in the order they were given at startup.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Canonicalize `candidate` and check containment against the roots.
    ///
    /// The candidate does not have to exist: the deepest existing ancestor is
    /// resolved through the filesystem and the remaining components are
    /// reattached lexically, so a write target in a directory that is about
    /// to be created still resolves consistently. Containment means the
    /// canonical form equals a root or extends it past a component boundary.
    /// Denial is uniform: the error carries the raw input and never reveals
    /// whether the path exists.
    pub fn authorize(&self, candidate: &str) -> Result<PathBuf, ToolError> {
        let resolved = resolve(Path::new(candidate)).map_err(|_| denied(candidate))?;
        if self.roots.iter().any(|root| resolved.starts_with(root)) {
            Ok(resolved)
        } else {
            Err(denied(candidate))
        }
    }
}

fn denied(candidate: &str) -> ToolError {
    ToolError::Permission(format!("access to path '{candidate}' is not allowed"))
}

/// Absolute, normalized form of `path`, resolving as much of it through the
/// filesystem as currently exists.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&std::env::current_dir()?.join(path))
    };

    // Canonicalize the deepest existing ancestor, then reattach the
    // not-yet-existing tail.
    let mut existing = absolute.clone();
    let mut tail: Vec<OsString> = Vec::new();
    loop {
        match fs::canonicalize(&existing) {
            Ok(mut canonical) => {
                for component in tail.iter().rev() {
                    canonical.push(component);
                }
                return Ok(canonical);
            }
            Err(_) => match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    tail.push(name.to_os_string());
                    existing = parent.to_path_buf();
                }
                _ => return Ok(absolute),
            },
        }
    }
}

/// Fold `.` and `..` lexically, without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let _ = normalized.pop();
            }
            _ => normalized.push(component.as_os_str()),
        }
    }
    normalized
}
