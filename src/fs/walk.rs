//! Bounded depth-first traversal used by search_files

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Walk `root` depth-first in pre-order and collect every file whose base
/// name satisfies `predicate`.
///
/// When `recursive` is false only the immediate directory is scanned.
/// Entries are visited in file-name order so results are reproducible.
/// Unreadable entries are skipped; symlinked directories are not followed,
/// so the walk never leaves `root`.
pub fn collect_matching<P>(root: &Path, recursive: bool, predicate: P) -> Vec<PathBuf>
where
    P: Fn(&str) -> bool,
{
    let mut walker = WalkDir::new(root).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut matches = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(_) => continue, // skip permission errors etc.
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if predicate(&name) {
            matches.push(entry.into_path());
        }
    }
    matches
}
