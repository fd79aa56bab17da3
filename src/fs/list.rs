//! list_directory — list immediate directory children

use serde::Serialize;
use serde_json::{json, Value};

use crate::allowlist::AllowList;
use crate::error::ToolError;

/// One child of a listed directory.
#[derive(Debug, Serialize)]
pub struct DirectoryEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// Return the immediate children of the directory at `path`, all directories
/// before all files, each group in the order the directory read produced.
///
/// Children that are neither regular files nor directories (sockets,
/// devices, symlinks) are omitted rather than misclassified.
///
/// Input : `{ "path": "/abs/dir" }`
/// Output: `{ "path": "...", "contents": [{ "name": "...", "type": "file"|"directory" }] }`
pub fn execute(allow: &AllowList, args: &Value) -> Result<Value, ToolError> {
    let path = super::require_str(args, "path")?;

    let target = allow.authorize(path)?;

    let read_dir = std::fs::read_dir(&target)
        .map_err(|e| ToolError::Io(format!("failed to list '{path}': {e}")))?;

    let mut directories = Vec::new();
    let mut files = Vec::new();

    for entry in read_dir {
        let entry = entry.map_err(|e| ToolError::Io(format!("failed to list '{path}': {e}")))?;
        // DirEntry::file_type does not follow symlinks, so a link to a
        // directory stays unclassified.
        let file_type = entry.file_type().map_err(|e| {
            ToolError::Io(format!("failed to stat '{}': {e}", entry.path().display()))
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if file_type.is_dir() {
            directories.push(DirectoryEntry {
                name,
                kind: EntryKind::Directory,
            });
        } else if file_type.is_file() {
            files.push(DirectoryEntry {
                name,
                kind: EntryKind::File,
            });
        }
    }

    directories.append(&mut files);

    Ok(json!({
        "path": path,
        "contents": directories,
    }))
}
