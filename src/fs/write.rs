//! write_file — write or append file content

use std::fs::OpenOptions;
use std::io::Write as _;

use serde_json::{json, Value};

use crate::allowlist::AllowList;
use crate::error::ToolError;

/// Write `content` to the file at `path`, truncating unless `append` is set.
///
/// Parent directories are created as needed. `content` must be present but
/// may be the empty string.
///
/// Input : `{ "path": "...", "content": "...", "append": false }`
/// Output: `{ "path": "...", "operation": "write"|"append", "success": true }`
pub fn execute(allow: &AllowList, args: &Value) -> Result<Value, ToolError> {
    let path = super::require_str(args, "path")?;
    let content = args
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::Validation("missing required field 'content'".to_string()))?;
    let append = args.get("append").and_then(Value::as_bool).unwrap_or(false);

    let target = allow.authorize(path)?;

    // Directory creation is its own filesystem effect; the parent is
    // authorized separately before it is created.
    if let Some(parent) = target.parent() {
        if !parent.exists() {
            allow.authorize(&parent.to_string_lossy())?;
            std::fs::create_dir_all(parent).map_err(|e| {
                ToolError::Io(format!("failed to create parent directories for '{path}': {e}"))
            })?;
        }
    }

    if append {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&target)
            .map_err(|e| ToolError::Io(format!("failed to open '{path}': {e}")))?;
        file.write_all(content.as_bytes())
            .map_err(|e| ToolError::Io(format!("failed to append to '{path}': {e}")))?;
    } else {
        std::fs::write(&target, content)
            .map_err(|e| ToolError::Io(format!("failed to write '{path}': {e}")))?;
    }

    Ok(json!({
        "path": path,
        "operation": if append { "append" } else { "write" },
        "success": true,
    }))
}
