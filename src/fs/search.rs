//! search_files — find files by name substring

use serde_json::{json, Value};

use crate::allowlist::AllowList;
use crate::error::ToolError;

/// Search under `path` for files whose base name contains `pattern` as a
/// literal substring. Matching is not glob-based.
///
/// Only the search root is authorized; the walk descends exclusively into
/// children of already-contained directories, so it cannot leave the root.
///
/// Input : `{ "path": "/abs/dir", "pattern": "log", "recursive": true }`
/// Output: `{ "pattern": "...", "matches": ["/abs/dir/app.log", ...] }`
pub fn execute(allow: &AllowList, args: &Value) -> Result<Value, ToolError> {
    let path = super::require_str(args, "path")?;
    let pattern = super::require_str(args, "pattern")?;
    let recursive = args.get("recursive").and_then(Value::as_bool).unwrap_or(true);

    let target = allow.authorize(path)?;

    let metadata = std::fs::metadata(&target)
        .map_err(|e| ToolError::Io(format!("failed to search '{path}': {e}")))?;
    if !metadata.is_dir() {
        return Err(ToolError::Io(format!("'{path}' is not a directory")));
    }

    let matches: Vec<String> =
        super::walk::collect_matching(&target, recursive, |name| name.contains(pattern))
            .into_iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();

    Ok(json!({
        "pattern": pattern,
        "matches": matches,
    }))
}
