//! read_file — read file contents

use serde_json::{json, Value};

use crate::allowlist::AllowList;
use crate::error::ToolError;

/// Read the file at `path` and return its contents as a UTF-8 string.
///
/// Input : `{ "path": "/abs/or/relative" }`
/// Output: `{ "path": "...", "content": "..." }`
pub fn execute(allow: &AllowList, args: &Value) -> Result<Value, ToolError> {
    let path = super::require_str(args, "path")?;

    let target = allow.authorize(path)?;

    let content = std::fs::read_to_string(&target)
        .map_err(|e| ToolError::Io(format!("failed to read '{path}': {e}")))?;

    Ok(json!({
        "path": path,
        "content": content,
    }))
}
