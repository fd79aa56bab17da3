//! Filesystem tools — read, write, list, search, and allow-list introspection.
//!
//! Each submodule exposes
//! `pub fn execute(allow: &AllowList, args: &Value) -> Result<Value, ToolError>`
//! which validates its parameters, authorizes every path it touches, performs
//! the operation, and returns the JSON payload.

pub mod allowed;
pub mod list;
pub mod read;
pub mod search;
pub mod walk;
pub mod write;

use serde_json::{json, Value};

use crate::error::ToolError;
use crate::registry::{make_tool, Registry};

/// Extract a required, non-empty string field from the parameter object.
pub(crate) fn require_str<'a>(args: &'a Value, field: &str) -> Result<&'a str, ToolError> {
    let value = args
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::Validation(format!("missing required field '{field}'")))?;
    if value.is_empty() {
        return Err(ToolError::Validation(format!("field '{field}' must not be empty")));
    }
    Ok(value)
}

/// Register every filesystem tool with the registry.
pub fn register_tools(reg: &mut Registry) {
    reg.register_tool(make_tool(
        "read_file",
        "Read a file and return its contents as UTF-8 text",
        json!({
            "type": "object",
            "properties": {
                "path": { "type": "string", "description": "Path to the file" }
            },
            "required": ["path"]
        }),
    ));

    reg.register_tool(make_tool(
        "write_file",
        "Write content to a file, creating parent directories as needed",
        json!({
            "type": "object",
            "properties": {
                "path": { "type": "string", "description": "Path to the file" },
                "content": { "type": "string", "description": "Content to write" },
                "append": {
                    "type": "boolean",
                    "description": "Append to the file instead of overwriting",
                    "default": false
                }
            },
            "required": ["path", "content"]
        }),
    ));

    reg.register_tool(make_tool(
        "list_directory",
        "List the immediate children of a directory, directories first",
        json!({
            "type": "object",
            "properties": {
                "path": { "type": "string", "description": "Path to the directory" }
            },
            "required": ["path"]
        }),
    ));

    reg.register_tool(make_tool(
        "search_files",
        "Search a directory tree for files whose name contains a literal substring",
        json!({
            "type": "object",
            "properties": {
                "path": { "type": "string", "description": "Base directory to search in" },
                "pattern": {
                    "type": "string",
                    "description": "Literal substring matched against file names (not a glob)"
                },
                "recursive": {
                    "type": "boolean",
                    "description": "Descend into subdirectories",
                    "default": true
                }
            },
            "required": ["path", "pattern"]
        }),
    ));

    reg.register_tool(make_tool(
        "list_allowed_directories",
        "List the directories this server is allowed to access",
        json!({
            "type": "object",
            "properties": {},
            "required": []
        }),
    ));
}
