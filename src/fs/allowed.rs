//! list_allowed_directories — allow-list introspection

use serde_json::{json, Value};

use crate::allowlist::AllowList;
use crate::error::ToolError;

/// Return the allow-list roots as canonicalized at startup. Takes no
/// parameters and needs no authorization.
///
/// Output: `{ "allowedDirectories": ["/abs/root", ...] }`
pub fn execute(allow: &AllowList, _args: &Value) -> Result<Value, ToolError> {
    let dirs: Vec<String> = allow
        .roots()
        .iter()
        .map(|root| root.to_string_lossy().into_owned())
        .collect();

    Ok(json!({ "allowedDirectories": dirs }))
}
