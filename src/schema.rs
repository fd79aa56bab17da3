//! JSON Schema validation for tool parameters

use serde_json::Value;

use crate::error::ToolError;

/// Validate a request's parameter object against a tool's declared schema.
///
/// Runs before the handler is invoked; a mismatch is a validation failure
/// and never reaches the filesystem layer.
pub fn validate_params(params: &Value, schema: &Value) -> Result<(), ToolError> {
    // Use jsonschema crate for validation (0.26+ API)
    let validator = jsonschema::validator_for(schema)
        .map_err(|e| ToolError::Validation(format!("invalid tool schema: {e}")))?;

    if let Err(error) = validator.validate(params) {
        return Err(ToolError::Validation(format!("invalid parameters: {error}")));
    }

    Ok(())
}
