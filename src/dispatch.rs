//! Tool dispatch pipeline
//!
//! Pipeline: look up tool → validate parameters against its declared schema →
//! invoke the handler → map the outcome to a response. The dispatcher itself
//! performs no filesystem access and holds no per-request state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::allowlist::AllowList;
use crate::error::ToolError;
use crate::fs;
use crate::registry::Registry;
use crate::schema;

/// One inbound call: an operation name plus its parameter object.
#[derive(Debug, Clone)]
pub struct ToolRequest {
    pub name: String,
    pub arguments: Value,
}

/// Outcome of one dispatched request.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResponse {
    Success { payload: Value },
    Failure { kind: String, message: String },
}

impl ToolResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolResponse::Success { .. })
    }
}

/// A tool handler function.
type Handler = Box<dyn Fn(&AllowList, &Value) -> Result<Value, ToolError> + Send + Sync>;

/// Routes named requests to their handlers.
///
/// Both the registry and the handler map are built once at construction and
/// never mutated, so a shared dispatcher is safe under concurrent dispatch.
pub struct Dispatcher {
    allow: Arc<AllowList>,
    registry: Registry,
    handlers: HashMap<String, Handler>,
}

impl Dispatcher {
    pub fn new(allow: Arc<AllowList>) -> Self {
        let mut registry = Registry::new();
        fs::register_tools(&mut registry);

        let mut dispatcher = Self {
            allow,
            registry,
            handlers: HashMap::new(),
        };
        dispatcher.register_handlers();
        dispatcher
    }

    /// Register all built-in tool handlers.
    fn register_handlers(&mut self) {
        self.handlers.insert(
            "read_file".into(),
            Box::new(|allow, args| fs::read::execute(allow, args)),
        );
        self.handlers.insert(
            "write_file".into(),
            Box::new(|allow, args| fs::write::execute(allow, args)),
        );
        self.handlers.insert(
            "list_directory".into(),
            Box::new(|allow, args| fs::list::execute(allow, args)),
        );
        self.handlers.insert(
            "search_files".into(),
            Box::new(|allow, args| fs::search::execute(allow, args)),
        );
        self.handlers.insert(
            "list_allowed_directories".into(),
            Box::new(|allow, args| fs::allowed::execute(allow, args)),
        );
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Dispatch one request and convert the outcome into a response.
    ///
    /// Every handler failure is caught here and becomes a `Failure` carrying
    /// its originating kind; nothing propagates past this boundary.
    pub fn dispatch(&self, request: &ToolRequest) -> ToolResponse {
        let execution_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        let Some(tool) = self.registry.get_tool(&request.name) else {
            warn!(
                "Unknown tool: {} (execution {execution_id})",
                request.name
            );
            return ToolResponse::Failure {
                kind: "unknown_tool".to_string(),
                message: format!("unknown tool: {}", request.name),
            };
        };

        let result = schema::validate_params(&request.arguments, &tool.input_schema)
            .and_then(|()| {
                // Every registered tool has a handler; both maps are built
                // together at construction.
                let handler = self.handlers.get(&request.name).ok_or_else(|| {
                    ToolError::Io(format!("no handler registered for tool: {}", request.name))
                })?;
                handler(&self.allow, &request.arguments)
            });

        let duration_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok(payload) => {
                info!(
                    "Executed: tool={} execution={execution_id} duration_ms={duration_ms}",
                    request.name
                );
                ToolResponse::Success { payload }
            }
            Err(e) => {
                warn!(
                    "Failed: tool={} execution={execution_id} kind={} duration_ms={duration_ms}: {e}",
                    request.name,
                    e.kind()
                );
                ToolResponse::Failure {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                }
            }
        }
    }
}
