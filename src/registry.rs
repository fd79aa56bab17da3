//! Tool registry — stores and retrieves tool definitions

use std::collections::HashMap;

use serde_json::Value;
use tracing::info;

/// A named operation exposed over the request/response boundary.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema the dispatcher validates request parameters against.
    pub input_schema: Value,
}

/// In-memory tool registry. Built once at startup and never mutated
/// afterwards.
pub struct Registry {
    tools: HashMap<String, ToolDefinition>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool definition.
    pub fn register_tool(&mut self, tool: ToolDefinition) {
        info!("Registered tool: {}", tool.name);
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get a tool by name.
    pub fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// List all tools, ordered by name.
    pub fn list_tools(&self) -> Vec<&ToolDefinition> {
        let mut tools: Vec<_> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Get total tool count.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to create a ToolDefinition.
pub fn make_tool(name: &str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}
