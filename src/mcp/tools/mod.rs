//! MCP tool implementations.
//!
//! # Module Structure
//!
//! - [`definitions`]: Tool schema definitions (JSON Schema for input validation)
//! - [`handlers`]: Tool execution logic against the shared habit store

mod definitions;
mod handlers;

use crate::store::SharedStore;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Registry of MCP tools, bound to a shared habit store.
pub struct ToolRegistry {
    /// Available tools.
    tools: HashMap<String, ToolDefinition>,
    /// Store the handlers execute against.
    store: SharedStore,
}

impl ToolRegistry {
    /// Creates a new tool registry with all habitrack tools.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        let mut tools = HashMap::new();

        tools.insert("habit_create".to_string(), definitions::create_tool());
        tools.insert("habit_log".to_string(), definitions::log_tool());
        tools.insert("habit_list".to_string(), definitions::list_tool());
        tools.insert("habit_progress".to_string(), definitions::progress_tool());
        tools.insert("habit_analytics".to_string(), definitions::analytics_tool());
        tools.insert("habit_insights".to_string(), definitions::insights_tool());
        tools.insert("habit_templates".to_string(), definitions::templates_tool());
        tools.insert("habit_share".to_string(), definitions::share_tool());
        tools.insert("habit_status".to_string(), definitions::status_tool());

        Self { tools, store }
    }

    /// Returns all tool definitions.
    #[must_use]
    pub fn list_tools(&self) -> Vec<&ToolDefinition> {
        self.tools.values().collect()
    }

    /// Gets a tool definition by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// Returns a handle to the underlying shared store.
    #[must_use]
    pub fn store_handle(&self) -> SharedStore {
        self.store.clone()
    }

    /// Executes a tool with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool is unknown, the arguments do not match
    /// the schema, or the store operation fails.
    pub fn execute(&self, name: &str, arguments: Value) -> Result<ToolResult> {
        match name {
            "habit_create" => handlers::execute_create(&self.store, arguments),
            "habit_log" => handlers::execute_log(&self.store, arguments),
            "habit_list" => handlers::execute_list(&self.store, arguments),
            "habit_progress" => handlers::execute_progress(&self.store, arguments),
            "habit_analytics" => handlers::execute_analytics(&self.store),
            "habit_insights" => handlers::execute_insights(&self.store),
            "habit_templates" => handlers::execute_templates(),
            "habit_share" => handlers::execute_share(&self.store),
            "habit_status" => handlers::execute_status(&self.store),
            _ => Err(Error::InvalidInput(format!("Unknown tool: {name}"))),
        }
    }
}

/// Definition of an MCP tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
    /// JSON Schema for input validation.
    pub input_schema: Value,
}

/// Result of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the result represents an error.
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    /// Builds a successful text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }
}

/// Content types that can be returned by tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}
