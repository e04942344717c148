//! Tool definitions for MCP tools.
//!
//! Contains the JSON Schema definitions for all habitrack tools.

use super::ToolDefinition;

/// Defines the habit creation tool.
pub fn create_tool() -> ToolDefinition {
    ToolDefinition {
        name: "habit_create".to_string(),
        description: "Create a new habit to track with categories, frequency, and targets"
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name of the habit"
                },
                "description": {
                    "type": "string",
                    "description": "Description of the habit"
                },
                "category": {
                    "type": "string",
                    "description": "Category (e.g., health, productivity, learning)"
                },
                "target_frequency": {
                    "type": "string",
                    "description": "Target frequency: daily, weekly, or monthly",
                    "enum": ["daily", "weekly", "monthly"],
                    "default": "daily"
                },
                "target_count": {
                    "type": "integer",
                    "description": "How many times per frequency period",
                    "minimum": 1,
                    "default": 1
                }
            },
            "required": ["name", "description", "category"]
        }),
    }
}

/// Defines the entry logging tool.
pub fn log_tool() -> ToolDefinition {
    ToolDefinition {
        name: "habit_log".to_string(),
        description: "Log a habit completion for today with optional notes. Logging the same habit twice on one day overwrites the earlier record.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "habit_id": {
                    "type": "string",
                    "description": "ID of the habit to log"
                },
                "completed": {
                    "type": "boolean",
                    "description": "Whether the habit was completed",
                    "default": true
                },
                "notes": {
                    "type": "string",
                    "description": "Optional notes about the completion"
                }
            },
            "required": ["habit_id"]
        }),
    }
}

/// Defines the habit listing tool.
pub fn list_tool() -> ToolDefinition {
    ToolDefinition {
        name: "habit_list".to_string(),
        description: "Get all habits with current statistics and progress".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "active_only": {
                    "type": "boolean",
                    "description": "Show only active habits",
                    "default": true
                }
            }
        }),
    }
}

/// Defines the progress tool.
pub fn progress_tool() -> ToolDefinition {
    ToolDefinition {
        name: "habit_progress".to_string(),
        description: "Get detailed progress analysis for a specific habit over time".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "habit_id": {
                    "type": "string",
                    "description": "ID of the habit"
                },
                "days": {
                    "type": "integer",
                    "description": "Number of days to show progress for",
                    "minimum": 1,
                    "maximum": 365,
                    "default": 30
                }
            },
            "required": ["habit_id"]
        }),
    }
}

/// Defines the analytics tool.
pub fn analytics_tool() -> ToolDefinition {
    ToolDefinition {
        name: "habit_analytics".to_string(),
        description: "Get overall analytics across all habits: categories, today's progress, and top streaks".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    }
}

/// Defines the insights tool.
pub fn insights_tool() -> ToolDefinition {
    ToolDefinition {
        name: "habit_insights".to_string(),
        description: "Get motivational insights and personalized recommendations".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    }
}

/// Defines the templates tool.
pub fn templates_tool() -> ToolDefinition {
    ToolDefinition {
        name: "habit_templates".to_string(),
        description: "Get popular habit templates for quick setup".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    }
}

/// Defines the shareable progress tool.
pub fn share_tool() -> ToolDefinition {
    ToolDefinition {
        name: "habit_share".to_string(),
        description: "Generate a shareable progress summary".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    }
}

/// Defines the store status tool.
pub fn status_tool() -> ToolDefinition {
    ToolDefinition {
        name: "habit_status".to_string(),
        description: "Report store health, including the last persistence failure if any"
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    }
}
