//! Tool execution handlers.
//!
//! Each handler deserializes its typed argument struct, runs the operation
//! against the shared store, and renders the result as text.
//!
//! Error handling splits two ways: malformed arguments propagate as
//! `Error::InvalidInput` (a protocol-level failure), while domain failures
//! such as an unknown habit id come back as a tool result with `is_error`
//! set, so the calling agent sees the message and can correct itself.

use crate::models::{HabitId, Insight, TargetFrequency};
use crate::rendering;
use crate::store::SharedStore;
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

use super::{ToolContent, ToolResult};

/// Maximum allowed length for free-text fields.
///
/// Names, descriptions, and notes are short by nature; the cap prevents a
/// misbehaving client from bloating the snapshot file.
const MAX_TEXT_LENGTH: usize = 4_096;

fn validate_text_length(input: &str, field_name: &str) -> Result<()> {
    if input.len() > MAX_TEXT_LENGTH {
        return Err(Error::InvalidInput(format!(
            "{field_name} exceeds maximum length ({} > {MAX_TEXT_LENGTH} bytes)",
            input.len()
        )));
    }
    Ok(())
}

fn parse_args<T: for<'de> Deserialize<'de>>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments)
        .map_err(|e| Error::InvalidInput(format!("invalid tool arguments: {e}")))
}

/// Wraps a domain failure as an error-flagged tool result.
fn domain_error(error: &Error) -> ToolResult {
    ToolResult {
        content: vec![ToolContent::Text {
            text: format!("Error: {error}"),
        }],
        is_error: true,
    }
}

const fn default_true() -> bool {
    true
}

const fn default_progress_days() -> u32 {
    30
}

#[derive(Debug, Deserialize)]
struct CreateArgs {
    name: String,
    description: String,
    category: String,
    #[serde(default)]
    target_frequency: Option<String>,
    #[serde(default)]
    target_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct LogArgs {
    habit_id: String,
    #[serde(default = "default_true")]
    completed: bool,
    #[serde(default)]
    notes: String,
}

#[derive(Debug, Deserialize)]
struct ListArgs {
    #[serde(default = "default_true")]
    active_only: bool,
}

#[derive(Debug, Deserialize)]
struct ProgressArgs {
    habit_id: String,
    #[serde(default = "default_progress_days")]
    days: u32,
}

/// Executes the habit creation tool.
pub fn execute_create(store: &SharedStore, arguments: Value) -> Result<ToolResult> {
    let args: CreateArgs = parse_args(arguments)?;
    validate_text_length(&args.name, "name")?;
    validate_text_length(&args.description, "description")?;
    validate_text_length(&args.category, "category")?;

    let frequency = match args.target_frequency.as_deref() {
        None | Some("") => TargetFrequency::Daily,
        Some(raw) => TargetFrequency::parse(raw).ok_or_else(|| {
            Error::InvalidInput(format!(
                "unknown target_frequency '{raw}', expected daily, weekly, or monthly"
            ))
        })?,
    };
    let target_count = args.target_count.unwrap_or(1);

    let created = store.write(|s| {
        s.create_habit(
            &args.name,
            &args.description,
            &args.category,
            frequency,
            target_count,
        )
    });

    match created {
        Ok(id) => Ok(ToolResult::text(rendering::render_habit_created(
            args.name.trim(),
            id.as_str(),
        ))),
        Err(e) => Ok(domain_error(&e)),
    }
}

/// Executes the entry logging tool.
pub fn execute_log(store: &SharedStore, arguments: Value) -> Result<ToolResult> {
    let args: LogArgs = parse_args(arguments)?;
    validate_text_length(&args.notes, "notes")?;

    let habit_id = HabitId::new(args.habit_id);
    let outcome = store.write(|s| s.log_entry(&habit_id, args.completed, &args.notes));

    match outcome {
        Ok(outcome) => Ok(ToolResult::text(rendering::render_log_outcome(&outcome))),
        Err(e) => Ok(domain_error(&e)),
    }
}

/// Executes the habit listing tool.
pub fn execute_list(store: &SharedStore, arguments: Value) -> Result<ToolResult> {
    let args: ListArgs = parse_args(arguments)?;
    let habits = store.read(|s| s.get_habits(args.active_only));
    Ok(ToolResult::text(rendering::render_habit_list(&habits)))
}

/// Executes the progress tool.
pub fn execute_progress(store: &SharedStore, arguments: Value) -> Result<ToolResult> {
    let args: ProgressArgs = parse_args(arguments)?;

    let habit_id = HabitId::new(args.habit_id);
    let report = store.read(|s| s.progress(&habit_id, args.days));

    match report {
        Ok(report) => Ok(ToolResult::text(rendering::render_progress(&report))),
        Err(e) => Ok(domain_error(&e)),
    }
}

/// Executes the analytics tool.
pub fn execute_analytics(store: &SharedStore) -> Result<ToolResult> {
    let summary = store.read(crate::store::HabitStore::analytics);
    Ok(ToolResult::text(rendering::render_analytics(&summary)))
}

/// Executes the insights tool, appending the rotating tip.
pub fn execute_insights(store: &SharedStore) -> Result<ToolResult> {
    let mut insights = store.read(crate::store::HabitStore::insights);
    insights.push(Insight::Tip {
        text: rendering::random_tip(),
    });
    Ok(ToolResult::text(rendering::render_insights(&insights)))
}

/// Executes the templates tool.
pub fn execute_templates() -> Result<ToolResult> {
    Ok(ToolResult::text(rendering::render_templates()))
}

/// Executes the shareable progress tool.
pub fn execute_share(store: &SharedStore) -> Result<ToolResult> {
    let (summary, habits) = store.read(|s| (s.analytics(), s.get_habits(true)));
    Ok(ToolResult::text(rendering::render_shareable(
        &summary, &habits,
    )))
}

/// Executes the store status tool.
pub fn execute_status(store: &SharedStore) -> Result<ToolResult> {
    let health = store.read(crate::store::HabitStore::health);
    Ok(ToolResult::text(rendering::render_health(&health)))
}
