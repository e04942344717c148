//! CLI command implementations.
//!
//! Each command opens the store against the configured snapshot file, runs
//! one operation, and prints the rendered result. The MCP tools expose the
//! same operations; the CLI exists for local inspection and scripting.

#![allow(clippy::print_stdout)]

use crate::clock::SystemClock;
use crate::config::HabitrackConfig;
use crate::models::{HabitId, Insight, TargetFrequency};
use crate::rendering;
use crate::storage::JsonFileBackend;
use crate::store::HabitStore;
use crate::{Error, Result};

/// Opens the habit store for the configured data file.
fn open_store(config: &HabitrackConfig) -> Result<HabitStore> {
    let backend = JsonFileBackend::with_create(config.data_file())?;
    Ok(HabitStore::open(Box::new(backend), Box::new(SystemClock)))
}

/// Creates a new habit.
///
/// # Errors
///
/// Returns an error if validation fails or the store cannot be opened.
pub fn cmd_create(
    config: &HabitrackConfig,
    name: &str,
    description: &str,
    category: &str,
    frequency: &str,
    target_count: u32,
) -> Result<()> {
    let frequency = TargetFrequency::parse(frequency).ok_or_else(|| {
        Error::InvalidInput(format!(
            "unknown frequency '{frequency}', expected daily, weekly, or monthly"
        ))
    })?;

    let mut store = open_store(config)?;
    let id = store.create_habit(name, description, category, frequency, target_count)?;
    println!("{}", rendering::render_habit_created(name.trim(), id.as_str()));
    Ok(())
}

/// Lists habits.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
pub fn cmd_habits(config: &HabitrackConfig, all: bool) -> Result<()> {
    let store = open_store(config)?;
    println!("{}", rendering::render_habit_list(&store.get_habits(!all)));
    Ok(())
}

/// Logs today's entry for a habit.
///
/// # Errors
///
/// Returns an error if the habit is unknown or the store cannot be opened.
pub fn cmd_log(config: &HabitrackConfig, habit_id: &str, missed: bool, notes: &str) -> Result<()> {
    let mut store = open_store(config)?;
    let outcome = store.log_entry(&HabitId::new(habit_id), !missed, notes)?;
    println!("{}", rendering::render_log_outcome(&outcome));
    Ok(())
}

/// Prints a progress report.
///
/// # Errors
///
/// Returns an error if the habit is unknown, `days` is out of range, or the store
/// cannot be opened.
pub fn cmd_progress(config: &HabitrackConfig, habit_id: &str, days: u32) -> Result<()> {
    let store = open_store(config)?;
    let report = store.progress(&HabitId::new(habit_id), days)?;
    println!("{}", rendering::render_progress(&report));
    Ok(())
}

/// Prints the analytics summary.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
pub fn cmd_analytics(config: &HabitrackConfig) -> Result<()> {
    let store = open_store(config)?;
    println!("{}", rendering::render_analytics(&store.analytics()));
    Ok(())
}

/// Prints motivational insights.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
pub fn cmd_insights(config: &HabitrackConfig) -> Result<()> {
    let store = open_store(config)?;
    let mut insights = store.insights();
    insights.push(Insight::Tip {
        text: rendering::random_tip(),
    });
    println!("{}", rendering::render_insights(&insights));
    Ok(())
}

/// Prints the built-in habit templates.
///
/// # Errors
///
/// Never fails; returns `Result` for command signature consistency.
pub fn cmd_templates() -> Result<()> {
    println!("{}", rendering::render_templates());
    Ok(())
}

/// Prints a shareable progress summary.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
pub fn cmd_share(config: &HabitrackConfig) -> Result<()> {
    let store = open_store(config)?;
    println!(
        "{}",
        rendering::render_shareable(&store.analytics(), &store.get_habits(true))
    );
    Ok(())
}

/// Prints store health.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
pub fn cmd_status(config: &HabitrackConfig) -> Result<()> {
    let store = open_store(config)?;
    println!("Data file: {}", config.data_file().display());
    println!("{}", rendering::render_health(&store.health()));
    Ok(())
}

/// Starts the MCP server.
///
/// # Errors
///
/// Returns an error if the transport is unknown, authentication is not
/// configured for HTTP, or the server fails.
pub fn cmd_serve(config: &HabitrackConfig, transport: &str, port: u16) -> Result<()> {
    use crate::mcp::{McpServer, ToolRegistry, Transport};
    use crate::store::SharedStore;

    let transport = match transport.to_lowercase().as_str() {
        "stdio" => Transport::Stdio,
        "http" => Transport::Http,
        other => {
            return Err(Error::InvalidInput(format!(
                "unknown transport '{other}', expected stdio or http"
            )));
        },
    };

    let store = SharedStore::new(open_store(config)?);
    let registry = ToolRegistry::new(store);

    #[cfg_attr(not(feature = "http"), allow(unused_mut))]
    let mut server = McpServer::new(registry)
        .with_transport(transport)
        .with_port(port);

    #[cfg(feature = "http")]
    if transport == Transport::Http {
        server = server.with_auth_from_env()?;
    }

    tracing::info!(?transport, "starting habitrack MCP server");
    server.start()
}
