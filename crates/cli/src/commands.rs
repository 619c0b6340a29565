#![forbid(unsafe_code)]

use crate::config::{Cli, Command, Config, SchemaAction};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::{Value, json};
use std::process::ExitCode;
use tm_core::{Route, Slug, route_segment};
use tm_storage::{MigrationError, ResolveError, ResolvedContent, SqliteStore};
use tracing::{error, info};

pub fn run(cli: Cli) -> Result<ExitCode> {
    let Cli { config, command } = cli;
    match command {
        Command::Schema { action } => schema(&config, action),
        Command::Resolve { segment } => resolve(&config, &segment),
        Command::Prerender { limit } => prerender(&config, limit.unwrap_or(config.prerender_limit)),
        Command::Menu { menu_type } => menu(&config, &menu_type),
        Command::Check => check(&config),
    }
}

fn open_writer(config: &Config) -> Result<SqliteStore> {
    SqliteStore::open(&config.db).with_context(|| format!("open {}", config.db.display()))
}

fn open_reader(config: &Config) -> Result<SqliteStore> {
    if !config.db.exists() {
        bail!("no database at {}", config.db.display());
    }
    SqliteStore::open_read_only(&config.db)
        .with_context(|| format!("open {} read-only", config.db.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{out}");
    Ok(())
}

fn schema(config: &Config, action: SchemaAction) -> Result<ExitCode> {
    match action {
        SchemaAction::Status => {
            let store = open_reader(config)?;
            print_json(&store.schema_status()?)?;
            Ok(ExitCode::SUCCESS)
        }
        SchemaAction::Apply { name } => {
            let mut store = open_writer(config)?;
            match store.schema_apply(&name) {
                Ok(report) => {
                    print_json(&report)?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => migration_failure(&err),
            }
        }
        SchemaAction::ApplyPending => {
            let mut store = open_writer(config)?;
            match store.schema_apply_pending() {
                Ok(reports) => {
                    print_json(&reports)?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => migration_failure(&err),
            }
        }
    }
}

/// Dependency refusals exit 2 so scripts can tell "run the prerequisite
/// first" apart from a change the store rejected.
fn migration_failure(err: &MigrationError) -> Result<ExitCode> {
    error!(code = err.code(), error = %err, "schema change failed");
    print_json(&json!({
        "error": { "code": err.code(), "message": err.to_string() }
    }))?;
    Ok(if err.is_dependency() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    })
}

fn resolve(config: &Config, segment: &str) -> Result<ExitCode> {
    let slug = match route_segment(segment) {
        Route::Home => {
            print_json(&json!({ "route": "home" }))?;
            return Ok(ExitCode::SUCCESS);
        }
        Route::Reserved(name) => {
            print_json(&json!({ "route": "reserved", "segment": name }))?;
            return Ok(ExitCode::SUCCESS);
        }
        Route::Invalid => {
            print_json(&json!({ "route": "not_found", "segment": segment }))?;
            return Ok(ExitCode::SUCCESS);
        }
        Route::Content(slug) => slug,
    };

    let store = open_reader(config)?;
    let resolved = store.resolve_slug(&slug, config.resolve_options());
    print_json(&resolution_output(&slug, resolved)?)?;
    Ok(ExitCode::SUCCESS)
}

/// Every resolver failure degrades to the not-found page. Store failures
/// are still logged as errors.
fn resolution_output(
    slug: &Slug,
    resolved: Result<ResolvedContent, ResolveError>,
) -> Result<Value> {
    match resolved {
        Ok(content) => serde_json::to_value(&content).context("serialize resolved content"),
        Err(err) => {
            if err.is_not_found_like() {
                info!(slug = %slug, code = err.code(), "serving not-found");
            } else {
                error!(slug = %slug, code = err.code(), error = %err, "resolution failed; serving not-found");
            }
            Ok(json!({ "route": "not_found", "segment": slug, "code": err.code() }))
        }
    }
}

fn prerender(config: &Config, limit: usize) -> Result<ExitCode> {
    let store = open_reader(config)?;
    let batch = store.prerender(limit, config.resolve_options())?;
    print_json(&batch)?;
    Ok(ExitCode::SUCCESS)
}

fn menu(config: &Config, menu_type: &str) -> Result<ExitCode> {
    let store = open_reader(config)?;
    print_json(&store.menu_tree(menu_type)?)?;
    Ok(ExitCode::SUCCESS)
}

fn check(config: &Config) -> Result<ExitCode> {
    let store = open_reader(config)?;
    let report = store.integrity_report()?;
    print_json(&report)?;
    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
