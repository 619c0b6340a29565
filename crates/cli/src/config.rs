#![forbid(unsafe_code)]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tm_storage::ResolveOptions;

#[derive(Debug, Parser)]
#[command(name = "trailmark")]
#[command(version, about = "Schema evolution and slug resolution for the travel site store")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,
    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by every subcommand. Flags win over the environment.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// SQLite database file.
    #[arg(long, env = "TRAILMARK_DB", default_value = "data/users.db", global = true)]
    pub db: PathBuf,
    /// Per-resolution deadline in milliseconds; 0 disables it.
    #[arg(
        long,
        env = "TRAILMARK_RESOLVE_TIMEOUT_MS",
        default_value_t = 2_000,
        global = true
    )]
    pub resolve_timeout_ms: u64,
    /// Upper bound on slugs enumerated by `prerender`.
    #[arg(
        long,
        env = "TRAILMARK_PRERENDER_LIMIT",
        default_value_t = 500,
        global = true
    )]
    pub prerender_limit: usize,
}

impl Config {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            timeout: (self.resolve_timeout_ms > 0)
                .then(|| Duration::from_millis(self.resolve_timeout_ms)),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect or apply catalogued schema changes.
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },
    /// Route one path segment and resolve it when it addresses content.
    Resolve { segment: String },
    /// Resolve every eligible slug for static generation.
    Prerender {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the active menu tree of one type.
    Menu {
        #[arg(default_value = "header")]
        menu_type: String,
    },
    /// Report integrity problems in menus and slugs.
    Check,
}

#[derive(Debug, Subcommand)]
pub enum SchemaAction {
    Status,
    Apply { name: String },
    ApplyPending,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_after_the_subcommand_are_accepted() {
        let cli = Cli::try_parse_from([
            "trailmark",
            "schema",
            "apply",
            "authors_slug",
            "--db",
            "/tmp/site.db",
        ])
        .expect("parse");
        assert_eq!(cli.config.db, PathBuf::from("/tmp/site.db"));
        match cli.command {
            Command::Schema {
                action: SchemaAction::Apply { name },
            } => assert_eq!(name, "authors_slug"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_disables_the_deadline() {
        let cli = Cli::try_parse_from(["trailmark", "--resolve-timeout-ms", "0", "resolve", "x"])
            .expect("parse");
        assert_eq!(cli.config.resolve_options().timeout, None);

        let cli = Cli::try_parse_from(["trailmark", "--resolve-timeout-ms", "250", "check"])
            .expect("parse");
        assert_eq!(
            cli.config.resolve_options().timeout,
            Some(Duration::from_millis(250))
        );
    }
}
