//! The `forum` command.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use forum_cli::{base_dir, clear_data, init, list_migrations, migrate, rollback, serve, Result};

#[derive(Parser)]
#[command(name = "forum", version, about = "Manages a forum database and serves the forum")]
struct Cli {
    /// Directory holding the saved connection. Defaults to `.forum`.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save the database connection.
    Init {
        /// Database backend. Only `sqlite` is supported.
        #[arg(value_name = "BACKEND")]
        backend: String,
        /// Backend connection string, such as a file path for SQLite.
        #[arg(value_name = "CONNECTION")]
        connection: String,
    },
    /// Apply any pending migrations.
    Migrate,
    /// List migrations and whether they have been applied.
    List,
    /// Roll back migrations. With no NAME, rolls back only the latest.
    Rollback {
        /// Roll back every migration applied after this one.
        name: Option<String>,
    },
    /// Remove data.
    Clear {
        #[command(subcommand)]
        what: Clear,
    },
    /// Serve the forum over HTTP.
    Serve,
}

#[derive(Subcommand)]
enum Clear {
    /// Delete all forum data, keeping the schema.
    Data,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        handle_error(e);
    }
}

fn run(cli: Cli) -> Result<()> {
    let dir = match cli.dir {
        Some(dir) => dir,
        None => base_dir()?,
    };
    match cli.command {
        Command::Init {
            backend,
            connection,
        } => {
            init(&dir, &backend, &connection)?;
        }
        Command::Migrate => {
            let n = migrate(&dir)?;
            println!("Applied {n} migrations");
        }
        Command::List => list_migrations(&dir)?,
        Command::Rollback { name } => {
            let n = rollback(&dir, name.as_deref())?;
            if name.is_some() {
                println!("Rolled back {n} migrations");
            }
        }
        Command::Clear { what: Clear::Data } => {
            let n = clear_data(&dir)?;
            println!("Deleted {n} rows");
        }
        Command::Serve => serve(&dir)?,
    }
    Ok(())
}

fn handle_error(e: anyhow::Error) {
    eprintln!("Encountered unexpected error: {e:#}");
    std::process::exit(1);
}
