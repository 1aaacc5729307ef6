//! Library for the `forum` command line tool.
//!
//! Every command works against a base directory (`.forum` by default)
//! holding the `connection.json` written by [`init`].

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use forum::schema::{self, DATA_TABLES};
use forum_core::db::{self, BackendConnection, Connection, ConnectionMethods, ConnectionSpec};
use forum_core::query::BoolExpr;
use log::{debug, info};

pub type Result<T> = anyhow::Result<T>;

/// Name of the directory holding the saved connection.
pub const BASE_DIR_NAME: &str = ".forum";

/// The base directory under the current working directory.
pub fn base_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(BASE_DIR_NAME))
}

/// Check that `backend_name` can reach `connstr`, then save the
/// connection under `base_dir`.
pub fn init(base_dir: &Path, backend_name: &str, connstr: &str) -> Result<ConnectionSpec> {
    if db::get_backend(backend_name).is_none() {
        bail!("Unknown backend {backend_name}");
    }
    let spec = ConnectionSpec::new(backend_name, connstr);
    db::connect(&spec).with_context(|| format!("Cannot connect to {connstr}"))?;
    std::fs::create_dir_all(base_dir)?;
    spec.save(base_dir)?;
    info!("saved connection to {}", base_dir.display());
    Ok(spec)
}

pub fn load_connspec(base_dir: &Path) -> Result<ConnectionSpec> {
    ConnectionSpec::load(base_dir).with_context(|| {
        format!(
            "No connection in {}. Run `forum init` first",
            base_dir.display()
        )
    })
}

pub fn connect(base_dir: &Path) -> Result<Connection> {
    Ok(db::connect(&load_connspec(base_dir)?)?)
}

/// Apply every pending migration. Returns how many were applied.
pub fn migrate(base_dir: &Path) -> Result<usize> {
    let mut conn = connect(base_dir)?;
    let migrations = schema::migrations();
    for m in migrations.unapplied_migrations(&conn)? {
        println!("Applying migration {}", m.name());
    }
    Ok(migrations.migrate(&mut conn)?)
}

/// Each migration's name and whether it has been applied, oldest first.
pub fn migration_status(base_dir: &Path) -> Result<Vec<(String, bool)>> {
    let conn = connect(base_dir)?;
    let migrations = schema::migrations();
    let applied = migrations.applied_names(&conn)?;
    Ok(migrations
        .all_migrations()
        .iter()
        .map(|m| (m.name().to_string(), applied.iter().any(|a| a == m.name())))
        .collect())
}

pub fn list_migrations(base_dir: &Path) -> Result<()> {
    for (name, applied) in migration_status(base_dir)? {
        let status = if applied { "applied" } else { "not applied" };
        println!("Migration '{name}' ({status})");
    }
    Ok(())
}

/// Roll back to `name`, leaving it applied, or roll back only the latest
/// migration when no name is given. Returns how many were rolled back.
pub fn rollback(base_dir: &Path, name: Option<&str>) -> Result<usize> {
    let mut conn = connect(base_dir)?;
    let migrations = schema::migrations();
    match name {
        Some(name) => {
            if migrations.get_migration(name).is_none() {
                bail!("No such migration {name}");
            }
            Ok(migrations.rollback_to(&mut conn, name)?)
        }
        None => match migrations.rollback_latest(&mut conn)? {
            Some(m) => {
                println!("Rolled back migration {}", m.name());
                Ok(1)
            }
            None => {
                println!("No migrations applied!");
                Ok(0)
            }
        },
    }
}

/// Delete every row of forum data, keeping the schema.
pub fn clear_data(base_dir: &Path) -> Result<usize> {
    let mut conn = connect(base_dir)?;
    let tx = conn.transaction()?;
    let mut deleted = 0;
    for table in DATA_TABLES.iter().rev() {
        if !tx.has_table(table)? {
            continue;
        }
        let n = tx.delete_where(table, BoolExpr::True)?;
        debug!("deleted {n} rows from {table}");
        deleted += n;
    }
    tx.commit()?;
    Ok(deleted)
}

/// Serve the forum over HTTP until interrupted. `FORUM_*` variables
/// configure the server; the connection defaults to the one in
/// `base_dir`.
pub fn serve(base_dir: &Path) -> Result<()> {
    let mut config = forum_web::Config::from_env();
    if std::env::var_os("FORUM_CONNECTION").is_none() {
        config.connection = base_dir.to_path_buf();
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(forum_web::start_server(config))?;
    Ok(())
}
