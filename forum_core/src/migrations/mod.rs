//! For working with migrations.
//!
//! Migrations are an ordered list of SQL changes embedded in the
//! binary. The names of applied migrations are recorded in the
//! `forum_migrations` table.

use crate::db::{BackendConnection, Column, ConnectionMethods};
use crate::{Error, Result, SqlType};

mod migration;
pub use migration::Migration;

const MIGRATIONS_TABLE_SQL: &str =
    "CREATE TABLE IF NOT EXISTS forum_migrations (name TEXT NOT NULL PRIMARY KEY) STRICT;";

/// Row of the table recording applied migrations.
struct AppliedMigration;

impl AppliedMigration {
    const TABLE: &'static str = "forum_migrations";
    const PKCOL: &'static str = "name";
    const COLUMNS: &'static [Column] = &[Column::new("name", SqlType::Text)];
}

/// An ordered collection of migrations.
#[derive(Clone, Debug, Default)]
pub struct Migrations {
    migrations: Vec<Migration>,
}

impl Migrations {
    /// Create a collection. Migrations are applied in the order given.
    pub fn new(migrations: Vec<Migration>) -> Self {
        Migrations { migrations }
    }

    /// Get a migration by name.
    pub fn get_migration(&self, name: &str) -> Option<&Migration> {
        self.migrations.iter().find(|m| m.name() == name)
    }

    /// Get the most recent migration (other than the current migration) or `None` if
    /// no migrations have been created.
    pub fn latest(&self) -> Option<&Migration> {
        self.migrations.last()
    }

    /// Get all migrations in order.
    pub fn all_migrations(&self) -> &[Migration] {
        &self.migrations
    }

    /// Get migrations which come after `since`, in order.
    pub fn migrations_since(&self, since: &str) -> Result<&[Migration]> {
        let idx = self
            .position(since)
            .ok_or_else(|| Error::MigrationError(format!("Migration {since} not found")))?;
        Ok(&self.migrations[idx + 1..])
    }

    /// Names of the migrations recorded as applied in the database.
    pub fn applied_names(&self, conn: &impl ConnectionMethods) -> Result<Vec<String>> {
        if !conn.has_table(AppliedMigration::TABLE)? {
            return Ok(Vec::new());
        }
        conn.query(
            AppliedMigration::TABLE,
            AppliedMigration::COLUMNS,
            None,
            None,
            None,
            None,
        )?
        .iter()
        .map(|row| row.get::<String>(0))
        .collect()
    }

    /// Get the last migration that has been applied to the database or None
    /// if no migrations have been applied
    pub fn last_applied_migration(&self, conn: &impl ConnectionMethods) -> Result<Option<&Migration>> {
        let applied = self.applied_names(conn)?;
        Ok(self
            .migrations
            .iter()
            .rev()
            .find(|m| applied.iter().any(|name| name == m.name())))
    }

    /// Get migrations which have not yet been applied to the database
    pub fn unapplied_migrations(&self, conn: &impl ConnectionMethods) -> Result<&[Migration]> {
        match self.last_applied_migration(conn)? {
            None => Ok(self.all_migrations()),
            Some(m) => self.migrations_since(m.name()),
        }
    }

    /// Apply every unapplied migration. Returns how many were applied.
    pub fn migrate(&self, conn: &mut impl BackendConnection) -> Result<usize> {
        let to_apply = self.unapplied_migrations(&*conn)?;
        for m in to_apply {
            m.apply(conn)?;
        }
        Ok(to_apply.len())
    }

    /// Roll back the latest applied migration, returning it. Returns
    /// `None` when nothing has been applied.
    pub fn rollback_latest(&self, conn: &mut impl BackendConnection) -> Result<Option<&Migration>> {
        let Some(latest) = self.last_applied_migration(&*conn)? else {
            return Ok(None);
        };
        latest.downgrade(conn)?;
        Ok(Some(latest))
    }

    /// Roll back applied migrations until `name` is the latest one
    /// applied. Returns how many were rolled back.
    pub fn rollback_to(&self, conn: &mut impl BackendConnection, name: &str) -> Result<usize> {
        let target = self
            .position(name)
            .ok_or_else(|| Error::MigrationError(format!("Migration {name} not found")))?;
        let mut count = 0;
        while let Some(latest) = self.last_applied_migration(&*conn)? {
            if self.position(latest.name()) <= Some(target) {
                break;
            }
            latest.downgrade(conn)?;
            count += 1;
        }
        Ok(count)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.migrations.iter().position(|m| m.name() == name)
    }
}
