use log::info;

use super::{AppliedMigration, MIGRATIONS_TABLE_SQL};
use crate::db::{BackendConnection, ConnectionMethods};
use crate::query::{BoolExpr, Expr};
use crate::{Result, SqlVal};

/// A single schema change with the SQL to apply and revert it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Migration {
    name: &'static str,
    up_sql: &'static str,
    down_sql: &'static str,
}

impl Migration {
    /// Create a migration. `name` must be unique within its [`Migrations`](super::Migrations).
    pub const fn new(name: &'static str, up_sql: &'static str, down_sql: &'static str) -> Self {
        Migration {
            name,
            up_sql,
            down_sql,
        }
    }

    /// Migration name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// SQL applying the migration.
    pub fn up_sql(&self) -> &'static str {
        self.up_sql
    }

    /// SQL reverting the migration.
    pub fn down_sql(&self) -> &'static str {
        self.down_sql
    }

    /// Apply the migration to a database connection. The database
    /// must be in the state of the migration prior to this one.
    pub fn apply(&self, conn: &mut impl BackendConnection) -> Result<()> {
        let tx = conn.transaction()?;
        tx.execute(MIGRATIONS_TABLE_SQL)?;
        tx.execute(self.up_sql)?;
        self.mark_applied(&tx)?;
        tx.commit()?;
        info!("applied migration {}", self.name);
        Ok(())
    }

    /// Mark the migration as being applied without doing any
    /// work. Use carefully -- the caller must ensure that the
    /// database schema already matches that expected by this
    /// migration.
    pub fn mark_applied(&self, conn: &impl ConnectionMethods) -> Result<()> {
        conn.insert_only(
            AppliedMigration::TABLE,
            AppliedMigration::COLUMNS,
            &[SqlVal::Text(self.name.to_string())],
        )
    }

    /// Un-apply (downgrade) the migration to a database
    /// connection. This must be the latest migration applied
    /// to the database.
    pub fn downgrade(&self, conn: &mut impl BackendConnection) -> Result<()> {
        let tx = conn.transaction()?;
        tx.execute(self.down_sql)?;
        tx.delete_where(
            AppliedMigration::TABLE,
            BoolExpr::Eq(
                AppliedMigration::PKCOL,
                Expr::Val(SqlVal::Text(self.name.to_string())),
            ),
        )?;
        tx.commit()?;
        info!("rolled back migration {}", self.name);
        Ok(())
    }
}
