//! Data-access layer for the forum crates.
//!
//! Provides the SQLite backend, query expressions, primary and
//! foreign key helpers and the migration runner. Application code
//! should use the `forum` crate, which re-exports what it needs from
//! here.
#![deny(missing_docs)]

use thiserror::Error as ThisError;

pub mod db;
pub mod fkey;
pub mod migrations;
pub mod query;
pub mod sqlval;

mod autopk;
mod model;
mod util;

pub use autopk::AutoPk;
use db::{Column, ConnectionMethods, Row};
pub use query::Query;
pub use sqlval::{FieldType, FromSql, PrimaryKeyType, SqlType, SqlVal, ToSql};

/// Result type that uses [`crate::Error`].
pub type Result<T> = std::result::Result<T, crate::Error>;

/// A type which may be the result of a database query.
///
/// Every result type must have a corresponding object type and the
/// columns of the result type must be a subset of the columns of the
/// object type.
pub trait DataResult: Sized {
    /// Corresponding object type.
    type DBO: DataObject;
    /// Metadata for the columns, in the order they are selected.
    const COLUMNS: &'static [Column];
    /// Load an object from a database row.
    fn from_row(row: &Row) -> Result<Self>;
    /// Create a blank query (matching all rows) for this type.
    fn query() -> Query<Self> {
        Query::new(<Self::DBO as DataObject>::TABLE)
    }
}

/// An object in the database.
///
/// Rather than implementing this type manually, use the
/// [`impl_model!`] macro.
pub trait DataObject: DataResult<DBO = Self> {
    /// The name of the table.
    const TABLE: &'static str;
    /// The name of the primary key column.
    const PKCOL: &'static str;
    /// Columns written on insert and update, in the order of
    /// [`DataObject::non_auto_values`].
    const NON_AUTO_COLUMNS: &'static [Column];

    /// Get the primary key.
    fn pk(&self) -> &AutoPk<i64>;
    /// Get a mutable reference to the primary key.
    fn pk_mut(&mut self) -> &mut AutoPk<i64>;
    /// Values of the non-auto columns.
    fn non_auto_values(&self) -> Vec<SqlVal>;

    /// The primary key of an object which has been saved.
    ///
    /// Returns `Error::ValueNotSaved` otherwise.
    fn id(&self) -> Result<i64> {
        let pk: Option<i64> = **self.pk();
        pk.ok_or(Error::ValueNotSaved)
    }
}

/// Database operations available on every [`DataObject`].
pub trait DataObjectOps: DataObject {
    /// Find this object in the database based on primary key.
    /// Returns `Error::NoSuchObject` if the primary key does not exist.
    fn get(conn: &impl ConnectionMethods, id: i64) -> Result<Self> {
        Self::try_get(conn, id)?.ok_or(Error::NoSuchObject)
    }

    /// Find this object in the database based on primary key.
    /// Returns `None` if the primary key does not exist.
    fn try_get(conn: &impl ConnectionMethods, id: i64) -> Result<Option<Self>> {
        Self::query()
            .filter(query::BoolExpr::Eq(
                Self::PKCOL,
                query::Expr::Val(SqlVal::BigInt(id)),
            ))
            .load_first(conn)
    }

    /// Save the object to the database.
    ///
    /// Inserts when the primary key has not been assigned yet, updates
    /// the existing row otherwise.
    fn save(&mut self, conn: &impl ConnectionMethods) -> Result<()> {
        let values = self.non_auto_values();
        let pk: Option<i64> = **self.pk();
        match pk {
            Some(id) => {
                let updated = conn.update(
                    Self::TABLE,
                    Self::PKCOL,
                    SqlVal::BigInt(id),
                    Self::NON_AUTO_COLUMNS,
                    &values,
                )?;
                if updated == 0 {
                    return Err(Error::NoSuchObject);
                }
            }
            None => {
                let pk = conn.insert_returning_pk(Self::TABLE, Self::NON_AUTO_COLUMNS, &values)?;
                self.pk_mut().initialize(pk)?;
            }
        }
        Ok(())
    }

    /// Delete the object from the database.
    fn delete(&self, conn: &impl ConnectionMethods) -> Result<()> {
        conn.delete(Self::TABLE, Self::PKCOL, SqlVal::BigInt(self.id()?))
    }
}

impl<T> DataObjectOps for T where T: DataObject {}

/// Forum data-access errors.
#[allow(missing_docs)]
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("No such object exists")]
    NoSuchObject,
    #[error("Index out of bounds {0}")]
    BoundsError(String),
    #[error("Type mismatch converting SqlVal. Expected {0}, found value {1:?}")]
    CannotConvertSqlVal(SqlType, SqlVal),
    #[error("Mismatch between sql types and rust types while loading data for column {col}. {detail}")]
    SqlResultTypeMismatch { col: String, detail: String },
    #[error("Value has not been loaded from the database")]
    ValueNotLoaded,
    #[error("Cannot use value not saved to the database")]
    ValueNotSaved,
    #[error("Already initialized")]
    AlreadyInitialized,
    #[error("Migration error {0}")]
    MigrationError(String),
    #[error("Unknown backend {0}")]
    UnknownBackend(String),
    #[error("Range error")]
    OutOfRange,
    #[error("Internal logic error {0}")]
    Internal(String),
    #[error("(De)serialization error {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("IO error {0}")]
    IO(#[from] std::io::Error),
    #[error("Sqlite error {0}")]
    SQLite(#[from] rusqlite::Error),
    #[error("Sqlite error {0}")]
    SQLiteFromSQL(rusqlite::types::FromSqlError),
    #[error("Chrono error {0}")]
    Chrono(#[from] chrono::ParseError),
}

impl Error {
    /// True when the database rejected a write because it violated a
    /// constraint (unique, foreign key, check).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Error::SQLite(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

impl From<rusqlite::types::FromSqlError> for Error {
    fn from(e: rusqlite::types::FromSqlError) -> Self {
        use rusqlite::types::FromSqlError;
        match &e {
            FromSqlError::InvalidType => Error::SqlResultTypeMismatch {
                col: "unknown".to_string(),
                detail: "unknown".to_string(),
            },
            FromSqlError::OutOfRange(_) => Error::OutOfRange,
            _ => Error::SQLiteFromSQL(e),
        }
    }
}
