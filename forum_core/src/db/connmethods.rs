//! Not expected to be called directly by most users. Used by code
//! generated by `impl_model!` and by the query and migration modules.

use crate::query::{BoolExpr, Expr, Order};
use crate::{Error, FromSql, Result, SqlType, SqlVal};

/// Methods available on a database connection. Most users do not need
/// to call these methods directly and will instead use methods on
/// [DataObject][crate::DataObject] or the `query` module.
pub trait ConnectionMethods {
    /// Execute one or more raw SQL statements.
    fn execute(&self, sql: &str) -> Result<()>;
    /// Select `columns` from `table`.
    fn query(
        &self,
        table: &str,
        columns: &[Column],
        expr: Option<BoolExpr>,
        limit: Option<i32>,
        offset: Option<i32>,
        sort: Option<&[Order]>,
    ) -> Result<RawQueryResult>;
    /// Count the rows of `table` matching `expr`.
    fn count(&self, table: &str, expr: Option<BoolExpr>) -> Result<i64>;
    /// Insert a row and return the primary key the database assigned.
    fn insert_returning_pk(&self, table: &str, columns: &[Column], values: &[SqlVal])
        -> Result<SqlVal>;
    /// Like `insert_returning_pk` but with no return value.
    fn insert_only(&self, table: &str, columns: &[Column], values: &[SqlVal]) -> Result<()>;
    /// Update the row identified by `pk`. Returns the number of rows changed.
    fn update(
        &self,
        table: &str,
        pkcol: &str,
        pk: SqlVal,
        columns: &[Column],
        values: &[SqlVal],
    ) -> Result<usize>;
    /// Delete the row identified by `pk`.
    fn delete(&self, table: &str, pkcol: &'static str, pk: SqlVal) -> Result<()> {
        self.delete_where(table, BoolExpr::Eq(pkcol, Expr::Val(pk)))?;
        Ok(())
    }
    /// Delete every row matching `expr`. Returns the number of rows deleted.
    fn delete_where(&self, table: &str, expr: BoolExpr) -> Result<usize>;
    /// Tests if a table exists in the database.
    fn has_table(&self, table: &str) -> Result<bool>;
}

/// Represents a database column. Most users do not need to use this
/// directly.
#[derive(Clone, Debug)]
pub struct Column {
    name: &'static str,
    ty: SqlType,
}

impl Column {
    /// Create a column.
    pub const fn new(name: &'static str, ty: SqlType) -> Self {
        Column { name, ty }
    }
    /// The column name.
    pub fn name(&self) -> &'static str {
        self.name
    }
    /// The column type.
    pub fn ty(&self) -> &SqlType {
        &self.ty
    }
}

/// One row of a query result, holding values in column order.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    values: Vec<SqlVal>,
}

impl Row {
    /// Create a row from already-converted values.
    pub fn new(values: Vec<SqlVal>) -> Self {
        Row { values }
    }

    /// The raw value of column `idx`.
    pub fn value(&self, idx: usize) -> Result<&SqlVal> {
        self.values
            .get(idx)
            .ok_or_else(|| Error::BoundsError(format!("column {idx} of {}", self.values.len())))
    }

    /// The value of column `idx` converted to `T`.
    pub fn get<T: FromSql>(&self, idx: usize) -> Result<T> {
        T::from_sql(self.value(idx)?.clone())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads the columns in order, one call per column.
    pub fn cursor(&self) -> RowCursor<'_> {
        RowCursor { row: self, idx: 0 }
    }
}

/// Sequential reader over a [`Row`].
#[derive(Debug)]
pub struct RowCursor<'a> {
    row: &'a Row,
    idx: usize,
}

impl RowCursor<'_> {
    /// Convert the next column to `T`.
    pub fn next_value<T: FromSql>(&mut self) -> Result<T> {
        let val = self.row.get(self.idx)?;
        self.idx += 1;
        Ok(val)
    }
}

/// Rows returned by [`ConnectionMethods::query`].
pub type RawQueryResult = Vec<Row>;
