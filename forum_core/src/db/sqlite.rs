//! SQLite database backend
use std::ops::Deref;
use std::path::Path;
use std::sync::Once;

use chrono::naive::NaiveDateTime;
use log::debug;

use super::{helper, Backend, Column, RawQueryResult, Row};
use super::{BackendConnection, BackendTransaction, Connection, ConnectionMethods, Transaction};
use crate::query::{BoolExpr, Order};
use crate::{Error, Result, SqlType, SqlVal};

const SQLITE_DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// The name of the sqlite backend.
pub const BACKEND_NAME: &str = "sqlite";

fn log_callback(error_code: std::ffi::c_int, message: &str) {
    match error_code {
        rusqlite::ffi::SQLITE_NOTICE => log::trace!("{message}"),
        rusqlite::ffi::SQLITE_OK
        | rusqlite::ffi::SQLITE_DONE
        | rusqlite::ffi::SQLITE_NOTICE_RECOVER_WAL
        | rusqlite::ffi::SQLITE_NOTICE_RECOVER_ROLLBACK => log::info!("{message}"),
        rusqlite::ffi::SQLITE_WARNING | rusqlite::ffi::SQLITE_WARNING_AUTOINDEX => {
            log::warn!("{message}")
        }
        _ => log::error!("{error_code} {message}"),
    }
}

/// SQLite [`Backend`] implementation.
#[derive(Debug, Default, Clone)]
pub struct SQLiteBackend;
impl SQLiteBackend {
    /// The backend.
    pub fn new() -> SQLiteBackend {
        SQLiteBackend {}
    }
}
impl SQLiteBackend {
    fn connect(&self, path: &str) -> Result<SQLiteConnection> {
        let connection = SQLiteConnection::open(path)?;
        connection.execute("PRAGMA foreign_keys = ON")?;
        Ok(connection)
    }
}

impl Backend for SQLiteBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn connect(&self, path: &str) -> Result<Connection> {
        Ok(Connection {
            conn: Box::new(self.connect(path)?),
        })
    }
}

/// SQLite database connection.
#[derive(Debug)]
pub struct SQLiteConnection {
    conn: rusqlite::Connection,
}
impl SQLiteConnection {
    fn open(path: &str) -> Result<Self> {
        static INIT_SQLITE_LOGGING: Once = Once::new();
        INIT_SQLITE_LOGGING.call_once(|| {
            _ = unsafe { rusqlite::trace::config_log(Some(log_callback)) };
        });

        let conn = if path == ":memory:" {
            rusqlite::Connection::open_in_memory()?
        } else {
            rusqlite::Connection::open(Path::new(path))?
        };
        Ok(SQLiteConnection { conn })
    }

    // For use with connection_method_wrapper macro
    #[allow(clippy::unnecessary_wraps)]
    fn wrapped_connection_methods(&self) -> Result<&rusqlite::Connection> {
        Ok(&self.conn)
    }
}
crate::connection_method_wrapper!(SQLiteConnection);

impl BackendConnection for SQLiteConnection {
    fn transaction(&mut self) -> Result<Transaction<'_>> {
        let trans: rusqlite::Transaction<'_> = self.conn.transaction()?;
        let trans = Box::new(SqliteTransaction::new(trans));
        Ok(Transaction::new(trans))
    }
    fn is_closed(&self) -> bool {
        false
    }
}

impl ConnectionMethods for rusqlite::Connection {
    fn execute(&self, sql: &str) -> Result<()> {
        debug!("execute sql {sql}");
        self.execute_batch(sql.as_ref())?;
        Ok(())
    }

    fn query(
        &self,
        table: &str,
        columns: &[Column],
        expr: Option<BoolExpr>,
        limit: Option<i32>,
        offset: Option<i32>,
        order: Option<&[Order]>,
    ) -> Result<RawQueryResult> {
        let mut sqlquery = String::new();
        helper::sql_select(columns, table, &mut sqlquery);
        let mut values: Vec<SqlVal> = Vec::new();
        helper::sql_where(expr, &mut values, &mut sqlquery);
        if let Some(order) = order {
            helper::sql_order(order, &mut sqlquery);
        }
        helper::sql_limit_offset(limit, offset, &mut sqlquery);
        debug!("query sql {sqlquery}");

        let mut stmt = self.prepare(&sqlquery)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(values.iter()))?;
        let mut results = Vec::new();
        while let Some(row) = rows.next()? {
            let vals = columns
                .iter()
                .enumerate()
                .map(|(idx, col)| sql_val_from_rusqlite(row.get_ref(idx)?, col))
                .collect::<Result<Vec<SqlVal>>>()?;
            results.push(Row::new(vals));
        }
        Ok(results)
    }

    fn count(&self, table: &str, expr: Option<BoolExpr>) -> Result<i64> {
        let mut sql = format!("SELECT COUNT(*) FROM {}", helper::quote(table));
        let mut values: Vec<SqlVal> = Vec::new();
        helper::sql_where(expr, &mut values, &mut sql);
        debug!("count sql {sql}");
        let count = self.query_row(&sql, rusqlite::params_from_iter(values.iter()), |row| {
            row.get::<_, i64>(0)
        })?;
        Ok(count)
    }

    fn insert_returning_pk(
        &self,
        table: &str,
        columns: &[Column],
        values: &[SqlVal],
    ) -> Result<SqlVal> {
        self.insert_only(table, columns, values)?;
        Ok(SqlVal::BigInt(self.last_insert_rowid()))
    }

    fn insert_only(&self, table: &str, columns: &[Column], values: &[SqlVal]) -> Result<()> {
        let mut sql = String::new();
        helper::sql_insert_with_placeholders(table, columns, &mut sql);
        debug!("insert sql {sql}");
        self.execute(&sql, rusqlite::params_from_iter(values.iter()))?;
        Ok(())
    }

    fn update(
        &self,
        table: &str,
        pkcol: &str,
        pk: SqlVal,
        columns: &[Column],
        values: &[SqlVal],
    ) -> Result<usize> {
        let mut sql = String::new();
        helper::sql_update_with_placeholders(table, pkcol, columns, &mut sql);
        debug!("update sql {sql}");
        let params = values.iter().chain(std::iter::once(&pk));
        let cnt = self.execute(&sql, rusqlite::params_from_iter(params))?;
        Ok(cnt)
    }

    fn delete_where(&self, table: &str, expr: BoolExpr) -> Result<usize> {
        let mut sql = format!("DELETE FROM {}", helper::quote(table));
        let mut values: Vec<SqlVal> = Vec::new();
        helper::sql_where(Some(expr), &mut values, &mut sql);
        debug!("delete where sql {sql}");
        let cnt = self.execute(&sql, rusqlite::params_from_iter(values.iter()))?;
        Ok(cnt)
    }

    fn has_table(&self, table: &str) -> Result<bool> {
        let mut stmt =
            self.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?;")?;
        let mut rows = stmt.query([table])?;
        Ok(rows.next()?.is_some())
    }
}

#[derive(Debug)]
struct SqliteTransaction<'c> {
    trans: Option<rusqlite::Transaction<'c>>,
}
impl<'c> SqliteTransaction<'c> {
    fn new(trans: rusqlite::Transaction<'c>) -> Self {
        SqliteTransaction { trans: Some(trans) }
    }
    fn get(&self) -> Result<&rusqlite::Transaction<'c>> {
        match &self.trans {
            None => Err(Self::already_consumed()),
            Some(trans) => Ok(trans),
        }
    }
    fn wrapped_connection_methods(&self) -> Result<&rusqlite::Connection> {
        Ok(self.get()?.deref())
    }
    fn already_consumed() -> Error {
        Error::Internal("transaction has already been consumed".to_string())
    }
}
crate::connection_method_wrapper!(SqliteTransaction<'_>);

impl<'c> BackendTransaction<'c> for SqliteTransaction<'c> {
    fn commit(&mut self) -> Result<()> {
        match self.trans.take() {
            None => Err(Self::already_consumed()),
            Some(trans) => Ok(trans.commit()?),
        }
    }
    fn rollback(&mut self) -> Result<()> {
        match self.trans.take() {
            None => Err(Self::already_consumed()),
            Some(trans) => Ok(trans.rollback()?),
        }
    }
    // Workaround for https://github.com/rust-lang/rfcs/issues/2765
    fn connection_methods(&self) -> &dyn ConnectionMethods {
        self
    }
}

impl rusqlite::ToSql for SqlVal {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        use rusqlite::types::{ToSqlOutput::Borrowed, ToSqlOutput::Owned, Value, ValueRef};
        Ok(match self {
            SqlVal::Null => Owned(Value::Null),
            SqlVal::Int(i) => Owned(Value::Integer(i64::from(*i))),
            SqlVal::BigInt(i) => Owned(Value::Integer(*i)),
            SqlVal::Text(t) => Borrowed(ValueRef::Text(t.as_bytes())),
            SqlVal::Timestamp(dt) => {
                Owned(Value::Text(dt.format(SQLITE_DT_FORMAT).to_string()))
            }
        })
    }
}

fn sql_val_from_rusqlite(val: rusqlite::types::ValueRef<'_>, col: &Column) -> Result<SqlVal> {
    if let rusqlite::types::ValueRef::Null = val {
        return Ok(SqlVal::Null);
    }
    Ok(match col.ty() {
        SqlType::Int => SqlVal::Int(i32::try_from(val.as_i64()?).map_err(|_| Error::OutOfRange)?),
        SqlType::BigInt => SqlVal::BigInt(val.as_i64()?),
        SqlType::Text => SqlVal::Text(val.as_str()?.to_string()),
        SqlType::Timestamp => SqlVal::Timestamp(NaiveDateTime::parse_from_str(
            val.as_str()?,
            SQLITE_DT_FORMAT,
        )?),
    })
}
