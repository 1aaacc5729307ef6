//! Connections, transactions and the SQLite backend.
//!
//! Model and query methods take `&impl ConnectionMethods`, which both a
//! [`Connection`] and a [`Transaction`] implement. Only a
//! [`BackendConnection`] can open a transaction.

use std::borrow::Cow;
use std::fmt::Debug;
use std::fs;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

mod connmethods;
mod helper;
mod macros;
pub mod sqlite;

#[cfg(feature = "r2d2")]
pub mod r2;
#[cfg(feature = "r2d2")]
pub use r2::ConnectionManager;

use crate::connection_method_wrapper;

pub use connmethods::{Column, ConnectionMethods, RawQueryResult, Row, RowCursor};

/// A live connection that can open transactions.
pub trait BackendConnection: ConnectionMethods + Debug + Send + 'static {
    /// Open a transaction. Writes go through the returned
    /// [`Transaction`] until it is committed or dropped.
    fn transaction(&mut self) -> Result<Transaction<'_>>;
    /// False when the backend cannot tell.
    fn is_closed(&self) -> bool;
}

/// A boxed connection to whichever backend a [`ConnectionSpec`] names.
#[derive(Debug)]
pub struct Connection {
    conn: Box<dyn BackendConnection>,
}
impl Connection {
    // For use with connection_method_wrapper macro
    #[allow(clippy::unnecessary_wraps)]
    fn wrapped_connection_methods(&self) -> Result<&dyn BackendConnection> {
        Ok(self.conn.as_ref())
    }
}
impl BackendConnection for Connection {
    fn transaction(&mut self) -> Result<Transaction<'_>> {
        self.conn.transaction()
    }
    fn is_closed(&self) -> bool {
        self.conn.is_closed()
    }
}
connection_method_wrapper!(Connection);

/// Where the forum's data lives. Stored as JSON, usually in
/// `.forum/connection.json`, and turned into a [`Connection`] by [`connect`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ConnectionSpec {
    /// Backend name, e.g. `sqlite`.
    pub backend_name: String,
    /// Backend-specific connection string. For SQLite, a file path or `:memory:`.
    pub conn_str: String,
}
impl ConnectionSpec {
    /// A spec for `backend_name` with its connection string.
    pub fn new(backend_name: impl Into<String>, conn_str: impl Into<String>) -> Self {
        ConnectionSpec {
            backend_name: backend_name.into(),
            conn_str: conn_str.into(),
        }
    }
    /// Write the spec to `path`, or to `connection.json` inside it when
    /// `path` is a directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        let path = conn_complete_if_dir(path);
        let mut f = fs::File::create(path)?;
        f.write_all(serde_json::to_string(self)?.as_bytes())
            .map_err(|e| e.into())
    }
    /// Read a spec written by [`ConnectionSpec::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = conn_complete_if_dir(path.as_ref());
        serde_json::from_reader(fs::File::open(path)?).map_err(|e| e.into())
    }
}

fn conn_complete_if_dir(path: &Path) -> Cow<'_, Path> {
    if path.is_dir() {
        Cow::from(path.join("connection.json"))
    } else {
        Cow::from(path)
    }
}

/// Opens connections for one kind of database.
pub trait Backend {
    /// The name a [`ConnectionSpec`] uses for this backend.
    fn name(&self) -> &'static str;
    /// Open a connection to `conn_str`.
    fn connect(&self, conn_str: &str) -> Result<Connection>;
}

/// The backend called `name`, if this build has it.
pub fn get_backend(name: &str) -> Option<Box<dyn Backend>> {
    match name {
        sqlite::BACKEND_NAME => Some(Box::new(sqlite::SQLiteBackend::new())),
        _ => None,
    }
}

/// Open a connection as `spec` describes.
pub fn connect(spec: &ConnectionSpec) -> Result<Connection> {
    get_backend(&spec.backend_name)
        .ok_or_else(|| Error::UnknownBackend(spec.backend_name.clone()))?
        .connect(&spec.conn_str)
}

// Object-safe half of a transaction. `Transaction` consumes itself on
// commit/rollback so neither is called twice.
trait BackendTransaction<'c>: ConnectionMethods + Debug {
    fn commit(&mut self) -> Result<()>;
    fn rollback(&mut self) -> Result<()>;
    // Trait upcasting to `&dyn ConnectionMethods` needs Rust 1.86.
    fn connection_methods(&self) -> &dyn ConnectionMethods;
}

/// An open transaction, from [`BackendConnection::transaction`].
/// Dropping it without [`commit`](Transaction::commit) rolls it back.
#[derive(Debug)]
pub struct Transaction<'c> {
    trans: Box<dyn BackendTransaction<'c> + 'c>,
}
impl<'c> Transaction<'c> {
    fn new(trans: Box<dyn BackendTransaction<'c> + 'c>) -> Self {
        Transaction { trans }
    }
    /// Make the transaction's writes permanent.
    pub fn commit(mut self) -> Result<()> {
        self.trans.deref_mut().commit()
    }
    /// Same as dropping the transaction, but reports errors.
    pub fn rollback(mut self) -> Result<()> {
        self.trans.deref_mut().rollback()
    }
    #[allow(clippy::unnecessary_wraps)]
    fn wrapped_connection_methods(&self) -> Result<&dyn ConnectionMethods> {
        let a: &dyn BackendTransaction<'c> = self.trans.as_ref();
        Ok(a.connection_methods())
    }
}

connection_method_wrapper!(Transaction<'_>);
