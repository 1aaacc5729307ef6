//! R2D2 support for the forum data layer.

pub use r2d2::ManageConnection;

use crate::db::{BackendConnection, Connection, ConnectionMethods, ConnectionSpec};
use crate::Result;

/// Opens pooled connections from a [`ConnectionSpec`]. Implements
/// [`r2d2::ManageConnection`].
#[derive(Clone, Debug)]
pub struct ConnectionManager {
    spec: ConnectionSpec,
}
impl ConnectionManager {
    /// Create a manager for `spec`.
    pub fn new(spec: ConnectionSpec) -> Self {
        ConnectionManager { spec }
    }
}

impl ManageConnection for ConnectionManager {
    type Connection = Connection;
    type Error = crate::Error;

    fn connect(&self) -> Result<Self::Connection> {
        crate::db::connect(&self.spec)
    }

    fn is_valid(&self, conn: &mut Self::Connection) -> Result<()> {
        conn.execute("SELECT 1")
    }

    fn has_broken(&self, conn: &mut Self::Connection) -> bool {
        conn.is_closed()
    }
}

// Forwards through `Deref` to the pooled `Connection`.
crate::connection_method_wrapper!(r2d2::PooledConnection<ConnectionManager>);
