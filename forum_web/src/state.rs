use std::sync::Arc;

use forum_core::db::{Connection, ConnectionManager, ConnectionSpec};

use crate::config::Config;
use crate::error::AppError;

pub type Pool = r2d2::Pool<ConnectionManager>;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pool: Pool,
    config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: Pool, config: Config) -> Self {
        AppState {
            pool,
            config: Arc::new(config),
        }
    }

    /// Build a connection pool for `spec` sized by `config`.
    pub fn connect(spec: ConnectionSpec, config: Config) -> Result<Self, AppError> {
        let pool = r2d2::Pool::builder()
            .max_size(config.pool_size)
            .build(ConnectionManager::new(spec))?;
        Ok(AppState::new(pool, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `f` with a pooled connection on a blocking worker thread.
    pub async fn run<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut *conn)
        })
        .await?
    }
}
