//! SQLite connection pool shared by the repositories.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Pragmas executed on every connection handed out by the pool.
#[derive(Debug, Clone)]
pub struct SqlitePragmas {
    pub write_ahead_log: bool,
    /// Agreements, codes and discounts reference each other; keep SQLite honest.
    pub foreign_keys: bool,
    pub busy_timeout: Duration,
}

impl Default for SqlitePragmas {
    fn default() -> Self {
        Self {
            write_ahead_log: true,
            foreign_keys: true,
            busy_timeout: Duration::from_secs(30),
        }
    }
}

impl SqlitePragmas {
    fn batch(&self) -> String {
        let mut batch = format!("PRAGMA busy_timeout = {};", self.busy_timeout.as_millis());
        if self.write_ahead_log {
            batch.push_str(" PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        if self.foreign_keys {
            batch.push_str(" PRAGMA foreign_keys = ON;");
        }
        batch
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&self.batch())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Pool for `database_url` with the default pragmas.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    build_pool(database_url, SqlitePragmas::default())
}

pub fn build_pool(database_url: &str, pragmas: SqlitePragmas) -> Result<DbPool, PoolError> {
    log::debug!("Opening SQLite pool at {database_url}");
    Pool::builder()
        .connection_customizer(Box::new(pragmas))
        .build(ConnectionManager::<SqliteConnection>::new(database_url))
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get()
        .inspect_err(|err| log::error!("Failed to get connection from pool: {err}"))
}
