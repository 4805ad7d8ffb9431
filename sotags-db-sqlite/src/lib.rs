#[macro_use]
extern crate diesel;

use anyhow::{anyhow, Result as Fallible};
use diesel::{
    connection::SimpleConnection as _,
    r2d2::{self, CustomizeConnection},
    sqlite::SqliteConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use sotags_core::usecases as uc;
use std::{
    cell::{RefCell, RefMut},
    sync::Arc,
};

mod models;
mod repo_impl;
mod schema;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

type ConnectionManager = r2d2::ConnectionManager<SqliteConnection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

/// Read access to the tags.
///
/// Any number of readers may exist at the same time,
/// but never together with a [`DbReadWrite`].
pub struct DbReadOnly<'a> {
    _pool_guard: RwLockReadGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
}

/// Exclusive read/write access to the tags.
pub struct DbReadWrite<'a> {
    _pool_guard: RwLockWriteGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
}

/// A connection within a running transaction.
pub struct DbConnection<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
}

fn pooled_connection(pool: &ConnectionPool, access: &str) -> Fallible<PooledConnection> {
    pool.get().map_err(|err| {
        log::error!("No pooled database connection available for {access} access: {err}");
        anyhow!(err)
    })
}

impl DbReadWrite<'_> {
    /// Runs `f` within a transaction.
    ///
    /// Nothing is committed unless `f` succeeds.
    pub fn transaction<T, F, E>(&mut self, f: F) -> Result<T, uc::Error>
    where
        F: FnOnce(&DbConnection) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        use diesel::Connection as _;
        let mut failure: Option<uc::Error> = None;
        let res = self.conn.get_mut().transaction(|conn| {
            let conn: &mut SqliteConnection = conn;
            f(&DbConnection {
                conn: RefCell::new(conn),
            })
            .map_err(|err| {
                failure = Some(err.into());
                diesel::result::Error::RollbackTransaction
            })
        });
        match (res, failure) {
            (Ok(value), _) => Ok(value),
            (Err(_), Some(err)) => Err(err),
            (Err(err), None) => Err(uc::Error::Repo(repo_impl::from_diesel_err(err))),
        }
    }

    fn sqlite_conn(&self) -> RefMut<PooledConnection> {
        self.conn.borrow_mut()
    }
}

/// Pragmas that are applied to every new connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(
            "PRAGMA synchronous = NORMAL; \
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(r2d2::Error::QueryError)
    }
}

/// Pool of SQLite connections behind a read/write lock.
///
/// The lock is held as long as a [`DbReadOnly`] or a [`DbReadWrite`]
/// exists. A refresh that replaces all tags is thus never observed
/// halfway and SQLite never reports a locked database.
#[derive(Clone)]
pub struct Connections {
    pool: Arc<RwLock<ConnectionPool>>,
}

/// Settings of the database file.
///
/// The WAL journal persists in the database file and is
/// ignored for in-memory databases.
pub fn initialize_database(connection: &mut SqliteConnection) -> Fallible<()> {
    connection.batch_execute(
        r#"
PRAGMA encoding = 'UTF-8';
PRAGMA journal_mode = WAL;
PRAGMA wal_checkpoint(TRUNCATE); -- shrink the WAL file that has been left by the last run
PRAGMA automatic_index = 1;
"#,
    )?;
    Ok(())
}

impl Connections {
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        // r2d2 keeps retrying inaccessible databases until it times out
        use diesel::Connection as _;
        SqliteConnection::establish(url)
            .map_err(|err| anyhow!("Failed to open SQLite database '{url}': {err}"))?;
        let pool = ConnectionPool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(ConnectionOptions))
            .build(ConnectionManager::new(url))?;
        initialize_database(&mut *pooled_connection(&pool, "initial")?)?;
        Ok(Self {
            pool: Arc::new(RwLock::new(pool)),
        })
    }

    pub fn shared(&self) -> Fallible<DbReadOnly> {
        let pool = self.pool.read();
        let conn = pooled_connection(&pool, "read-only")?;
        Ok(DbReadOnly {
            _pool_guard: pool,
            conn: RefCell::new(conn),
        })
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite> {
        let pool = self.pool.write();
        let conn = pooled_connection(&pool, "read/write")?;
        Ok(DbReadWrite {
            _pool_guard: pool,
            conn: RefCell::new(conn),
        })
    }
}

pub fn run_embedded_database_migrations(conn: DbReadWrite<'_>) -> Fallible<()> {
    log::info!("Running embedded database migrations");
    let mut sqlite_conn = conn.sqlite_conn();
    let applied = sqlite_conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow!("Failed to run database migrations: {err}"))?;
    for version in applied {
        log::info!("Applied database migration {version}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sotags_core::repositories::TagRepo as _;

    #[test]
    fn initialize_and_migrate_in_memory_database() {
        let connections = Connections::init(":memory:", 1).unwrap();
        run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
        assert!(connections.shared().unwrap().all_tags().unwrap().is_empty());
    }

    #[test]
    fn skip_already_applied_migrations() {
        let connections = Connections::init(":memory:", 1).unwrap();
        run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
        run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
    }
}
