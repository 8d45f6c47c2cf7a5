//! Database connection pool management.
//!
//! This module provides connection pooling for SQLite using r2d2.
//! It handles pool initialization, connection customization, and running
//! migrations. Checkouts beyond the pool bound block until a connection is
//! returned; they do not fail fast.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use stockpile_common::{Error, Result};

use crate::migrations;

/// Bound on simultaneous connections for file-backed pools.
const POOL_SIZE: u32 = 10;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Initialize a new database pool with the given file path.
///
/// This function will:
/// - Create the SQLite database file if it doesn't exist
/// - Set up connection pooling with r2d2
/// - Run pending database migrations
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(DbPool)` - Initialized connection pool
/// * `Err(Error)` - If pool creation or migration fails
///
/// # Example
///
/// ```no_run
/// use stockpile_db::pool::init_pool;
///
/// let pool = init_pool("/var/lib/stockpile/stockpile.db").unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_pool(db_path: &str) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(db_path);

    let pool = Pool::builder()
        .max_size(POOL_SIZE)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create connection pool: {}", e)))?;

    // Run migrations on a connection from the pool
    let conn = pool
        .get()
        .map_err(|e| Error::database(format!("Failed to get connection for migrations: {}", e)))?;

    migrations::run_migrations(&conn)
        .map_err(|e| Error::database(format!("Failed to run migrations: {}", e)))?;

    Ok(pool)
}

/// Initialize an in-memory database pool for testing.
///
/// This creates a connection pool backed by an in-memory SQLite database.
/// The pool is capped at a single connection: every `:memory:` connection
/// opens its own private database, so the cap keeps all checkouts on the one
/// database the migrations ran against. The database is lost when the pool
/// is dropped.
///
/// # Returns
///
/// * `Ok(DbPool)` - Initialized in-memory connection pool
/// * `Err(Error)` - If pool creation or migration fails
///
/// # Example
///
/// ```
/// use stockpile_db::pool::init_memory_pool;
///
/// let pool = init_memory_pool().unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory();

    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create in-memory pool: {}", e)))?;

    // Run migrations on a connection from the pool
    let conn = pool
        .get()
        .map_err(|e| Error::database(format!("Failed to get connection for migrations: {}", e)))?;

    migrations::run_migrations(&conn)
        .map_err(|e| Error::database(format!("Failed to run migrations: {}", e)))?;

    Ok(pool)
}

/// Get a connection from the pool.
///
/// This is a convenience wrapper around `pool.get()` that converts the
/// r2d2 error into our common Error type.
///
/// # Arguments
///
/// * `pool` - The connection pool to get a connection from
///
/// # Returns
///
/// * `Ok(PooledConnection)` - A pooled database connection
/// * `Err(Error)` - If unable to get a connection from the pool
///
/// # Example
///
/// ```
/// use stockpile_db::pool::{init_memory_pool, get_conn};
///
/// let pool = init_memory_pool().unwrap();
/// let conn = get_conn(&pool).unwrap();
/// ```
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_memory_pool() {
        let pool = init_memory_pool().unwrap();
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn test_get_conn() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        // Verify the connection is usable
        let one: i32 = conn.query_row("SELECT 1", [], |row| row.get(0)).unwrap();
        assert_eq!(one, 1);
    }

    #[test]
    fn test_migrations_run_on_init() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        // Verify that tables exist (migrations were run)
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='items'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_pool_reuses_connections() {
        let pool = init_memory_pool().unwrap();

        {
            let conn = get_conn(&pool).unwrap();
            // Insert test data
            conn.execute(
                "INSERT INTO items (id, name, description) VALUES (?, ?, ?)",
                rusqlite::params!["test-id", "Widget", ""],
            )
            .unwrap();
        }

        // Get a new checkout and verify data is still there
        let conn = get_conn(&pool).unwrap();
        let name: String = conn
            .query_row("SELECT name FROM items WHERE id = ?", ["test-id"], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(name, "Widget");
    }

    #[test]
    fn test_file_pool_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("stockpile.db");

        let pool = init_pool(db_path.to_str().unwrap()).unwrap();
        assert_eq!(pool.max_size(), POOL_SIZE);
        assert!(db_path.exists());

        // Separate connections see the same database
        let conn_a = get_conn(&pool).unwrap();
        conn_a
            .execute(
                "INSERT INTO items (id, name, description) VALUES (?, ?, ?)",
                rusqlite::params!["a", "Gadget", ""],
            )
            .unwrap();

        let conn_b = get_conn(&pool).unwrap();
        let count: i64 = conn_b
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
