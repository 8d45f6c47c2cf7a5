//! Stockpile-DB: Database schema, migrations, and query operations
//!
//! This crate provides database functionality for stockpile using SQLite
//! with rusqlite and r2d2 connection pooling.
//!
//! # Modules
//!
//! - `migrations` - Database schema migrations
//! - `pool` - Connection pool management
//! - `models` - Rust models matching database schema
//! - `queries` - Database query operations
//!
//! # Example
//!
//! ```no_run
//! use stockpile_db::pool::{init_pool, get_conn};
//! use stockpile_db::queries::items;
//!
//! let pool = init_pool("/var/lib/stockpile/stockpile.db").unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let all = items::list_items(&conn).unwrap();
//! println!("{} items registered", all.len());
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
