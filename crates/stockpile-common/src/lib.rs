//! Stockpile-Common: shared types and utilities.
//!
//! This crate provides common functionality used across stockpile:
//!
//! - **Typed IDs**: Type-safe UUID wrappers for items and photo blobs
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use stockpile_common::{ItemId, Error, Result};
//!
//! // Create typed IDs
//! let item_id = ItemId::new();
//!
//! // Use common error types
//! fn example() -> Result<()> {
//!     Err(Error::not_found("item"))
//! }
//! ```

pub mod error;
pub mod ids;

pub use error::{Error, Result};
pub use ids::*;
