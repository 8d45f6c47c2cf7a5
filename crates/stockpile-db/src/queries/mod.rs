//! Database query operations, grouped by table.

pub mod items;
