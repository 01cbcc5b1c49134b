//! Database row structs.
//!
//! Each submodule contains a `FromRow` struct matching the table row and its
//! conversion into the domain type from `ordini_core`.

pub mod order;
