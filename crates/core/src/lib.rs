//! Order lifecycle domain logic.
//!
//! This crate has no database or HTTP dependencies. Persistence is reached
//! through the [`store::OrderStore`] trait, implemented by `ordini-db` for
//! Postgres and by [`memory::MemoryOrderStore`] for tests and local runs.

pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod order;
pub mod order_status;
pub mod progress;
pub mod readiness;
pub mod store;
pub mod transition;
pub mod types;
