//! Repository structs with async CRUD methods.
//!
//! Each repository is a zero-sized struct whose methods take `&PgPool`.

pub mod order_repo;

pub use order_repo::OrderRepo;
