//! Infrastructure Layer
//!
//! Database implementations and test doubles.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCatalogStore;
pub use postgres::PgCatalogRepository;
