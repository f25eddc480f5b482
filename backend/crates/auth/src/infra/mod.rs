//! Infrastructure Layer
//!
//! Database implementations and test doubles.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryAuthStore;
pub use postgres::PgAuthRepository;
