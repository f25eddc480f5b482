//! Catalog (Owned Resources) Backend Module
//!
//! Movies owned by registered users, plus per-user ratings.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, the ownership guard, repository traits
//! - `application/` - Movie and rating services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Authorization Model
//! - Ownership is assigned from the session identity at creation and
//!   never changes afterwards
//! - Every mutation passes through `domain::guard::authorize`; missing
//!   identity and wrong identity produce distinct denials (401 vs 403)
//! - Read access is route-configurable (public or authenticated-only)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::CatalogConfig;
pub use domain::guard::{Action, Decision, ReadPolicy, authorize};
pub use error::{CatalogError, CatalogResult};
pub use infra::memory::InMemoryCatalogStore;
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::{catalog_router, catalog_router_generic};
