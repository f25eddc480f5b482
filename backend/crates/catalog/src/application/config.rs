//! Application Configuration

use crate::domain::guard::ReadPolicy;

/// Catalog application configuration
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    /// Who may read movies (list and detail)
    pub read_policy: ReadPolicy,
}

impl CatalogConfig {
    /// Catalog readable only by signed-in users
    pub fn members_only() -> Self {
        Self {
            read_policy: ReadPolicy::AuthenticatedOnly,
        }
    }
}
