//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of vocabulary shared by every
//! domain crate in the workspace:
//! - Unified error type and result alias ([`error`])
//! - Typed entity identifiers ([`id`])
//! - Field-level validation error carrier ([`validation`])
//!
//! **Design Principle**: only things that are hard to change and mean the
//! same thing in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod validation;
