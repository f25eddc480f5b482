//! Application Layer
//!
//! Use cases orchestrating domain logic and repositories.

pub mod config;
pub mod register;
pub mod session;
pub mod sign_in;
pub mod sign_out;

// Re-exports
pub use config::{AuthConfig, SessionExpiry};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use session::SessionManager;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
