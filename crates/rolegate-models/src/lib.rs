//! # Rolegate Models
//!
//! Domain models and DTOs shared by the service, the store, and the CLI.
//!
//! - [`users`]: The user record and its [`Role`]
//! - [`auth`]: Registration and login request bodies
//!
//! # Example
//!
//! ```ignore
//! use rolegate_models::{RegisterRequestDto, Role};
//!
//! let role: Role = "admin".parse()?;
//! assert!(role.is_admin());
//! ```

pub mod auth;
pub mod users;

pub use auth::{LoginRequest, RegisterRequestDto, TermsAcceptance};
pub use users::{NewUser, Role, UnknownRole, User};
