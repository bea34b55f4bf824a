//! # Rolegate Core
//!
//! Core types, errors, and utilities shared by every Rolegate crate.
//!
//! - [`errors`]: Application error type with field-keyed validation messages
//! - [`password`]: Password hashing capability backed by bcrypt
//! - [`serde`]: Input normalisation helpers for request DTOs
//!
//! # Example
//!
//! ```ignore
//! use rolegate_core::errors::{AppError, FieldErrors};
//! use rolegate_core::password::{BcryptHasher, PasswordHasher};
//!
//! let mut fields = FieldErrors::new();
//! fields.add("email", "The email field is required.");
//! let error = AppError::validation(fields);
//!
//! let hash = BcryptHasher::default().hash("secure_password")?;
//! ```

pub mod errors;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, FieldErrors};
pub use password::{BcryptHasher, PasswordHasher};
