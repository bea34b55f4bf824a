//! # Rolegate Auth
//!
//! Access tokens for authenticated sessions.
//!
//! - [`claims`]: JWT claim structure; carries the user's role so the role gate
//!   needs no store lookup
//! - [`jwt`]: Token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use rolegate_auth::{create_access_token, verify_token};
//! use rolegate_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(&user, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, user.role);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
