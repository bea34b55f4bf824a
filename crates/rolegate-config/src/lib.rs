//! # Rolegate Config
//!
//! Configuration structures loaded from environment variables. Every
//! component receives its configuration at construction time; nothing reads
//! the environment after startup.
//!
//! - [`auth`]: Registration and post-login policy (admin code, home, terms)
//! - [`jwt`]: Token signing configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! # Example
//!
//! ```ignore
//! use rolegate_config::{AuthConfig, CorsConfig, JwtConfig};
//!
//! let auth_config = AuthConfig::from_env();
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod auth;
pub mod cors;
pub mod jwt;

pub use auth::{AuthConfig, DEFAULT_ADMIN_REGISTRATION_CODE, DEFAULT_HOME, PasswordPolicy};
pub use cors::CorsConfig;
pub use jwt::JwtConfig;

/// Reads a boolean flag, accepting `1`/`true`/`yes`/`on` case-insensitively.
pub(crate) fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}
