//! Request middleware and extractors.
//!
//! - [`auth`]: Resolves the caller from the token cookie or bearer header,
//!   guards page routes, and remembers the intended URL for guests
//! - [`role`]: The role partition gate for authenticated page routes
//!
//! # Layering
//!
//! ```text
//! logging_middleware            (every request)
//!   auth_context                (every request, inserts AuthUser when valid)
//!     require_auth              (page routes)
//!       redirect_based_on_role  (page routes)
//!         handler
//! ```

pub mod auth;
pub mod role;
