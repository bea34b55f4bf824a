//! Registration and post-login policy configuration.
//!
//! # Environment Variables
//!
//! - `ADMIN_REGISTRATION_CODE`: Shared code required to self-register as an admin
//!   (default: `AdminNihBro`)
//! - `AUTH_HOME`: Default post-login destination (default: `/dashboard`)
//! - `REQUIRE_TERMS`: Whether registrations must accept the terms (default: false)
//! - `PASSWORD_MIN_LENGTH`: Minimum password length (default: 8)
//! - `BCRYPT_COST`: bcrypt work factor (default: 12)

use std::env;

use crate::env_flag;

pub const DEFAULT_ADMIN_REGISTRATION_CODE: &str = "AdminNihBro";
pub const DEFAULT_HOME: &str = "/dashboard";

/// Password strength rules applied at registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    /// Returns the messages for every rule `password` breaks.
    pub fn check(&self, password: &str) -> Vec<String> {
        let mut problems = Vec::new();
        if password.chars().count() < self.min_length {
            problems.push(format!(
                "The password must be at least {} characters.",
                self.min_length
            ));
        }
        problems
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    /// Compared case-sensitively against the submitted `admin_code`.
    pub admin_registration_code: String,
    /// Where users land after login when no intended URL was captured.
    pub home: String,
    pub terms_required: bool,
    pub password_policy: PasswordPolicy,
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_registration_code: DEFAULT_ADMIN_REGISTRATION_CODE.to_string(),
            home: DEFAULT_HOME.to_string(),
            terms_required: false,
            password_policy: PasswordPolicy::default(),
            bcrypt_cost: 12,
        }
    }
}

impl AuthConfig {
    /// Loads the policy from the environment, falling back to the defaults.
    /// A blank `ADMIN_REGISTRATION_CODE` counts as unset.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            admin_registration_code: env::var("ADMIN_REGISTRATION_CODE")
                .ok()
                .filter(|code| !code.is_empty())
                .unwrap_or(defaults.admin_registration_code),
            home: env::var("AUTH_HOME")
                .ok()
                .map(|home| home.trim().to_string())
                .filter(|home| !home.is_empty())
                .unwrap_or(defaults.home),
            terms_required: env_flag("REQUIRE_TERMS").unwrap_or(defaults.terms_required),
            password_policy: PasswordPolicy {
                min_length: env::var("PASSWORD_MIN_LENGTH")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.password_policy.min_length),
            },
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.bcrypt_cost),
        }
    }

    pub fn with_admin_registration_code(mut self, code: impl Into<String>) -> Self {
        self.admin_registration_code = code.into();
        self
    }

    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = home.into();
        self
    }

    pub fn with_terms_required(mut self, required: bool) -> Self {
        self.terms_required = required;
        self
    }
}
