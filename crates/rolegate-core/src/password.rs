//! Password hashing.
//!
//! Registration and login only ever see the [`PasswordHasher`] trait; the
//! bcrypt-backed [`BcryptHasher`] is the production implementation. Plaintext
//! passwords are never stored.

use anyhow::Context;
use bcrypt::{DEFAULT_COST, hash, verify};

/// One-way password transform plus verification against a stored hash.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> anyhow::Result<String>;

    fn verify(&self, password: &str, hash: &str) -> anyhow::Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Cost is clamped to the range bcrypt accepts (4..=31).
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> anyhow::Result<String> {
        hash(password, self.cost).context("Failed to hash password")
    }

    fn verify(&self, password: &str, hash: &str) -> anyhow::Result<bool> {
        verify(password, hash).context("Failed to verify password")
    }
}
