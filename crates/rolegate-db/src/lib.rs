//! # Rolegate DB
//!
//! The user store capability and its implementations.
//!
//! - [`store`]: The [`UserStore`] trait and [`StoreError`]
//! - [`postgres`]: [`PgUserStore`], backed by SQLx and a unique email index
//! - [`memory`]: [`MemoryUserStore`], for local runs and tests
//!
//! Both implementations make the email uniqueness check and the insert atomic:
//! two concurrent registrations for one address cannot both succeed.
//!
//! # Example
//!
//! ```ignore
//! use rolegate_db::{init_db_pool, PgUserStore, UserStore};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let store = PgUserStore::new(pool);
//! let taken = store.exists_by_email("ann@x.com").await?;
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;
pub use store::{StoreError, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects to Postgres and applies the embedded migrations.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, StoreError> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await?;

    tracing::info!("Database connected and migrations applied");
    Ok(pool)
}
