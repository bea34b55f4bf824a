use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::{admin_home, admin_section, dashboard, profile, welcome};

/// Pages that require a signed-in user. The caller layers auth and the role gate.
pub fn init_pages_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/user/profile", get(profile))
        .route("/admin", get(admin_home))
        .route("/admin/{*rest}", get(admin_section))
}

pub fn init_public_router() -> Router<AppState> {
    Router::new().route("/", get(welcome))
}
