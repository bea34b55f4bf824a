mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};
use tower::ServiceExt;

use rolegate::middleware::auth::AuthUser;
use rolegate::middleware::role::{
    ADMIN_HOME, Area, GateDecision, RoleAccessGate, RoleArea, USER_HOME, redirect_based_on_role,
};
use rolegate::rolegate_auth::Claims;
use rolegate::rolegate_config::CorsConfig;
use rolegate::rolegate_db::MemoryUserStore;
use rolegate::rolegate_models::Role;
use rolegate::state::AppState;
use common::{location, test_auth_config, test_jwt_config};

fn create_test_auth_user(role: Role) -> AuthUser {
    AuthUser(Claims {
        sub: "00000000-0000-0000-0000-000000000000".to_string(),
        email: "test@example.com".to_string(),
        name: "Test".to_string(),
        role,
        exp: 9999999999,
        iat: 1234567890,
    })
}

/// Router with the gate in front of a few pages and the caller fixed to `role`.
fn gated_app(role: Option<Role>) -> Router {
    let state = AppState::new(
        Arc::new(MemoryUserStore::new()),
        test_auth_config(),
        test_jwt_config(),
        CorsConfig::default(),
    );

    let inject = move |mut req: Request<Body>, next: Next| async move {
        if let Some(role) = role {
            req.extensions_mut().insert(create_test_auth_user(role));
        }
        let response: Response = next.run(req).await;
        response
    };

    Router::new()
        .route("/dashboard", get(|| async { "dashboard" }))
        .route("/reports", get(|| async { "reports" }))
        .route("/admin", get(|| async { "admin" }))
        .route("/admin/{*rest}", get(|| async { "admin page" }))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            redirect_based_on_role,
        ))
        .layer(middleware::from_fn(inject))
        .with_state(state)
}

async fn get_path(app: Router, path: &str) -> Response {
    app.oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_guest_passes_through() {
    for path in ["/dashboard", "/admin", "/admin/settings"] {
        let response = get_path(gated_app(None), path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_admin_is_kept_in_admin_area() {
    for path in ["/dashboard", "/reports"] {
        let response = get_path(gated_app(Some(Role::Admin)), path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some(ADMIN_HOME));
    }

    let response = get_path(gated_app(Some(Role::Admin)), "/admin/users/3").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_user_is_kept_out_of_admin_area() {
    for path in ["/admin", "/admin/settings"] {
        let response = get_path(gated_app(Some(Role::User)), path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some(USER_HOME));
    }

    let response = get_path(gated_app(Some(Role::User)), "/reports").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_custom_area_table() {
    let gate = RoleAccessGate::new(vec![
        RoleArea {
            role: Role::Admin,
            area: Area::Prefix("backoffice"),
            home: "/backoffice",
        },
        RoleArea {
            role: Role::User,
            area: Area::Rest,
            home: "/home",
        },
    ]);

    assert_eq!(
        gate.check(Some(Role::Admin), "/admin"),
        GateDecision::Redirect("/backoffice")
    );
    assert_eq!(
        gate.check(Some(Role::User), "/backoffice/x"),
        GateDecision::Redirect("/home")
    );
    assert_eq!(gate.check(Some(Role::User), "/admin"), GateDecision::Continue);
}

#[test]
fn test_role_without_area_continues() {
    let gate = RoleAccessGate::new(vec![RoleArea {
        role: Role::Admin,
        area: Area::Prefix("admin"),
        home: ADMIN_HOME,
    }]);

    assert_eq!(gate.check(Some(Role::User), "/admin"), GateDecision::Continue);
}
