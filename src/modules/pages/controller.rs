use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use rolegate_core::AppError;
use rolegate_models::User;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;

use super::model::{AreaPage, SessionUser, WelcomePage};

/// Public landing page
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page", body = WelcomePage),
        (status = 303, description = "Signed-in admin; redirect to `/admin`")
    ),
    tag = "Pages"
)]
pub async fn welcome(auth_user: Option<AuthUser>) -> Json<WelcomePage> {
    Json(WelcomePage {
        name: env!("CARGO_PKG_NAME").to_string(),
        authenticated: auth_user.is_some(),
    })
}

/// User home
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "User home", body = AreaPage),
        (status = 303, description = "Guest sent to `/login`, or admin sent to `/admin`"),
        (status = 401, description = "Unauthenticated JSON client", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Pages"
)]
pub async fn dashboard(auth_user: AuthUser) -> Json<AreaPage> {
    Json(AreaPage {
        area: "dashboard".to_string(),
        section: None,
        user: SessionUser::from(&auth_user),
    })
}

/// Stored profile of the signed-in user
#[utoipa::path(
    get,
    path = "/user/profile",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 303, description = "Guest sent to `/login`, or admin sent to `/admin`"),
        (status = 401, description = "Unauthenticated JSON client", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Pages"
)]
#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = AuthService::get_user(state.store.as_ref(), auth_user.user_id()?).await?;
    Ok(Json(user))
}

/// Admin home
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Admin home", body = AreaPage),
        (status = 303, description = "Guest sent to `/login`, or user sent to `/dashboard`"),
        (status = 401, description = "Unauthenticated JSON client", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Pages"
)]
pub async fn admin_home(auth_user: AuthUser) -> Json<AreaPage> {
    Json(AreaPage {
        area: "admin".to_string(),
        section: None,
        user: SessionUser::from(&auth_user),
    })
}

/// Any page inside the admin area
#[utoipa::path(
    get,
    path = "/admin/{rest}",
    params(("rest" = String, Path, description = "Path below `/admin`")),
    responses(
        (status = 200, description = "Admin page", body = AreaPage),
        (status = 303, description = "Guest sent to `/login`, or user sent to `/dashboard`"),
        (status = 401, description = "Unauthenticated JSON client", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Pages"
)]
pub async fn admin_section(Path(rest): Path<String>, auth_user: AuthUser) -> Json<AreaPage> {
    Json(AreaPage {
        area: "admin".to_string(),
        section: Some(rest),
        user: SessionUser::from(&auth_user),
    })
}
