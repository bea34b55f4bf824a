use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, instrument};
use utoipa::ToSchema;

use rolegate_auth::create_access_token;
use rolegate_core::AppError;
use rolegate_models::{LoginRequest, RegisterRequestDto, User};

use crate::metrics::{
    track_login_failure, track_login_success, track_registration_rejected, track_user_registered,
};
use crate::middleware::auth::{TOKEN_COOKIE, take_intended, token_cookie, wants_json};
use crate::state::AppState;
use crate::validator::{JsonBody, ValidatedJson};

use super::service::AuthService;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Present on 422 responses, keyed by input field.
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Register a new account
///
/// Signs the new user in. JSON clients get the created user back, browsers are
/// redirected to the home page.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered and signed in", body = User),
        (status = 303, description = "Registered; redirect to the home page"),
        (status = 422, description = "Validation failed, email taken, or admin code invalid", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(email = %dto.email))]
pub async fn register_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    JsonBody(dto): JsonBody<RegisterRequestDto>,
) -> Result<Response, AppError> {
    let user = match state.registration.create(dto).await {
        Ok(user) => user,
        Err(err) => {
            track_registration_rejected(err.reason());
            return Err(err.into());
        }
    };
    track_user_registered(user.role.as_str());

    let token = create_access_token(&user, &state.jwt_config)?;
    let jar = jar.add(token_cookie(token));

    if wants_json(&headers) {
        return Ok((StatusCode::CREATED, jar, Json(user)).into_response());
    }

    Ok((jar, Redirect::to(state.post_auth.home())).into_response())
}

/// Sign in with email and password
///
/// Sets the access token cookie. JSON clients get 204; browsers are redirected
/// by role (admins to `/admin`, users to the page they originally asked for or
/// the home page).
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 204, description = "Signed in"),
        (status = 303, description = "Signed in; redirect to the role's landing page"),
        (status = 422, description = "Invalid input or credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(email = %dto.email))]
pub async fn login_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    let user = match AuthService::attempt_login(
        state.store.as_ref(),
        state.hasher.as_ref(),
        dto,
    )
    .await
    {
        Ok(user) => user,
        Err(err) => {
            track_login_failure("invalid_credentials");
            return Err(err);
        }
    };

    let token = create_access_token(&user, &state.jwt_config)?;
    let jar = jar.add(token_cookie(token));

    track_login_success(user.role.as_str());
    info!(user_id = %user.id, role = %user.role, "User signed in");

    // The intended URL is kept for a later browser login when nothing redirects now.
    let json = wants_json(&headers);
    let (jar, intended) = if json {
        (jar, None)
    } else {
        take_intended(jar)
    };

    let outcome = state.post_auth.respond(Some(user.role), json, intended);

    Ok((jar, outcome).into_response())
}

/// Sign out
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 204, description = "Signed out"),
        (status = 303, description = "Signed out; redirect to `/`")
    ),
    tag = "Authentication"
)]
pub async fn logout_user(headers: HeaderMap, jar: CookieJar) -> Response {
    let jar = jar.remove(Cookie::build(TOKEN_COOKIE).path("/"));

    if wants_json(&headers) {
        return (jar, StatusCode::NO_CONTENT).into_response();
    }

    (jar, Redirect::to("/")).into_response()
}
