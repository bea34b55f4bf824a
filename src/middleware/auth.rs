use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts, Request, State},
    http::{HeaderMap, Method, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;
use uuid::Uuid;

use rolegate_auth::{Claims, verify_token};
use rolegate_core::AppError;
use rolegate_models::Role;

use crate::state::AppState;

/// HttpOnly cookie carrying the access token.
pub const TOKEN_COOKIE: &str = "rolegate_token";
/// Page a guest tried to reach before being sent to the login form.
pub const INTENDED_COOKIE: &str = "rolegate_intended";
pub const LOGIN_PATH: &str = "/login";

/// The authenticated caller, resolved once per request by [`auth_context`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.0
            .user_id()
            .ok_or_else(|| AppError::unauthorized("Invalid user ID in token"))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Unauthenticated."))
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthUser>().cloned())
    }
}

/// True when the client asked for JSON rather than a page.
pub fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("/json") || accept.contains("+json"))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the caller from the bearer header or the token cookie.
///
/// Missing or invalid tokens leave the request unauthenticated; rejecting is
/// left to [`require_auth`] and the extractors.
pub async fn auth_context(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let token = bearer_token(req.headers())
        .map(str::to_string)
        .or_else(|| jar.get(TOKEN_COOKIE).map(|c| c.value().to_string()));

    if let Some(token) = token {
        match verify_token(&token, &state.jwt_config) {
            Ok(claims) => {
                req.extensions_mut().insert(AuthUser(claims));
            }
            Err(_) => debug!("Ignoring invalid or expired access token"),
        }
    }

    next.run(req).await
}

/// Guards page routes. Guests are sent to the login form and the page they
/// asked for is remembered; JSON clients get a 401.
pub async fn require_auth(jar: CookieJar, req: Request, next: Next) -> Response {
    if req.extensions().get::<AuthUser>().is_some() {
        return next.run(req).await;
    }

    if wants_json(req.headers()) {
        return AppError::unauthorized("Unauthenticated.").into_response();
    }

    let target = req
        .uri()
        .path_and_query()
        .map(|target| target.as_str().to_string())
        .filter(|target| is_local_path(target));

    let jar = match target {
        Some(target) if req.method() == Method::GET => jar.add(intended_cookie(target)),
        _ => jar,
    };

    (jar, Redirect::to(LOGIN_PATH)).into_response()
}

pub fn token_cookie(token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn intended_cookie(target: String) -> Cookie<'static> {
    Cookie::build((INTENDED_COOKIE, target))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Removes the intended URL from the jar, returning it if it is a safe local path.
pub fn take_intended(jar: CookieJar) -> (CookieJar, Option<String>) {
    let intended = jar
        .get(INTENDED_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|target| is_local_path(target));

    let jar = if jar.get(INTENDED_COOKIE).is_some() {
        jar.remove(Cookie::build(INTENDED_COOKIE).path("/"))
    } else {
        jar
    };

    (jar, intended)
}

/// Only same-origin absolute paths may be redirected to.
fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.contains('\\')
}
