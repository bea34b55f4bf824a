//! What to send back once credentials check out.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use rolegate_models::Role;

use crate::middleware::role::ADMIN_HOME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// 204 with an empty body, for API clients.
    Acknowledge,
    Redirect(String),
}

impl IntoResponse for LoginOutcome {
    fn into_response(self) -> Response {
        match self {
            LoginOutcome::Acknowledge => StatusCode::NO_CONTENT.into_response(),
            LoginOutcome::Redirect(location) => Redirect::to(&location).into_response(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostAuthRouter {
    home: String,
}

impl PostAuthRouter {
    pub fn new(home: impl Into<String>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    /// Admins always land on their own home; the intended URL only applies to users.
    pub fn respond(
        &self,
        role: Option<Role>,
        wants_json: bool,
        intended: Option<String>,
    ) -> LoginOutcome {
        if wants_json {
            return LoginOutcome::Acknowledge;
        }

        match role {
            Some(Role::Admin) => LoginOutcome::Redirect(ADMIN_HOME.to_string()),
            Some(Role::User) => {
                LoginOutcome::Redirect(intended.unwrap_or_else(|| self.home.clone()))
            }
            None => LoginOutcome::Redirect(self.home.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    fn router() -> PostAuthRouter {
        PostAuthRouter::new("/dashboard")
    }

    #[test]
    fn test_json_clients_are_acknowledged() {
        for role in [None, Some(Role::User), Some(Role::Admin)] {
            assert_eq!(
                router().respond(role, true, Some("/reports".to_string())),
                LoginOutcome::Acknowledge
            );
        }
    }

    #[test]
    fn test_admin_ignores_intended() {
        assert_eq!(
            router().respond(Some(Role::Admin), false, Some("/reports".to_string())),
            LoginOutcome::Redirect("/admin".to_string())
        );
    }

    #[test]
    fn test_user_prefers_intended() {
        assert_eq!(
            router().respond(Some(Role::User), false, Some("/reports".to_string())),
            LoginOutcome::Redirect("/reports".to_string())
        );
        assert_eq!(
            router().respond(Some(Role::User), false, None),
            LoginOutcome::Redirect("/dashboard".to_string())
        );
    }

    #[test]
    fn test_missing_user_goes_home() {
        let router = PostAuthRouter::new("/home");
        assert_eq!(
            router.respond(None, false, Some("/reports".to_string())),
            LoginOutcome::Redirect("/home".to_string())
        );
    }

    #[test]
    fn test_outcome_responses() {
        let ack = LoginOutcome::Acknowledge.into_response();
        assert_eq!(ack.status(), StatusCode::NO_CONTENT);

        let redirect = LoginOutcome::Redirect("/admin".to_string()).into_response();
        assert_eq!(redirect.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect.headers()[header::LOCATION], "/admin");
    }
}
