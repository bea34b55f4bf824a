//! Role partition for page routes.
//!
//! Every role owns an *area* of the path space and a *home* inside it. An
//! authenticated user who asks for a path outside their area is redirected to
//! their home:
//!
//! | Role  | Area                             | Home         |
//! |-------|----------------------------------|--------------|
//! | admin | paths starting with `admin`      | `/admin`     |
//! | user  | every path no other role claims  | `/dashboard` |
//!
//! Paths are matched without their leading `/`, so `/admin`, `/admin/settings`
//! and `/administer` all belong to the admin area. A redirect always lands
//! inside the target role's own area, so a second pass never redirects again.
//!
//! The gate sits on the page routes and on `/`, so an admin opening the welcome
//! page lands on `/admin`. Guests always pass. The auth endpoints, `/swagger-ui`
//! and `/metrics` are not gated.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use rolegate_models::Role;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub const ADMIN_HOME: &str = "/admin";
pub const USER_HOME: &str = "/dashboard";

/// The slice of the path space a role may visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    /// Paths whose first characters (after `/`) match the prefix.
    Prefix(&'static str),
    /// Everything not claimed by a [`Area::Prefix`] area.
    Rest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleArea {
    pub role: Role,
    pub area: Area,
    pub home: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    Redirect(&'static str),
}

#[derive(Debug, Clone)]
pub struct RoleAccessGate {
    areas: Vec<RoleArea>,
}

impl Default for RoleAccessGate {
    fn default() -> Self {
        Self::new(vec![
            RoleArea {
                role: Role::Admin,
                area: Area::Prefix("admin"),
                home: ADMIN_HOME,
            },
            RoleArea {
                role: Role::User,
                area: Area::Rest,
                home: USER_HOME,
            },
        ])
    }
}

impl RoleAccessGate {
    pub fn new(areas: Vec<RoleArea>) -> Self {
        Self { areas }
    }

    /// Decides whether a request may continue. `None` means unauthenticated,
    /// which is always allowed through; guest handling lives elsewhere.
    pub fn check(&self, role: Option<Role>, path: &str) -> GateDecision {
        let Some(role) = role else {
            return GateDecision::Continue;
        };

        match self.areas.iter().find(|entry| entry.role == role) {
            Some(entry) if !self.area_contains(entry.area, path) => {
                GateDecision::Redirect(entry.home)
            }
            _ => GateDecision::Continue,
        }
    }

    fn area_contains(&self, area: Area, path: &str) -> bool {
        let path = path.trim_start_matches('/');
        match area {
            Area::Prefix(prefix) => path.starts_with(prefix),
            Area::Rest => !self.areas.iter().any(|entry| match entry.area {
                Area::Prefix(prefix) => path.starts_with(prefix),
                Area::Rest => false,
            }),
        }
    }
}

/// Applies [`RoleAccessGate`] to every request under the layer.
pub async fn redirect_based_on_role(
    State(state): State<AppState>,
    auth_user: Option<AuthUser>,
    req: Request,
    next: Next,
) -> Response {
    let role = auth_user.as_ref().map(AuthUser::role);

    match state.gate.check(role, req.uri().path()) {
        GateDecision::Continue => next.run(req).await,
        GateDecision::Redirect(location) => {
            debug!(
                path = %req.uri().path(),
                role = ?role,
                location,
                "Redirecting outside of role area"
            );
            Redirect::to(location).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_always_continues() {
        let gate = RoleAccessGate::default();
        assert_eq!(gate.check(None, "/admin"), GateDecision::Continue);
        assert_eq!(gate.check(None, "/dashboard"), GateDecision::Continue);
    }

    #[test]
    fn test_admin_outside_admin_area() {
        let gate = RoleAccessGate::default();
        assert_eq!(
            gate.check(Some(Role::Admin), "/dashboard"),
            GateDecision::Redirect(ADMIN_HOME)
        );
        assert_eq!(
            gate.check(Some(Role::Admin), "/"),
            GateDecision::Redirect(ADMIN_HOME)
        );
    }

    #[test]
    fn test_user_inside_admin_area() {
        let gate = RoleAccessGate::default();
        assert_eq!(
            gate.check(Some(Role::User), "/admin/settings"),
            GateDecision::Redirect(USER_HOME)
        );
        assert_eq!(
            gate.check(Some(Role::User), "/administer"),
            GateDecision::Redirect(USER_HOME)
        );
    }

    #[test]
    fn test_matching_area_continues() {
        let gate = RoleAccessGate::default();
        assert_eq!(gate.check(Some(Role::User), "/dashboard"), GateDecision::Continue);
        assert_eq!(gate.check(Some(Role::Admin), "/admin"), GateDecision::Continue);
        assert_eq!(
            gate.check(Some(Role::Admin), "/admin/users/3"),
            GateDecision::Continue
        );
    }

    #[test]
    fn test_prefix_is_not_matched_mid_path() {
        let gate = RoleAccessGate::default();
        assert_eq!(
            gate.check(Some(Role::User), "/reports/admin"),
            GateDecision::Continue
        );
    }

    #[test]
    fn test_redirect_targets_are_stable() {
        let gate = RoleAccessGate::default();
        for role in Role::ALL {
            for path in ["/", "/dashboard", "/admin", "/admin/x", "/user/profile"] {
                if let GateDecision::Redirect(home) = gate.check(Some(role), path) {
                    assert_eq!(gate.check(Some(role), home), GateDecision::Continue);
                }
            }
        }
    }
}
