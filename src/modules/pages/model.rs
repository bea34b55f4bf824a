use serde::Serialize;
use utoipa::ToSchema;

use rolegate_models::Role;

use crate::middleware::auth::AuthUser;

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&AuthUser> for SessionUser {
    fn from(auth_user: &AuthUser) -> Self {
        Self {
            id: auth_user.0.sub.clone(),
            name: auth_user.name().to_string(),
            email: auth_user.email().to_string(),
            role: auth_user.role(),
        }
    }
}

/// Landing payload for a role area.
#[derive(Debug, Serialize, ToSchema)]
pub struct AreaPage {
    pub area: String,
    /// Sub-path inside the area, if any.
    pub section: Option<String>,
    pub user: SessionUser,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomePage {
    pub name: String,
    pub authenticated: bool,
}
