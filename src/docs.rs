use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use rolegate_models::{LoginRequest, RegisterRequestDto, Role, User};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::pages::model::{AreaPage, SessionUser, WelcomePage};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::logout_user,
        crate::modules::pages::controller::welcome,
        crate::modules::pages::controller::dashboard,
        crate::modules::pages::controller::profile,
        crate::modules::pages::controller::admin_home,
        crate::modules::pages::controller::admin_section,
    ),
    components(
        schemas(
            User,
            Role,
            RegisterRequestDto,
            LoginRequest,
            ErrorResponse,
            AreaPage,
            SessionUser,
            WelcomePage,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and logout"),
        (name = "Pages", description = "Role-partitioned pages")
    ),
    info(
        title = "Rolegate API",
        version = "0.1.0",
        description = "Registration with an admin enrollment code, role-based page routing and post-login redirects.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
