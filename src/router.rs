use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_middleware, metrics_router};
use crate::middleware::auth::{auth_context, require_auth};
use crate::middleware::role::redirect_based_on_role;
use crate::modules::auth::router::init_auth_router;
use crate::modules::pages::router::{init_pages_router, init_public_router};
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    // route_layer runs the last-added layer first: require_auth, then the gate.
    let pages = init_pages_router()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            redirect_based_on_role,
        ))
        .route_layer(middleware::from_fn(require_auth));

    // Guests see the welcome page; signed-in callers are still kept in their area.
    let public = init_public_router().route_layer(middleware::from_fn_with_state(
        state.clone(),
        redirect_based_on_role,
    ));

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public)
        .merge(init_auth_router())
        .merge(pages);

    if let Some(handle) = state.metrics.clone() {
        router = router.merge(metrics_router(handle));
    }

    router
        .layer(middleware::from_fn_with_state(state.clone(), auth_context))
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
