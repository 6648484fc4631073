pub mod api;
pub mod config;
pub mod infrastructure;
pub mod services;

use crate::config::AppConfig;
use crate::services::relay::RelayService;
use crate::services::store::ObjectStore;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::objects::put_object,
        api::handlers::objects::get_object,
        api::handlers::objects::delete_object,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::objects::MessageResponse,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "objects", description = "Object relay endpoints"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayService>,
    pub storage: Arc<dyn ObjectStore>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/putObject", post(api::handlers::objects::put_object))
        .route("/getObject", get(api::handlers::objects::get_object))
        .route("/deleteObject", delete(api::handlers::objects::delete_object))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(
            state.config.max_upload_size,
        ))
        .with_state(state)
}
