pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use crate::config::AppConfig;
use crate::services::generator::ModelGenerator;
use crate::services::storage::LocalImageStore;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::welcome,
        handlers::generation::generate_model,
    ),
    components(
        schemas(
            handlers::health::WelcomeResponse,
            handlers::generation::GenerateModelResponse,
            models::MeasurementSet,
        )
    ),
    tags(
        (name = "system", description = "Service information endpoints"),
        (name = "models", description = "3D body-model generation endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<LocalImageStore>,
    pub generator: Arc<dyn ModelGenerator>,
}

pub fn create_app(state: AppState) -> Router {
    // Origins that fail header-value parsing are skipped.
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(handlers::health::welcome))
        .route("/generate-model/", post(handlers::generation::generate_model))
        .nest_service("/generated_models", ServeDir::new(&state.config.models_dir))
        .layer(cors)
        .layer(DefaultBodyLimit::max(state.config.max_upload_size))
        .with_state(state)
}
