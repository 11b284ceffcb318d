//! Router assembly

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::health;
use super::routes::{self, cadastro, datasets, dimensoes};
use super::state::AppState;
use crate::config::CorsConfig;

/// Create the full application router.
///
/// CORS is restricted to the configured origins; origins that fail to
/// parse as header values are skipped with a warning.
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    let cors_layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(health::health_check))
        .route("/dimensoes/anos_original", get(dimensoes::anos_original))
        .route("/dimensoes/anos_projecoes", get(dimensoes::anos_projecoes))
        .route("/dimensoes/locais", get(dimensoes::locais))
        .route("/dimensoes/faixas", get(dimensoes::faixas))
        .route("/dimensoes/sexos", get(dimensoes::sexos))
        .route("/dimensoes/modelos", get(dimensoes::modelos))
        .route("/original", get(datasets::original))
        .route("/previsoes", get(datasets::previsoes))
        .route("/metricas", get(datasets::metricas))
        .route(
            "/sigerip/tabua-mortalidade",
            get(datasets::tabua_mortalidade),
        )
        .route("/nacoes_unidas", get(datasets::nacoes_unidas))
        .route("/cadastro", post(cadastro::cadastro))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
}
