use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::analysis::{analyze_day, distribute, health, home, learn_coefficient};
use crate::services::EnergyService;

pub fn create_router(service: EnergyService) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/api/v1/analyze-day", post(analyze_day))
        .route("/api/v1/coefficient", post(learn_coefficient))
        .route("/api/v1/distribute", post(distribute))
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
