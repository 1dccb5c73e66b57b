use axum::{extract::State, http::StatusCode, response::Json};

use crate::error::Result;
use crate::models::{
    CoefficientRequest, CoefficientResponse, DayAnalysisRequest, DayAnalysisResponse,
    DistributionRequest, DistributionResponse,
};
use crate::services::EnergyService;

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Status banner for the service root.
pub async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "boiler energy estimator online" }))
}

pub async fn analyze_day(
    State(service): State<EnergyService>,
    Json(req): Json<DayAnalysisRequest>,
) -> Result<Json<DayAnalysisResponse>> {
    let response = service.analyze_day(req)?;
    Ok(Json(response))
}

pub async fn learn_coefficient(
    State(service): State<EnergyService>,
    Json(req): Json<CoefficientRequest>,
) -> Result<Json<CoefficientResponse>> {
    let response = service.learn_coefficient(req)?;
    Ok(Json(response))
}

pub async fn distribute(
    State(service): State<EnergyService>,
    Json(req): Json<DistributionRequest>,
) -> Result<Json<DistributionResponse>> {
    let response = service.distribute(req)?;
    Ok(Json(response))
}
