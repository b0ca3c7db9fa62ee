use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use medi_predict::{extract_features, Domain, FitReport, ModelSet, Predictor};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tower_http::cors::{Any, CorsLayer};

use crate::error::ApiError;

pub type SharedModels = Arc<ModelSet>;

#[derive(Debug, Serialize)]
pub struct DiabetesResponse {
    pub is_diabetic: bool,
}

#[derive(Debug, Serialize)]
pub struct HeartResponse {
    pub has_disease: bool,
}

#[derive(Debug, Serialize)]
pub struct ModelInfoDto {
    pub domain: Domain,
    pub route: &'static str,
    pub result_key: &'static str,
    pub features: Vec<String>,
    #[serde(flatten)]
    pub report: FitReport,
}

/// Build the service around an already-fitted, shared model set.
pub fn app(models: SharedModels) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/models", get(list_models))
        .route(Domain::Diabetes.route(), post(predict_diabetes))
        .route(Domain::Heart.route(), post(predict_heart))
        .layer(cors)
        .with_state(models)
}

async fn health() -> &'static str {
    "ok"
}

async fn list_models(State(models): State<SharedModels>) -> Json<Vec<ModelInfoDto>> {
    let infos = models
        .iter()
        .map(|model| {
            let domain = model.domain();
            ModelInfoDto {
                domain,
                route: domain.route(),
                result_key: domain.result_key(),
                features: model.schema().feature_names.clone(),
                report: model.report().clone(),
            }
        })
        .collect();
    Json(infos)
}

async fn predict_diabetes(
    State(models): State<SharedModels>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<DiabetesResponse>, ApiError> {
    let is_diabetic = run_prediction(&models.diabetes, payload)?;
    Ok(Json(DiabetesResponse { is_diabetic }))
}

async fn predict_heart(
    State(models): State<SharedModels>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<HeartResponse>, ApiError> {
    let has_disease = run_prediction(&models.heart, payload)?;
    Ok(Json(HeartResponse { has_disease }))
}

fn run_prediction(
    model: &dyn Predictor,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Result<bool, ApiError> {
    let Json(body) = payload?;
    log::debug!("received {} request: {body}", model.domain());
    let features = extract_features(&body)?;
    let result = model.predict(&features)?;
    log::debug!("{} prediction: {result}", model.domain());
    Ok(result)
}
