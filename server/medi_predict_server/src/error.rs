use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medi_predict::{FeatureError, FitError, PredictError};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Every way a prediction request can fail. All of them answer 400.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Body(#[from] JsonRejection),
    #[error(transparent)]
    Predict(#[from] PredictError),
}

impl From<FeatureError> for ApiError {
    fn from(err: FeatureError) -> Self {
        ApiError::Predict(err.into())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Body(rejection) => rejection.body_text(),
            ApiError::Predict(err) => err.to_string(),
        };
        log::warn!("rejecting request: {message}");
        (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
    }
}

/// Failures that keep the process from ever serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("model fitting failed: {0}")]
    Fit(#[from] FitError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
