use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use energy_core::pricing::{PricePlanService, PricingError};
use energy_core::store::ReadingsStore;

use crate::validation::MeterIdFormat;

pub mod price_plans;
pub mod readings;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReadingsStore>,
    pub pricing: Arc<PricePlanService>,
    pub meter_id_format: MeterIdFormat,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/readings/store", post(readings::store_readings))
        .route("/readings/read/:smart_meter_id", get(readings::read_readings))
        .route(
            "/price-plans/compare-all/:smart_meter_id",
            get(price_plans::compare_all),
        )
        .route(
            "/price-plans/recommend/:smart_meter_id",
            get(price_plans::recommend),
        )
        .with_state(state)
}

/// Typed outcomes of the core, translated to status codes at this boundary
/// and nowhere else.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Computation(String),
    #[error("{0}")]
    Internal(String),
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::NoReadings(_) => ApiError::NotFound(err.to_string()),
            PricingError::ZeroElapsed(_) => ApiError::Computation(err.to_string()),
            PricingError::Store(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Computation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
