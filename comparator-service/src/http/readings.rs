use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use energy_core::domain::{ElectricityReading, MeterReadings};

use crate::validation;

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct StoredResponse {
    pub message: &'static str,
}

pub async fn store_readings(
    State(state): State<AppState>,
    Json(batch): Json<MeterReadings>,
) -> Result<Json<StoredResponse>, ApiError> {
    if let Err(e) = validation::validate_meter_readings(&batch, &state.meter_id_format) {
        metrics::counter!("readings_rejected_total").increment(1);
        tracing::warn!(error = %e, "rejected meter readings batch");
        return Err(ApiError::Validation(e.to_string()));
    }

    let MeterReadings {
        smart_meter_id,
        electricity_readings,
    } = batch;
    let count = electricity_readings.len();

    state
        .store
        .store(&smart_meter_id, electricity_readings)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    metrics::counter!("readings_stored_total").increment(count as u64);
    tracing::info!(%smart_meter_id, count, "stored meter readings");

    Ok(Json(StoredResponse {
        message: "Readings stored successfully.",
    }))
}

pub async fn read_readings(
    State(state): State<AppState>,
    Path(smart_meter_id): Path<String>,
) -> Result<Json<Vec<ElectricityReading>>, ApiError> {
    let history = state
        .store
        .readings(&smart_meter_id)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    match history {
        Some(readings) => Ok(Json(readings)),
        None => Err(ApiError::NotFound(format!(
            "no readings were found for meter `{smart_meter_id}`"
        ))),
    }
}
