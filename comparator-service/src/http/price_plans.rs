use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use energy_core::pricing::CostSummary;

use super::{ApiError, AppState};

/// Wire shape of the compare-all response: the per-plan costs are keyed by
/// plan id, the ordering concern stays with the recommend endpoint.
#[derive(Debug, Serialize)]
pub struct CompareAllResponse {
    pub price_plan_id: Option<String>,
    pub price_plan_comparisons: BTreeMap<String, Decimal>,
}

impl From<CostSummary> for CompareAllResponse {
    fn from(summary: CostSummary) -> Self {
        Self {
            price_plan_id: summary.price_plan_id,
            price_plan_comparisons: summary.price_plan_comparisons.into_iter().collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub limit: Option<usize>,
}

pub async fn compare_all(
    State(state): State<AppState>,
    Path(smart_meter_id): Path<String>,
) -> Result<Json<CompareAllResponse>, ApiError> {
    let summary = state.pricing.cost_summary(&smart_meter_id)?;
    metrics::counter!("plan_comparisons_total").increment(1);
    Ok(Json(summary.into()))
}

pub async fn recommend(
    State(state): State<AppState>,
    Path(smart_meter_id): Path<String>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<Vec<(String, Decimal)>>, ApiError> {
    let ranked = state.pricing.recommend(&smart_meter_id, params.limit)?;
    metrics::counter!("plan_recommendations_total").increment(1);
    Ok(Json(ranked))
}
