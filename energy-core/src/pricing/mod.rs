use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::accounts::PlanAccounts;
use crate::domain::{ElectricityReading, PricePlan};
use crate::store::{ReadingsStore, StoreError};

#[derive(thiserror::Error, Debug)]
pub enum PricingError {
    #[error("no readings were found for meter `{0}`")]
    NoReadings(String),
    #[error("readings for meter `{0}` span zero elapsed time; usage rate is undefined")]
    ZeroElapsed(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A meter's assigned plan bundled with the cost of every plan in the
/// catalog. `price_plan_id` is `None` when the meter has readings but no
/// account association.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSummary {
    pub price_plan_id: Option<String>,
    pub price_plan_comparisons: Vec<(String, Decimal)>,
}

/// Estimates, for one meter, what its observed usage would cost under each
/// plan in the fixed catalog.
pub struct PricePlanService {
    plans: Vec<PricePlan>,
    store: Arc<ReadingsStore>,
    accounts: Arc<dyn PlanAccounts>,
}

impl PricePlanService {
    pub fn new(
        plans: Vec<PricePlan>,
        store: Arc<ReadingsStore>,
        accounts: Arc<dyn PlanAccounts>,
    ) -> Self {
        Self {
            plans,
            store,
            accounts,
        }
    }

    pub fn plans(&self) -> &[PricePlan] {
        &self.plans
    }

    /// Estimated cost under every catalog plan, in catalog order. One entry
    /// per plan, never partial.
    pub fn costs_for_each_plan(
        &self,
        smart_meter_id: &str,
    ) -> Result<Vec<(String, Decimal)>, PricingError> {
        let readings = self
            .store
            .readings(smart_meter_id)?
            .filter(|history| !history.is_empty())
            .ok_or_else(|| PricingError::NoReadings(smart_meter_id.to_string()))?;

        let rate = average_usage_rate(smart_meter_id, &readings)?;
        Ok(self
            .plans
            .iter()
            .map(|plan| (plan.plan_id.clone(), rate * plan.unit_rate))
            .collect())
    }

    /// Catalog plans ranked ascending by estimated cost, ties broken by
    /// plan id so the ranking is deterministic. A `limit` smaller than the
    /// catalog truncates the list; `None` returns all plans.
    pub fn recommend(
        &self,
        smart_meter_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<(String, Decimal)>, PricingError> {
        let mut ranked = self.costs_for_each_plan(smart_meter_id)?;
        ranked.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        Ok(ranked)
    }

    /// Per-plan costs together with the plan currently assigned to the
    /// meter's account.
    pub fn cost_summary(&self, smart_meter_id: &str) -> Result<CostSummary, PricingError> {
        let comparisons = self.costs_for_each_plan(smart_meter_id)?;
        Ok(CostSummary {
            price_plan_id: self.accounts.plan_id_for_meter(smart_meter_id),
            price_plan_comparisons: comparisons,
        })
    }
}

/// Average consumption per elapsed hour over the whole history.
///
/// Fails when the history spans zero elapsed time (all readings share one
/// timestamp, including the single-reading case) since the rate would be a
/// division by zero.
fn average_usage_rate(
    smart_meter_id: &str,
    readings: &[ElectricityReading],
) -> Result<Decimal, PricingError> {
    let average = average_reading(readings);
    let hours = elapsed_hours(readings);
    if hours.is_zero() {
        return Err(PricingError::ZeroElapsed(smart_meter_id.to_string()));
    }
    Ok(divide_half_up(average, hours))
}

fn average_reading(readings: &[ElectricityReading]) -> Decimal {
    let sum: Decimal = readings.iter().map(|r| r.reading).sum();
    divide_half_up(sum, Decimal::from(readings.len() as u64))
}

/// Hours between the earliest and latest reading, counted in whole seconds.
fn elapsed_hours(readings: &[ElectricityReading]) -> Decimal {
    let mut times = readings.iter().map(|r| r.time);
    let Some(first) = times.next() else {
        return Decimal::ZERO;
    };
    let (earliest, latest) = times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    let seconds = (latest - earliest).whole_seconds();
    Decimal::from(seconds) / Decimal::from(3600)
}

/// Quotient rounded half-up to the dividend's scale. Callers must rule out
/// a zero divisor first.
fn divide_half_up(dividend: Decimal, divisor: Decimal) -> Decimal {
    (dividend / divisor)
        .round_dp_with_strategy(dividend.scale(), RoundingStrategy::MidpointAwayFromZero)
}
