use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A single consumption sample reported by a smart meter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectricityReading {
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub reading: Decimal,
}

/// A batch of readings submitted for one meter. Batches are accepted or
/// rejected as a whole; a rejected batch must not mutate the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterReadings {
    pub smart_meter_id: String,
    pub electricity_readings: Vec<ElectricityReading>,
}
