use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::StringRecord;
use rust_decimal::Decimal;
use time::OffsetDateTime;

use energy_core::domain::ElectricityReading;
use energy_core::store::ReadingsStore;

use crate::validation::MeterIdFormat;

/// Historical readings loaded into the store before the service starts
/// taking requests.
///
/// Expected header columns (by name):
/// - smart_meter_id
/// - ts (RFC3339 timestamp)
/// - reading
pub fn load_seed_readings(
    path: &Path,
    format: &MeterIdFormat,
    store: &ReadingsStore,
) -> Result<usize> {
    let file =
        File::open(path).with_context(|| format!("failed to open seed file {}", path.display()))?;
    load_from_reader(file, format, store)
}

pub fn load_from_reader<R: Read>(
    reader: R,
    format: &MeterIdFormat,
    store: &ReadingsStore,
) -> Result<usize> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().context("failed to read seed CSV headers")?.clone();

    let mut total = 0usize;
    for result in rdr.records() {
        let record = result.context("failed to read seed CSV record")?;
        let (smart_meter_id, reading) = record_to_reading(&record, &headers)?;

        if !format.matches(&smart_meter_id) {
            bail!(
                "seed row {}: smart meter id `{smart_meter_id}` does not match the `{}` format",
                total + 1,
                format.describe()
            );
        }

        store
            .store(&smart_meter_id, vec![reading])
            .map_err(|e| anyhow::anyhow!("failed to store seed reading: {e}"))?;
        total += 1;
    }

    Ok(total)
}

fn record_to_reading(
    record: &StringRecord,
    headers: &StringRecord,
) -> Result<(String, ElectricityReading)> {
    let get = |name: &str| -> Result<&str> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| record.get(idx))
            .with_context(|| format!("missing column '{name}' in seed CSV record"))
    };

    let smart_meter_id = get("smart_meter_id")?.trim().to_string();

    let ts_str = get("ts")?;
    let time = OffsetDateTime::parse(ts_str.trim(), &time::format_description::well_known::Rfc3339)
        .with_context(|| format!("invalid ts '{ts_str}'"))?;

    let reading_str = get("reading")?;
    let reading: Decimal = reading_str
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid reading '{reading_str}': {e}"))?;

    Ok((smart_meter_id, ElectricityReading { time, reading }))
}
