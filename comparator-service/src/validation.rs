use serde::Deserialize;

use energy_core::domain::MeterReadings;

/// Shape rule for smart meter identifiers: a fixed number of segments
/// joined by a single-character separator. Segments may be empty; they only
/// must not contain the separator themselves.
///
/// The default is exactly three segments and two hyphens
/// (e.g. `smart-meter-0`), but the rule is configuration, not a
/// hard-coded constant.
#[derive(Debug, Clone, Deserialize)]
pub struct MeterIdFormat {
    #[serde(default = "default_separator")]
    pub separator: char,
    #[serde(default = "default_segments")]
    pub segments: usize,
}

fn default_separator() -> char {
    '-'
}

fn default_segments() -> usize {
    3
}

impl Default for MeterIdFormat {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            segments: default_segments(),
        }
    }
}

impl MeterIdFormat {
    pub fn matches(&self, smart_meter_id: &str) -> bool {
        smart_meter_id.split(self.separator).count() == self.segments
    }

    /// Human-readable shape, e.g. `xxx-xxx-xxx`, for error messages.
    pub fn describe(&self) -> String {
        let mut shape = String::new();
        for i in 0..self.segments {
            if i > 0 {
                shape.push(self.separator);
            }
            shape.push_str("xxx");
        }
        shape
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("smart meter id is empty")]
    EmptyMeterId,
    #[error("no electricity readings were submitted for meter `{0}`")]
    EmptyReadings(String),
    #[error("smart meter id `{id}` does not match the `{expected}` format")]
    MalformedMeterId { id: String, expected: String },
}

/// All-or-nothing batch validation. A batch that fails any rule must leave
/// the store untouched; value and timestamp well-formedness is already
/// guaranteed by typed deserialization at the boundary.
pub fn validate_meter_readings(
    batch: &MeterReadings,
    format: &MeterIdFormat,
) -> Result<(), ValidationError> {
    if batch.smart_meter_id.is_empty() {
        return Err(ValidationError::EmptyMeterId);
    }
    if batch.electricity_readings.is_empty() {
        return Err(ValidationError::EmptyReadings(batch.smart_meter_id.clone()));
    }
    if !format.matches(&batch.smart_meter_id) {
        return Err(ValidationError::MalformedMeterId {
            id: batch.smart_meter_id.clone(),
            expected: format.describe(),
        });
    }
    Ok(())
}
