use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::ElectricityReading;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("readings store lock poisoned")]
    Poisoned,
}

/// In-memory map from smart meter id to its accumulated reading history.
///
/// A single coarse lock guards the whole map: concurrent submissions to the
/// same meter are serialized, and readers never observe a partially
/// appended batch.
#[derive(Debug, Default)]
pub struct ReadingsStore {
    histories: RwLock<HashMap<String, Vec<ElectricityReading>>>,
}

impl ReadingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch to a meter's history, creating the history from the
    /// submitted readings if the meter has not been seen before.
    pub fn store(
        &self,
        smart_meter_id: &str,
        mut readings: Vec<ElectricityReading>,
    ) -> Result<(), StoreError> {
        let mut histories = self.histories.write().map_err(|_| StoreError::Poisoned)?;
        match histories.get_mut(smart_meter_id) {
            Some(history) => history.append(&mut readings),
            None => {
                histories.insert(smart_meter_id.to_string(), readings);
            }
        }
        Ok(())
    }

    /// Full reading history for a meter, or `None` if nothing was ever
    /// submitted for it.
    pub fn readings(
        &self,
        smart_meter_id: &str,
    ) -> Result<Option<Vec<ElectricityReading>>, StoreError> {
        let histories = self.histories.read().map_err(|_| StoreError::Poisoned)?;
        Ok(histories.get(smart_meter_id).cloned())
    }
}
