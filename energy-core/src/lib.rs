pub mod accounts;
pub mod domain;
pub mod pricing;
pub mod store;

pub use domain::{ElectricityReading, MeterReadings, PricePlan};
pub use pricing::{CostSummary, PricePlanService, PricingError};
pub use store::ReadingsStore;
