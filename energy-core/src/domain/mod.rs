pub mod price_plan;
pub mod reading;

pub use price_plan::PricePlan;
pub use reading::{ElectricityReading, MeterReadings};
