use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named tariff. The unit rate converts an average usage rate (kWh per
/// hour) into an estimated cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePlan {
    pub plan_id: String,
    pub unit_rate: Decimal,
}
