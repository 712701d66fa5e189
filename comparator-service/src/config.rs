use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::bail;
use rust_decimal::Decimal;
use serde::Deserialize;

use energy_core::domain::PricePlan;

use crate::validation::MeterIdFormat;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub bind_addr: String,
}

/// Static association between a meter's account and its current plan.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub smart_meter_id: String,
    pub price_plan_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub metrics: Option<MetricsConfig>,
    #[serde(default)]
    pub meter_id: MeterIdFormat,
    /// Ordered plan catalog; the order is preserved in comparison output.
    pub price_plans: Vec<PricePlan>,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
    /// Optional CSV of historical readings loaded before serving.
    pub seed_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path =
            env::var("COMPARATOR_CONFIG").unwrap_or_else(|_| "comparator-config.toml".to_string());
        let contents = fs::read_to_string(&path)?;
        let cfg: AppConfig = toml::from_str(&contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Startup sanity checks on the plan catalog.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.price_plans.is_empty() {
            bail!("price plan catalog is empty");
        }
        let mut seen = HashSet::new();
        for plan in &self.price_plans {
            if plan.unit_rate <= Decimal::ZERO {
                bail!("price plan `{}` has a non-positive unit rate", plan.plan_id);
            }
            if !seen.insert(plan.plan_id.as_str()) {
                bail!("price plan `{}` is declared twice", plan.plan_id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromStr;

    const SAMPLE: &str = r#"
        [server]
        bind_addr = "127.0.0.1:8080"

        [metrics]
        bind_addr = "127.0.0.1:9102"

        [meter_id]
        separator = "-"
        segments = 3

        [[price_plans]]
        plan_id = "price-plan-0"
        unit_rate = "10"

        [[price_plans]]
        plan_id = "price-plan-1"
        unit_rate = "0.25"

        [[accounts]]
        smart_meter_id = "smart-meter-0"
        price_plan_id = "price-plan-0"
    "#;

    #[test]
    fn parses_a_full_config() {
        let cfg: AppConfig = toml::from_str(SAMPLE).unwrap();
        cfg.validate().unwrap();

        assert_eq!(cfg.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.price_plans.len(), 2);
        assert_eq!(
            cfg.price_plans[1].unit_rate,
            Decimal::from_str("0.25").unwrap()
        );
        assert_eq!(cfg.accounts[0].price_plan_id, "price-plan-0");
        assert!(cfg.seed_file.is_none());
    }

    #[test]
    fn meter_id_format_defaults_to_three_hyphenated_segments() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            bind_addr = "127.0.0.1:8080"

            [[price_plans]]
            plan_id = "price-plan-0"
            unit_rate = "1"
        "#,
        )
        .unwrap();

        assert_eq!(cfg.meter_id.separator, '-');
        assert_eq!(cfg.meter_id.segments, 3);
        assert!(cfg.metrics.is_none());
    }

    #[test]
    fn rejects_a_non_positive_unit_rate() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            bind_addr = "127.0.0.1:8080"

            [[price_plans]]
            plan_id = "price-plan-0"
            unit_rate = "0"
        "#,
        )
        .unwrap();

        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_plan_ids() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            bind_addr = "127.0.0.1:8080"

            [[price_plans]]
            plan_id = "price-plan-0"
            unit_rate = "1"

            [[price_plans]]
            plan_id = "price-plan-0"
            unit_rate = "2"
        "#,
        )
        .unwrap();

        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_an_empty_catalog() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            bind_addr = "127.0.0.1:8080"
            price_plans = []
        "#,
        )
        .unwrap();

        assert!(cfg.validate().is_err());
    }
}
