use std::sync::Arc;

use anyhow::Result;
use comparator_service::{
    config::AppConfig,
    http::{self, AppState},
    metrics_server, observability, seed,
};
use energy_core::{accounts::InMemoryAccounts, pricing::PricePlanService, store::ReadingsStore};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = AppConfig::load()?;

    // Start metrics server if configured
    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr);
    }

    let store = Arc::new(ReadingsStore::new());

    if let Some(seed_file) = &cfg.seed_file {
        let count = seed::load_seed_readings(seed_file, &cfg.meter_id, &store)?;
        tracing::info!(count, file = %seed_file.display(), "seeded historical readings");
    }

    let accounts = Arc::new(InMemoryAccounts::new(
        cfg.accounts
            .iter()
            .map(|a| (a.smart_meter_id.clone(), a.price_plan_id.clone())),
    ));
    let pricing = Arc::new(PricePlanService::new(
        cfg.price_plans.clone(),
        store.clone(),
        accounts,
    ));

    let state = AppState {
        store,
        pricing,
        meter_id_format: cfg.meter_id.clone(),
    };
    let app = http::router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind_addr).await?;
    tracing::info!(addr = %cfg.server.bind_addr, "comparator service listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
