use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_cost_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use care_cost::config::AppConfig;
use care_cost::error::AppError;
use care_cost::telemetry;
use care_cost::workflows::cost_planner::{CostCalculator, CostRouterState};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let cost_state = Arc::new(CostRouterState::new(
        CostCalculator::standard().clone(),
        config.pricing.regional_multiplier,
    ));

    let app = with_cost_routes(cost_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        regional_multiplier = config.pricing.regional_multiplier,
        "care cost planner ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
