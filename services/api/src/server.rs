use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_voucher_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use voucher_desk::config::AppConfig;
use voucher_desk::error::AppError;
use voucher_desk::telemetry;
use voucher_desk::vouchers::{CsvReportExporter, VoucherDesk};

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    // One store for the lifetime of the process; it is dropped on shutdown.
    let desk = Arc::new(VoucherDesk::new(CsvReportExporter));

    let app = with_voucher_routes(desk)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "voucher desk ready");

    axum::serve(listener, app).await?;
    Ok(())
}
