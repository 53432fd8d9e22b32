use crate::cli::ServeArgs;
use crate::infra::{AppState, SiteState};
use crate::routes::site_router;
use axum::extract::DefaultBodyLimit;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mars_mission::config::AppConfig;
use mars_mission::error::AppError;
use mars_mission::selection::SmtpMailer;
use mars_mission::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
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

    let mailer = Arc::new(SmtpMailer::new(&config.mail)?);
    let site = SiteState::from_config(&config, mailer);
    std::fs::create_dir_all(&config.storage.gallery_dir)?;

    let app = site_router(site, &config.storage.static_dir)
        .layer(DefaultBodyLimit::max(config.storage.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        roster = %config.storage.roster_path.display(),
        gallery = %config.storage.gallery_dir.display(),
        mail = ?config.mail,
        "mars mission site ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
