use campaign_dispatcher::environment::Environment;
use campaign_dispatcher::shutdown::Shutdown;
use campaign_dispatcher_worker::infra::settings::WorkerSettings;
use campaign_dispatcher_worker::routes::Routes;
use campaign_dispatcher_worker::state::AppState;
use std::env;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::log::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use wg::WaitGroup;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stdout());

    let rust_log = Environment::string("RUST_LOG", "INFO,campaign_dispatcher=INFO,tower_http=WARN");
    env::set_var("RUST_LOG", rust_log);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(Box::new(tracing_subscriber::fmt::layer().with_writer(non_blocking)))
        .init();

    info!("Starting...");

    let wait_group = WaitGroup::new();

    let settings = WorkerSettings::from_env();
    let cancellation = CancellationToken::new();
    let app_state = AppState::from_settings(&settings, cancellation.clone())?;

    info!(
        "Campaign limits: {} participants, {}-{}s between sends, {}s after failures",
        settings.dispatch.max_participants_per_campaign,
        settings.dispatch.min_delay_seconds,
        settings.dispatch.max_delay_seconds,
        settings.dispatch.failure_recovery_delay_seconds
    );

    tokio::spawn(init_http_server(settings, app_state, cancellation, wait_group.add(1)));

    wait_group.wait();

    info!("Stopped!");

    Ok(())
}

async fn init_http_server(
    settings: WorkerSettings,
    app_state: AppState,
    cancellation: CancellationToken,
    wait_group: WaitGroup,
) {
    info!("Starting http server...");
    let routes = Routes::routes(&app_state).await;

    let addr = settings.addr();

    match TcpListener::bind(addr).await {
        Ok(listener) => {
            info!("Running http server on {addr}...");
            let served = axum::serve(listener, routes)
                .with_graceful_shutdown(Shutdown::signal_with_token("Stopping http server...", cancellation))
                .await;

            if let Err(serve_error) = served {
                error!("Http server on {addr} failed: {serve_error}");
            }
        },
        Err(bind_error) => {
            error!("Failed to bind http server on {addr}: {bind_error}");
        },
    }

    wait_group.done();

    info!("Http server stopped!");
}
