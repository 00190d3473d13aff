use flashdash_server::{AppState, Config, api, sync};
use tokio_util::sync::CancellationToken;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flashdash_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting flashdash-server (env: {})", config.environment);

    let state = AppState::new(&config).await?;

    // Background CRM sync
    let shutdown = CancellationToken::new();
    let sync_handle = tokio::spawn(sync::run(state.clone(), shutdown.clone()));

    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("flashdash-server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    shutdown.cancel();
    let _ = sync_handle.await;

    Ok(())
}
