use anyhow::Context;

use healthcare_portal::{
    api::ApiClient,
    auth::session::{SessionState, SessionStore},
    config::Config,
    router, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "healthcare_portal=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();

    let api = ApiClient::new(&config.api_base_url, config.request_timeout)
        .context("Failed to build backend client")?;
    tracing::info!(api_base_url = %config.api_base_url, "Backend client ready");

    let fresh = SessionState {
        identity: None,
        guard: config.login_policy().fresh_state(),
    };
    let session = SessionStore::open(config.session_file.clone(), fresh)
        .await
        .with_context(|| format!("Failed to open session file {}", config.session_file.display()))?;

    let addr = config.listen_addr();
    let app = router(AppState::new(config, api, session));

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
