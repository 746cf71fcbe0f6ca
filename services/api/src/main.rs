use tracing::info;

use collab_api::config::ApiConfig;
use collab_api::infra::password::{BcryptHasher, PASSWORD_HASH_COST};
use collab_api::infra::session::SessionSigner;
use collab_api::infra::store::Store;
use collab_api::router::build_router;
use collab_api::state::AppState;
use collab_core::config::Config as _;
use collab_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    let config = ApiConfig::from_env().expect("invalid configuration");
    init_tracing(config.log_format);

    let store = Store::connect(&config)
        .await
        .expect("failed to initialise store");
    let hasher = BcryptHasher::new(PASSWORD_HASH_COST).expect("failed to prepare password hasher");
    let sessions = SessionSigner::new(config.jwt_secret.as_deref());
    if let Err(e) = sessions.ensure_configured() {
        tracing::warn!(error = %e, "session signing unconfigured");
    }

    let state = AppState {
        store: store.clone(),
        hasher,
        sessions,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {http_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    if let Err(e) = store.close().await {
        tracing::warn!(error = ?e, "failed to close store");
    }
    info!("api service stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
