use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use email_verifier_api::config::load_config;
use email_verifier_api::core::error::AppError;
use email_verifier_api::features::status::handle_status;
use email_verifier_api::features::verification::{
    MxLookup, MxResolver, VerificationService, handle_verify,
};
use email_verifier_api::server::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_tracing();

    let config = load_config()?;
    let mx_source: Arc<dyn MxLookup> = Arc::new(MxResolver::new(&config));
    let service = Arc::new(VerificationService::new(mx_source));
    let app_state = AppState::new(service);

    let app = Router::new()
        .route("/", get(handle_status))
        .route("/verify", post(handle_verify))
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "starting server");
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::internal(format!("failed to bind: {err}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|err| AppError::internal(format!("server error: {err}")))?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with_target(false)
        .init();
}
