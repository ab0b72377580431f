use std::sync::Arc;

use session_service::config::Config;
use session_service::inbound::http::router::create_router;
use session_service::outbound::directory::Account;
use session_service::outbound::InMemoryDirectory;
use session_service::session::service::SessionService;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "session_service=debug,session_auth=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "session-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    config.validate()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_secrets = config.jwt.secrets.len(),
        jwt_expires_seconds = config.jwt.expires_seconds,
        principal_type = %config.session.principal_type,
        namespace = %config.directory.namespace,
        accounts = config.directory.accounts.len(),
        "Configuration loaded"
    );

    let authenticator = Arc::new(config.authenticator()?);
    let directory = Arc::new(InMemoryDirectory::new(
        config.directory.namespace.clone(),
        config.directory.accounts.iter().cloned().map(Account::from),
    ));

    let session_service = Arc::new(SessionService::new(
        Arc::clone(&directory),
        Arc::clone(&directory),
        Arc::clone(&directory),
        Arc::clone(&authenticator),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        session_service,
        authenticator,
        config.session.principal_type.clone(),
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
