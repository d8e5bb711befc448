use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use kinship::config::{ConfigLoader, KinshipConfig};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};

use kinship_server::cli::CliArgs;
use kinship_server::config::ServerConfig;
use kinship_server::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let mut server_config = ServerConfig::from_cli_and_env(cli_args.clone())?;

    let (kinship_config, load_error) = match load_kinship_config(&server_config) {
        Ok(config) => (config, None),
        Err(e) => (KinshipConfig::default(), Some(e)),
    };

    let directive = cli_args
        .log_level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok());
    kinship::logging::init(&kinship_config.logging, directive.as_deref())?;

    info!("Starting Kinship server v{}", kinship::VERSION);
    if let Some(e) = load_error {
        warn!("Failed to load configuration: {}. Using defaults.", e);
    }
    if server_config.ensure_jwt_secret() {
        warn!("No JWT secret configured; generated a random one. Issued tokens will not survive a restart.");
    }

    let manager = kinship::init(kinship_config).await?;
    info!("Kinship manager initialized");

    let app_state = Arc::new(AppState::new(manager, server_config.clone()));

    let app = create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(RequestBodyLimitLayer::new(server_config.max_request_size)),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("API documentation available at http://{}/docs", addr);
    if server_config.allow_signup {
        info!("User signup is enabled");
    } else {
        info!("User signup is disabled");
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Defaults, then the configured or default config file, then environment
fn load_kinship_config(server_config: &ServerConfig) -> kinship::config::Result<KinshipConfig> {
    let mut loader = ConfigLoader::new();

    match &server_config.config_file {
        Some(path) => {
            loader.load_file(path)?;
        }
        None => {
            loader.load_default_files();
        }
    }

    loader.load_env().extract()
}
