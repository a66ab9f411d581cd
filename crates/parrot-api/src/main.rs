use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parrot_api::{app::build_router, config::Config, state::AppState};
use parrot_bot::{CannedReplyGenerator, ReplyGenerator};
use parrot_persist::{PersistClientBuilder, PersistenceClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();
    
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    
    init_logging(&config);
    
    tracing::info!("Starting Parrot API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);
    
    tracing::info!("Opening database");
    let persist_client = PersistClientBuilder::new()
        .database_url(&config.database_url)
        .max_connections(config.database.pool_size)
        .acquire_timeout(Duration::from_millis(config.database.timeout_ms))
        .build()
        .await?;
    let persist_client: Arc<dyn PersistenceClient> = Arc::new(persist_client);
    
    tracing::info!("Database ready");
    
    if let Some(name) = config.seed.user_name.as_deref().filter(|n| !n.trim().is_empty()) {
        let user = persist_client.find_or_create_user(name).await?;
        tracing::info!(user_id = user.id, "Seed user available");
    }
    
    let replies: Arc<dyn ReplyGenerator> = Arc::new(CannedReplyGenerator::new());
    
    let state = Arc::new(AppState::new(config.clone(), persist_client, replies));
    
    let app = build_router(state);
    
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    
    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("API docs: http://{}/api/docs", addr);
    
    axum::serve(listener, app).await?;
    
    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    
    let registry = tracing_subscriber::registry().with(env_filter);
    
    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
