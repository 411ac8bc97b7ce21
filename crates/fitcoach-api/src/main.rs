use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fitcoach_api::{build_router, config::Config, state::AppState};
use fitcoach_auth::GoogleTokenVerifier;
use fitcoach_llm::GeminiClient;
use fitcoach_persist::PgPersistenceClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting FitCoach API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Connect to PostgreSQL and apply the schema
    tracing::info!("Connecting to PostgreSQL");
    let pg_client = PgPersistenceClient::connect(&config.database_url).await?;
    let persist: Arc<dyn fitcoach_persist::PersistenceClient> = Arc::new(pg_client);
    tracing::info!("PostgreSQL connected");

    // Google ID-token verification
    if config.google_client_id.is_empty() {
        tracing::warn!("GOOGLE_CLIENT_ID not set; Google logins will be rejected");
    }
    let google_verifier: Arc<dyn fitcoach_auth::IdTokenVerifier> =
        Arc::new(GoogleTokenVerifier::new(config.google_client_id.clone()));

    // Coaching model client
    let coach: Arc<dyn fitcoach_llm::CoachClient> = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.coach.model.clone(),
    )?);

    let state = Arc::new(AppState::new(
        config.clone(),
        persist,
        google_verifier,
        coach,
    ));

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

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
