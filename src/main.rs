use card_trader_api::database::manager::DatabaseManager;
use card_trader_api::{app, config};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up OAUTH_SIGN_KEY, DATABASE_IP, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    if config.jwt_secret.is_empty() {
        tracing::error!("Please define OAuth signing key (OAUTH_SIGN_KEY)!");
        std::process::exit(1);
    }
    if config.token_provider_url.is_empty() {
        tracing::error!("Please provide token provider URL (OAUTH_TOKEN_PROVIDER)!");
        std::process::exit(1);
    }

    // Open the store and apply the schema before accepting traffic
    if let Err(e) = DatabaseManager::pool().await {
        tracing::error!("failed to open record store: {}", e);
        std::process::exit(1);
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("card-trader-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
