use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use autopay_weather::app_state::AppState;
use autopay_weather::config::WeatherConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = WeatherConfig::parse();
    let state = AppState::from_config(&config);

    if state.missing.any() {
        tracing::warn!(
            evm_address = state.missing.evm_address,
            facilitator_url = state.missing.facilitator_url,
            "x402 paywall disabled; /weather answers 503 until configured"
        );
    } else {
        tracing::info!(
            network = "eip155:84532",
            price = config.price_atomic,
            "x402 paywall enabled"
        );
    }

    let app = autopay_weather::router::create_router(state);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("Server listening at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
