use std::sync::Arc;

use autopay_core::traits::PaymentProvider;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use autopay_server::app_state::AppState;
use autopay_server::config::ServerConfig;
use autopay_server::downstream::X402ServerClient;
use autopay_server::provider::HttpPaymentProvider;
use autopay_store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::parse();

    let provider: Option<Arc<dyn PaymentProvider>> = match &config.payment_provider_url {
        Some(url) => {
            let provider =
                HttpPaymentProvider::new(url, config.payment_provider_name.clone(), config.timeout());
            tracing::info!("Payment provider at {}", provider.payments_url());
            Some(Arc::new(provider))
        }
        None => {
            tracing::warn!("PAYMENT_PROVIDER_URL is not set; auto_pay calls will fail");
            None
        }
    };

    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        provider,
        x402_server: Arc::new(X402ServerClient::new(
            config.x402_server_base_url.clone(),
            config.timeout(),
        )),
    };

    let app = autopay_server::router::create_router(state);

    let listener = match TcpListener::bind((config.host.as_str(), config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::warn!("Could not bind port {}: {err}; using an ephemeral port", config.port);
            TcpListener::bind((config.host.as_str(), 0)).await?
        }
    };

    tracing::info!(
        "x402 auto-pay app listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;
    Ok(())
}
