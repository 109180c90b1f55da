use std::sync::Arc;

use r402::networks::USDC;
use r402::proto::v2;
use r402_evm::chain::ChecksummedAddress;
use r402_evm::{KnownNetworkEip155, V2Eip155Exact};
use r402_http::server::facilitator_client::FacilitatorClient;
use r402_http::server::{StaticPriceTags, X402LayerBuilder, X402Middleware};

use crate::config::{MissingConfig, WeatherConfig};

/// x402 layer guarding `/weather`, backed by a remote facilitator.
pub type WeatherPaywall = X402LayerBuilder<StaticPriceTags<v2::PriceTag>, Arc<FacilitatorClient>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub missing: MissingConfig,
    /// `None` while the recipient address or facilitator is missing.
    pub paywall: Option<WeatherPaywall>,
}

impl AppState {
    /// Build the state from configuration.
    ///
    /// An unparsable recipient address or facilitator URL is reported as missing.
    pub fn from_config(config: &WeatherConfig) -> Self {
        let pay_to = config.pay_to().and_then(|address| {
            address
                .parse::<ChecksummedAddress>()
                .inspect_err(|err| tracing::error!("Ignoring EVM_ADDRESS: {err}"))
                .ok()
        });

        let x402 = config.facilitator().and_then(|url| {
            X402Middleware::try_new(url)
                .inspect_err(|err| tracing::error!("Ignoring FACILITATOR_URL: {err}"))
                .ok()
        });

        let missing = MissingConfig {
            evm_address: pay_to.is_none(),
            facilitator_url: x402.is_none(),
        };

        let paywall = match (pay_to, x402) {
            (Some(pay_to), Some(x402)) => Some(
                x402.with_price_tag(weather_price_tag(pay_to, config.price_atomic))
                    .with_description("Weather data".to_string()),
            ),
            _ => None,
        };

        Self { missing, paywall }
    }
}

/// The single accepted way to pay for `/weather`: an exact USDC amount on Base Sepolia.
pub fn weather_price_tag(pay_to: ChecksummedAddress, price_atomic: u64) -> v2::PriceTag {
    V2Eip155Exact::price_tag(pay_to, USDC::base_sepolia().amount(price_atomic))
}
