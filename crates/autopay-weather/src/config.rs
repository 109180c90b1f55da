use clap::Parser;
use serde::Serialize;

pub const DEFAULT_PORT: u16 = 4021;
pub const DEFAULT_PRICE_ATOMIC: u64 = 1000;

/// Resource server settings, read from flags or the environment.
///
/// The recipient address and facilitator URL are optional: without them the
/// server still starts and reports what is missing instead of serving paid content.
#[derive(Debug, Clone, Parser)]
#[command(name = "weather-server", about = "x402 paywalled weather endpoint")]
pub struct WeatherConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// EVM address that receives payments
    #[arg(long, env = "EVM_ADDRESS")]
    pub evm_address: Option<String>,

    /// Base URL of the x402 facilitator
    #[arg(long, env = "FACILITATOR_URL")]
    pub facilitator_url: Option<String>,

    /// Price per request in USDC base units on Base Sepolia (1000 = $0.001)
    #[arg(long, env = "X402_PRICE_ATOMIC", default_value_t = DEFAULT_PRICE_ATOMIC)]
    pub price_atomic: u64,
}

/// Which required paywall settings are absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingConfig {
    pub evm_address: bool,
    pub facilitator_url: bool,
}

impl MissingConfig {
    pub fn any(self) -> bool {
        self.evm_address || self.facilitator_url
    }
}

impl WeatherConfig {
    /// Recipient address, treating blank values as unset.
    pub fn pay_to(&self) -> Option<&str> {
        non_blank(self.evm_address.as_deref())
    }

    pub fn facilitator(&self) -> Option<&str> {
        non_blank(self.facilitator_url.as_deref())
    }

    pub fn missing(&self) -> MissingConfig {
        MissingConfig {
            evm_address: self.pay_to().is_none(),
            facilitator_url: self.facilitator().is_none(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
