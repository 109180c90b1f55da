use std::convert::Infallible;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_PORT: u16 = 8787;
pub const DEFAULT_X402_SERVER_BASE_URL: &str = "http://localhost:4021";
pub const DEFAULT_X402_SERVER_TIMEOUT_MS: u64 = 8000;

/// Tool server settings, read from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "autopay-server", about = "x402 auto-pay MCP tool server")]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on; unparsable values fall back to the default
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT, value_parser = lenient_port)]
    pub port: u16,

    /// Base URL of the x402 resource server called by the health/weather tools
    #[arg(long, env = "X402_SERVER_BASE_URL", default_value = DEFAULT_X402_SERVER_BASE_URL)]
    pub x402_server_base_url: String,

    /// Hard timeout for outbound calls, in milliseconds
    #[arg(
        long,
        env = "X402_SERVER_TIMEOUT_MS",
        default_value_t = DEFAULT_X402_SERVER_TIMEOUT_MS,
        value_parser = lenient_timeout_ms
    )]
    pub x402_server_timeout_ms: u64,

    /// Payment provider endpoint used by `auto_pay`
    #[arg(long, env = "PAYMENT_PROVIDER_URL")]
    pub payment_provider_url: Option<String>,

    /// Provider name recorded when the provider does not report one
    #[arg(long, env = "PAYMENT_PROVIDER_NAME", default_value = "http")]
    pub payment_provider_name: String,
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.x402_server_timeout_ms)
    }
}

#[allow(clippy::unnecessary_wraps)]
fn lenient_port(value: &str) -> Result<u16, Infallible> {
    Ok(value.trim().parse().unwrap_or(DEFAULT_PORT))
}

#[allow(clippy::unnecessary_wraps)]
fn lenient_timeout_ms(value: &str) -> Result<u64, Infallible> {
    Ok(value
        .trim()
        .parse()
        .ok()
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_X402_SERVER_TIMEOUT_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = ServerConfig::try_parse_from(["autopay-server"]).unwrap();
        assert_eq!(config.x402_server_base_url, DEFAULT_X402_SERVER_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_millis(8000));
        assert!(config.payment_provider_url.is_none());
    }

    #[test]
    fn garbage_numbers_fall_back() {
        let config = ServerConfig::try_parse_from([
            "autopay-server",
            "--port",
            "not-a-port",
            "--x402-server-timeout-ms",
            "soon",
        ])
        .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.x402_server_timeout_ms, DEFAULT_X402_SERVER_TIMEOUT_MS);
    }

    #[test]
    fn zero_timeout_falls_back() {
        let config =
            ServerConfig::try_parse_from(["autopay-server", "--x402-server-timeout-ms", "0"])
                .unwrap();
        assert_eq!(config.x402_server_timeout_ms, DEFAULT_X402_SERVER_TIMEOUT_MS);
    }

    #[test]
    fn explicit_values_win() {
        let config = ServerConfig::try_parse_from([
            "autopay-server",
            "--port",
            "9000",
            "--x402-server-timeout-ms",
            "250",
            "--payment-provider-url",
            "http://provider.local",
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.timeout(), Duration::from_millis(250));
        assert_eq!(
            config.payment_provider_url.as_deref(),
            Some("http://provider.local")
        );
    }
}
