use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

mod rpc;

use rpc::McpClient;

#[derive(Parser)]
#[command(name = "autopay", about = "Operator CLI for the x402 auto-pay tool server")]
struct Cli {
    /// Auto-pay server URL
    #[arg(long, env = "AUTOPAY_URL", default_value = "http://localhost:8787")]
    autopay_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Charge a payment through the configured provider and record it
    Pay {
        /// Amount in minor units (cents)
        #[arg(long)]
        amount: i64,

        /// ISO 4217 currency code
        #[arg(long, default_value = "USD")]
        currency: String,

        #[arg(long)]
        description: String,

        /// Provider-side customer reference
        #[arg(long)]
        customer: Option<String>,
    },

    /// List recorded payments, newest first
    ListPayments,

    /// Show one recorded payment
    GetPayment {
        /// Payment id (UUID)
        id: String,
    },

    /// Check the x402 resource server's health endpoint
    Health,

    /// Fetch the paywalled weather resource
    Weather,

    /// Open the payment dashboard
    Dashboard {
        #[arg(long)]
        session: Option<String>,
    },

    /// List the tools the server exposes
    Tools,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let client = McpClient::new(&cli.autopay_url);

    let result = match cli.command {
        Commands::Pay {
            amount,
            currency,
            description,
            customer,
        } => {
            let mut arguments = json!({
                "amountCents": amount,
                "currency": currency,
                "description": description,
            });
            if let Some(customer) = customer {
                arguments["customerId"] = Value::String(customer);
            }
            client.call_tool("auto_pay", arguments).await
        }
        Commands::ListPayments => client.call_tool("list_payments", json!({})).await,
        Commands::GetPayment { id } => {
            client
                .call_tool("get_payment", json!({ "paymentId": id }))
                .await
        }
        Commands::Health => client.call_tool("x402_get_health", json!({})).await,
        Commands::Weather => client.call_tool("x402_get_weather", json!({})).await,
        Commands::Dashboard { session } => {
            let arguments = match session {
                Some(session) => json!({ "sessionId": session }),
                None => json!({}),
            };
            client.call_tool("open_x402_dashboard", arguments).await
        }
        Commands::Tools => client.list_tools().await,
    };

    match result {
        Ok(result) => {
            let shown = result.get("structuredContent").unwrap_or(&result);
            println!("{}", serde_json::to_string_pretty(shown)?);
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }

    Ok(())
}
