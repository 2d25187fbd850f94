use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use warfarin_api::api::server;
use warfarin_api::api::types::{generate_token, ApiContext, AuthRegistry};
use warfarin_api::config;
use warfarin_api::store::TableStore;

#[derive(Parser)]
#[command(name = "warfarin-api")]
#[command(version = config::APP_VERSION)]
#[command(about = "Protected API serving siloed warfarin patient data tables")]
struct Cli {
    /// Directory containing the four source CSV datasets
    #[arg(long, default_value_os_t = config::default_data_dir())]
    data_dir: PathBuf,

    /// Bind address
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Bind port
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Bearer token accepted by the API (repeatable). Also read from the
    /// WARFARIN_API_TOKENS env var, comma-separated.
    #[arg(long = "api-token")]
    api_tokens: Vec<String>,
}

fn build_auth_registry(cli_tokens: &[String]) -> AuthRegistry {
    let mut auth = AuthRegistry::new();

    let env_tokens = std::env::var(config::API_TOKENS_ENV).unwrap_or_default();
    let configured = cli_tokens
        .iter()
        .map(String::as_str)
        .chain(env_tokens.split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    for (i, token) in configured.enumerate() {
        auth.register(token, format!("client-{}", i + 1));
    }

    if auth.is_empty() {
        let token = generate_token();
        tracing::warn!(
            "no API tokens configured; generated ephemeral token: {token}"
        );
        auth.register(&token, "ephemeral");
    }

    auth
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("{} v{} starting", config::APP_NAME, config::APP_VERSION);

    let auth = build_auth_registry(&cli.api_tokens);
    tracing::info!(tokens = auth.len(), "auth registry ready");

    let store = TableStore::load(&cli.data_dir)
        .with_context(|| format!("load datasets from {}", cli.data_dir.display()))?;

    // Build the merged view before accepting traffic so request handlers
    // only ever observe the completed join.
    let patients = store.view().len();
    tracing::info!(patients, "merged patient view ready");

    let ctx = ApiContext::new(store, auth);
    server::serve(ctx, SocketAddr::new(cli.host, cli.port)).await
}
