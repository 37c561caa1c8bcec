use anyhow::Context;
use clap::Parser;
use profile_resolver::api::{build_router, AppState};
use profile_resolver::utils::{logger, validation::Validate};
use profile_resolver::{
    build_resolver, CreditLedger, InMemoryReportStore, ResolutionEngine, ResolverConfig,
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "server")]
#[command(about = "HTTP front end for profile resolution batches")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:3000")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_server_logger();

    let config = match &args.config {
        Some(path) => ResolverConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path))?,
        None => ResolverConfig::default(),
    };
    config.validate().context("invalid configuration")?;

    let ledger = Arc::new(CreditLedger::new(config.paid_api.initial_credits));
    let resolver = build_resolver(&config, ledger).context("failed to build resolver")?;
    let state = AppState::new(
        ResolutionEngine::new(resolver, InMemoryReportStore::new()),
        config.paid_api.api_key().map(str::to_string),
    );

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    tracing::info!("🚀 Server running on http://{}", args.bind);

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
