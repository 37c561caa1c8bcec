use clap::Parser;
use profile_resolver::core::export::write_report;
use profile_resolver::utils::error::{ErrorSeverity, ResolverError};
use profile_resolver::utils::{logger, validation::Validate};
use profile_resolver::{
    build_resolver, BatchRequest, CliConfig, CreditLedger, InMemoryReportStore, LocalStorage,
    ResolutionEngine,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting profile-resolver CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Resolution failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: &CliConfig) -> Result<(), ResolverError> {
    config.validate()?;
    let resolver_config = config.resolver_config()?;
    let emails = config.collect_emails()?;

    let ledger = Arc::new(CreditLedger::new(resolver_config.paid_api.initial_credits));
    let resolver = build_resolver(&resolver_config, ledger)?;
    let engine = ResolutionEngine::new(resolver, InMemoryReportStore::new());

    let request = BatchRequest::new(
        emails,
        resolver_config.paid_api.api_key().map(str::to_string),
    );
    if request.api_key().is_none() {
        tracing::info!("🔑 No API key configured, Layer 3 disabled");
    }

    let report = engine.check_emails(&request).await;

    if let Some(output_path) = &config.output_path {
        let storage = LocalStorage::new(output_path.clone());
        let written = write_report(&storage, &report, &config.formats).await?;
        for file in written {
            tracing::info!("📁 Report saved to: {}/{}", output_path, file);
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
