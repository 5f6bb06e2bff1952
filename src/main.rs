use clap::Parser;
use mailchimp_sync::config::LogFormat;
use mailchimp_sync::utils::logger;
use mailchimp_sync::{CliConfig, Result, SyncEngine, SyncPipeline};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting mailchimp-sync");

    if let Err(e) = run(config).await {
        tracing::error!("❌ Sync failed: {} (Kind: {})", e, e.kind());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

async fn run(config: CliConfig) -> Result<()> {
    let settings = config.resolve()?;
    tracing::debug!("Resolved settings: {:?}", settings);

    let client = settings.mailchimp_client()?;
    let source = settings.record_source();
    let dry_run = settings.dry_run;

    let pipeline = SyncPipeline::new(source, client, settings);
    let engine = SyncEngine::new(pipeline).with_dry_run(dry_run);

    // 每個訂閱者的錯誤只會列在報告裡，不影響結束碼
    engine.run(std::io::stdout()).await?;
    Ok(())
}
