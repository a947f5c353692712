use clap::Parser;
use tawaf_export::domain::ports::ConfigProvider;
use tawaf_export::utils::{logger, validation::Validate};
use tawaf_export::{CliConfig, ExportEngine, LocalStorage};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.json_logs);

    tracing::info!("Starting tawaf-export");
    tracing::debug!("CLI config: {:?}", cli);

    // 載入並驗證配置
    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = match ExportEngine::from_config(&config, storage) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("Error in main execution: {}", e);
            return;
        }
    };

    // 階段失敗只記錄錯誤，行程仍以 0 結束
    match engine.run().await {
        Ok(summary) => {
            tracing::info!(
                "📁 {} files written under {} (started {}, took {:?})",
                summary.files_written(),
                config.output_path(),
                summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
                summary.elapsed
            );
            tracing::info!("Data processing completed successfully.");
        }
        Err(e) => {
            tracing::error!("Error in main execution: {}", e);
            tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        }
    }
}
