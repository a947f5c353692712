pub mod toml_config;

pub use toml_config::{ExportConfig, DEFAULT_BASE_URL};

#[cfg(feature = "cli")]
use crate::domain::model::StepGroupId;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "tawaf-export")]
#[command(about = "Export Tawaf steps, Doaa content and locations into JavaScript modules")]
pub struct CliConfig {
    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "API host, e.g. https://trasul.gph.gov.sa")]
    pub base_url: Option<String>,

    #[arg(long, help = "Directory the metadata/ and steps/ folders are written to")]
    pub output_path: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Step group ids to export")]
    pub group_ids: Vec<u32>,

    #[arg(long, help = "Download referenced audio files")]
    pub with_files: bool,

    #[arg(long, help = "Maximum Doaa requests in flight")]
    pub concurrent_requests: Option<usize>,

    #[arg(long, help = "Per-request timeout in seconds")]
    pub request_timeout: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併設定：預設值 < TOML 檔案 < 命令列參數
    pub fn resolve(&self) -> Result<ExportConfig> {
        let mut config = match &self.config {
            Some(path) => ExportConfig::from_file(path)?,
            None => ExportConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.source.base_url = base_url.clone();
        }
        if let Some(output_path) = &self.output_path {
            config.load.output_path = output_path.clone();
        }
        if !self.group_ids.is_empty() {
            config.source.group_ids = self.group_ids.iter().copied().map(StepGroupId).collect();
        }
        if self.with_files {
            config.load.with_files = true;
        }
        if let Some(concurrent) = self.concurrent_requests {
            config.source.concurrent_requests = concurrent;
        }
        if let Some(timeout) = self.request_timeout {
            config.source.request_timeout_seconds = Some(timeout);
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;

    #[test]
    fn test_no_arguments_resolve_to_defaults() {
        let cli = CliConfig::parse_from(["tawaf-export"]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.group_ids(), &[StepGroupId(1), StepGroupId(2)]);
        assert!(!config.with_files());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = CliConfig::parse_from([
            "tawaf-export",
            "--base-url",
            "http://localhost:9000",
            "--group-ids",
            "2,1",
            "--with-files",
            "--concurrent-requests",
            "3",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.base_url(), "http://localhost:9000");
        assert_eq!(config.group_ids(), &[StepGroupId(2), StepGroupId(1)]);
        assert!(config.with_files());
        assert_eq!(config.concurrent_requests(), 3);
    }
}
