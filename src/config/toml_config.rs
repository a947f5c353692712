use crate::domain::model::StepGroupId;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://trasul.gph.gov.sa";

/// 匯出設定，可由 TOML 檔案載入，未指定的欄位使用預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub source: SourceConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub group_ids: Vec<StepGroupId>,
    pub concurrent_requests: usize,
    pub request_timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            group_ids: vec![StepGroupId(1), StepGroupId(2)],
            concurrent_requests: 1,
            request_timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
    /// 是否下載音訊檔案
    pub with_files: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: ".".to_string(),
            with_files: false,
        }
    }
}

impl ExportConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ExportError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_HOST})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ExportError::Config {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for ExportConfig {
    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn group_ids(&self) -> &[StepGroupId] {
        &self.source.group_ids
    }

    fn with_files(&self) -> bool {
        self.load.with_files
    }

    fn concurrent_requests(&self) -> usize {
        self.source.concurrent_requests
    }

    fn request_timeout_seconds(&self) -> Option<u64> {
        self.source.request_timeout_seconds
    }
}

impl Validate for ExportConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.source.base_url)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_positive_number(
            "source.concurrent_requests",
            self.source.concurrent_requests,
            1,
        )?;
        validation::validate_non_empty_list("source.group_ids", &self.source.group_ids)?;
        if let Some(timeout) = self.source.request_timeout_seconds {
            validation::validate_positive_number(
                "source.request_timeout_seconds",
                timeout as usize,
                1,
            )?;
        }
        Ok(())
    }
}
