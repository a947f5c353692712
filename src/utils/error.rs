use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    Processing { message: String },
}

/// 錯誤分類，用於日誌診斷
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parse,
    Io,
    Config,
    Processing,
}

impl ExportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExportError::Api(e) if e.is_decode() => ErrorCategory::Parse,
            ExportError::Api(_) => ErrorCategory::Network,
            ExportError::Io(_) => ErrorCategory::Io,
            ExportError::Serialization(_) => ErrorCategory::Parse,
            ExportError::Config { .. } | ExportError::InvalidConfigValue { .. } => {
                ErrorCategory::Config
            }
            ExportError::Processing { .. } => ErrorCategory::Processing,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and that the API host is reachable",
            ErrorCategory::Parse => "The API returned an unexpected payload; inspect the response body",
            ErrorCategory::Io => "Check that the output directory exists and is writable",
            ErrorCategory::Config => "Fix the configuration file or command line flags",
            ErrorCategory::Processing => "Re-run with --verbose to see which item failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let io = ExportError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(io.category(), ErrorCategory::Io);

        let parse = ExportError::Serialization(
            serde_json::from_str::<serde_json::Value>("{not json").unwrap_err(),
        );
        assert_eq!(parse.category(), ErrorCategory::Parse);

        let config = ExportError::InvalidConfigValue {
            field: "base_url".to_string(),
            value: "ftp://x".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Config);
        assert!(config.to_string().contains("base_url"));
    }
}
