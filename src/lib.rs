pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ApiClient, LocalStorage};
pub use config::ExportConfig;
pub use core::etl::{ExportEngine, RunSummary};
pub use utils::error::{ExportError, Result};
