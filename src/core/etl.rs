use crate::adapters::ApiClient;
use crate::core::locations::LocationsExport;
use crate::core::steps::StepsExport;
use crate::core::steps_index::StepsIndexExport;
use crate::core::STEPS_DIR;
use crate::domain::model::StageReport;
use crate::domain::ports::{ConfigProvider, Stage, Storage};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub stages: Vec<StageReport>,
}

impl RunSummary {
    pub fn files_written(&self) -> usize {
        self.stages.iter().map(|s| s.files_written.len()).sum()
    }
}

/// Runs the export stages in order and stops at the first failing one.
/// Files written by earlier stages are left in place.
pub struct ExportEngine<S: Storage> {
    storage: S,
    stages: Vec<Box<dyn Stage>>,
}

impl<S: Storage + Clone + 'static> ExportEngine<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            stages: Vec::new(),
        }
    }

    /// 依設定建立標準流程：地點 → 步驟/Doaa → 步驟索引
    pub fn from_config<C: ConfigProvider>(config: &C, storage: S) -> Result<Self> {
        let timeout = config.request_timeout_seconds().map(Duration::from_secs);
        let api = ApiClient::new(config.base_url(), timeout)?;
        let group_ids = config.group_ids().to_vec();

        let steps = StepsExport::new(api.clone(), storage.clone(), group_ids.clone())
            .with_files(config.with_files())
            .with_concurrency(config.concurrent_requests());

        Ok(Self::new(storage.clone())
            .with_stage(LocationsExport::new(api.clone(), storage.clone()))
            .with_stage(steps)
            .with_stage(StepsIndexExport::new(api, storage, group_ids)))
    }

    pub fn with_stage<T: Stage + 'static>(mut self, stage: T) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        let start = Instant::now();
        tracing::info!("🚀 Starting export with {} stages", self.stages.len());

        self.storage.create_dir(STEPS_DIR).await?;

        let mut reports = Vec::with_capacity(self.stages.len());
        for stage in &self.stages {
            tracing::info!("▶️ Running stage: {}", stage.name());
            let stage_start = Instant::now();

            let report = stage.run().await.inspect_err(|e| {
                tracing::error!(
                    "❌ Stage '{}' failed: {} (Category: {:?})",
                    stage.name(),
                    e,
                    e.category()
                );
            })?;

            tracing::info!(
                "Stage '{}' finished in {:?}, {} files written",
                report.stage,
                stage_start.elapsed(),
                report.files_written.len()
            );
            reports.push(report);
        }

        Ok(RunSummary {
            started_at,
            elapsed: start.elapsed(),
            stages: reports,
        })
    }
}
