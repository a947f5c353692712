use crate::adapters::ApiClient;
use crate::core::module_writer::render_module;
use crate::core::STEPS_INDEX_FILE;
use crate::domain::model::{StageReport, Step, StepGroupId};
use crate::domain::ports::{Stage, Storage};
use crate::utils::error::Result;
use std::collections::BTreeMap;

/// Writes `metadata/stepsData.js`: group id -> that group's step list.
///
/// Fetches every group again instead of reusing the Doaa stage's data, so the
/// index always reflects the API at the time it is written.
pub struct StepsIndexExport<S: Storage> {
    api: ApiClient,
    storage: S,
    group_ids: Vec<StepGroupId>,
}

impl<S: Storage> StepsIndexExport<S> {
    pub fn new(api: ApiClient, storage: S, group_ids: Vec<StepGroupId>) -> Self {
        Self {
            api,
            storage,
            group_ids,
        }
    }

    /// Keys serialize as strings in numeric order; a repeated id keeps its last fetch.
    pub async fn collect_index(&self) -> Result<BTreeMap<StepGroupId, Vec<Step>>> {
        let mut index = BTreeMap::new();
        for &group_id in &self.group_ids {
            let steps = self.api.fetch_steps(group_id).await?;
            tracing::debug!("Group {} has {} steps", group_id, steps.len());
            index.insert(group_id, steps);
        }
        Ok(index)
    }
}

#[async_trait::async_trait]
impl<S: Storage> Stage for StepsIndexExport<S> {
    fn name(&self) -> &str {
        "steps-index"
    }

    async fn run(&self) -> Result<StageReport> {
        let mut report = StageReport::new(self.name());

        let index = self.collect_index().await?;
        let module = render_module("stepsData", &index)?;
        self.storage
            .write_file(STEPS_INDEX_FILE, module.as_bytes())
            .await?;

        tracing::info!("🗂️ Step index for {} groups saved to {}", index.len(), STEPS_INDEX_FILE);
        report.files_written.push(STEPS_INDEX_FILE.to_string());
        Ok(report)
    }
}
