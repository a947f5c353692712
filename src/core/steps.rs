use crate::adapters::ApiClient;
use crate::core::download::download_file;
use crate::core::module_writer::render_module;
use crate::core::{audio_path, step_file_path};
use crate::domain::model::{DoaaItem, StageReport, Step, StepGroupId};
use crate::domain::ports::{Stage, Storage};
use crate::utils::error::Result;
use futures::stream::{self, StreamExt};

/// Exports one `steps/file_<stepId>.js` per step that has Doaa content,
/// optionally downloading the referenced audio files next to it.
pub struct StepsExport<S: Storage> {
    api: ApiClient,
    storage: S,
    group_ids: Vec<StepGroupId>,
    with_files: bool,
    concurrent_requests: usize,
}

impl<S: Storage> StepsExport<S> {
    pub fn new(api: ApiClient, storage: S, group_ids: Vec<StepGroupId>) -> Self {
        Self {
            api,
            storage,
            group_ids,
            with_files: false,
            concurrent_requests: 1,
        }
    }

    pub fn with_files(mut self, enabled: bool) -> Self {
        self.with_files = enabled;
        self
    }

    pub fn with_concurrency(mut self, concurrent_requests: usize) -> Self {
        self.concurrent_requests = concurrent_requests.max(1);
        self
    }

    /// All steps of all groups, group order first, then API order.
    pub async fn collect_steps(&self) -> Result<Vec<Step>> {
        let mut steps = Vec::new();
        for &group_id in &self.group_ids {
            let group_steps = self.api.fetch_steps(group_id).await?;
            tracing::debug!("Group {} returned {} steps", group_id, group_steps.len());
            steps.extend(group_steps);
        }
        Ok(steps)
    }

    async fn export_step(
        &self,
        step_id: &str,
        items: &[DoaaItem],
        report: &mut StageReport,
    ) -> Result<()> {
        if self.with_files {
            for item in items {
                let Some(audio_number) = item.audio_number() else {
                    continue;
                };
                let Some(file_name) = item.audio_file_name() else {
                    tracing::warn!(
                        "⚠️ Audio reference '{}' of step {} has no file name, skipping",
                        audio_number,
                        step_id
                    );
                    continue;
                };

                let destination = audio_path(step_id, file_name);
                tracing::info!("Downloading audio to: {}", destination);
                report.downloads_attempted += 1;
                let url = self.api.audio_url(audio_number);
                if !download_file(&self.api, &self.storage, &url, &destination).await {
                    report.downloads_failed += 1;
                }
            }
        }

        let path = step_file_path(step_id);
        let module = render_module("data", items)?;
        self.storage.write_file(&path, module.as_bytes()).await?;
        tracing::debug!("Step {} saved to {}", step_id, path);

        report.files_written.push(path);
        Ok(())
    }
}

#[async_trait::async_trait]
impl<S: Storage> Stage for StepsExport<S> {
    fn name(&self) -> &str {
        "steps"
    }

    async fn run(&self) -> Result<StageReport> {
        let mut report = StageReport::new(self.name());

        let steps = self.collect_steps().await?;
        tracing::info!(
            "📥 Collected {} steps from {} groups",
            steps.len(),
            self.group_ids.len()
        );

        let mut step_ids = Vec::with_capacity(steps.len());
        for step in &steps {
            match step.id() {
                Some(id) => step_ids.push(id),
                None => {
                    tracing::warn!("⚠️ Step without an id skipped: {}", step.0);
                    report.skipped_steps += 1;
                }
            }
        }

        // 預先抓取後續步驟的 Doaa，但依原順序處理，確保覆寫結果一致
        let api = self.api.clone();
        let fetches = stream::iter(step_ids)
            .map(move |step_id| {
                let api = api.clone();
                async move {
                    let doaa = api.fetch_doaa(&step_id).await;
                    (step_id, doaa)
                }
            })
            .buffered(self.concurrent_requests);
        let mut fetches = std::pin::pin!(fetches);

        while let Some((step_id, doaa)) = fetches.next().await {
            match doaa? {
                Some(items) => self.export_step(&step_id, &items, &mut report).await?,
                None => {
                    tracing::debug!("Step {} has no Doaa content, skipping", step_id);
                    report.skipped_steps += 1;
                }
            }
        }

        tracing::info!(
            "✅ Wrote {} step files ({} skipped, {}/{} downloads failed)",
            report.files_written.len(),
            report.skipped_steps,
            report.downloads_failed,
            report.downloads_attempted
        );
        Ok(report)
    }
}
