use crate::adapters::ApiClient;
use crate::core::module_writer::render_module;
use crate::core::LOCATIONS_FILE;
use crate::domain::model::StageReport;
use crate::domain::ports::{Stage, Storage};
use crate::utils::error::Result;

/// Writes the `TawafLocations` payload verbatim as `metadata/addressesData.js`.
pub struct LocationsExport<S: Storage> {
    api: ApiClient,
    storage: S,
}

impl<S: Storage> LocationsExport<S> {
    pub fn new(api: ApiClient, storage: S) -> Self {
        Self { api, storage }
    }
}

#[async_trait::async_trait]
impl<S: Storage> Stage for LocationsExport<S> {
    fn name(&self) -> &str {
        "locations"
    }

    async fn run(&self) -> Result<StageReport> {
        let mut report = StageReport::new(self.name());

        let locations = self.api.fetch_locations().await?;
        let module = render_module("addresses", &locations)?;
        self.storage.write_file(LOCATIONS_FILE, module.as_bytes()).await?;

        tracing::info!("📍 Locations saved to {}", LOCATIONS_FILE);
        report.files_written.push(LOCATIONS_FILE.to_string());
        Ok(report)
    }
}
