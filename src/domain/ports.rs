use crate::domain::model::{StageReport, StepGroupId};
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::io::AsyncWrite;

pub trait Storage: Send + Sync {
    type Writer: AsyncWrite + Send + Unpin;

    /// Writes `data` to `path`, creating parent directories and replacing any existing file.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn create_dir(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Opens `path` for streaming writes, truncating any existing file.
    fn create_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Self::Writer>> + Send;

    /// Removes `path` if it exists. Returns whether a file was removed.
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn group_ids(&self) -> &[StepGroupId];
    fn with_files(&self) -> bool;
    fn concurrent_requests(&self) -> usize;
    fn request_timeout_seconds(&self) -> Option<u64>;
}

/// 匯出流程中的單一階段
#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self) -> Result<StageReport>;
}
