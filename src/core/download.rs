use crate::adapters::ApiClient;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use tokio::io::AsyncWriteExt;

/// Streams `url` into `destination`. Failures are logged and swallowed; any
/// partially written file is removed. Returns whether the download succeeded.
pub async fn download_file<S: Storage>(
    api: &ApiClient,
    storage: &S,
    url: &str,
    destination: &str,
) -> bool {
    match stream_to_storage(api, storage, url, destination).await {
        Ok(bytes) => {
            tracing::debug!("Downloaded {} bytes to {}", bytes, destination);
            true
        }
        Err(e) => {
            tracing::error!("Error downloading file from {}: {}", url, e);
            match storage.remove_file(destination).await {
                Ok(true) => tracing::debug!("Removed incomplete file {}", destination),
                Ok(false) => {}
                Err(cleanup) => {
                    tracing::warn!("Could not remove incomplete file {}: {}", destination, cleanup)
                }
            }
            false
        }
    }
}

async fn stream_to_storage<S: Storage>(
    api: &ApiClient,
    storage: &S,
    url: &str,
    destination: &str,
) -> Result<u64> {
    let mut response = api.get(url).await?;
    let mut writer = storage.create_file(destination).await?;

    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    writer.flush().await?;

    Ok(written)
}
