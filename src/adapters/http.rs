use crate::domain::model::{DoaaItem, DoaaResponse, Step, StepGroupId, StepsResponse};
use crate::utils::error::Result;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_PREFIX: &str = "/haram-api/public/api/vss";
const AUDIO_PREFIX: &str = "/apps/public/doaaFileMaster";

/// Thin wrapper around the Tawaf public API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_url, API_PREFIX, path)
    }

    pub fn audio_url(&self, audio_number: &str) -> String {
        format!("{}{}/{}", self.base_url, AUDIO_PREFIX, audio_number)
    }

    /// GET `url` and fail on any non-2xx status.
    pub async fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        Ok(response.error_for_status()?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(&self.api_url(path)).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn fetch_locations(&self) -> Result<serde_json::Value> {
        self.get_json("TawafLocations").await
    }

    pub async fn fetch_steps(&self, group_id: StepGroupId) -> Result<Vec<Step>> {
        let response: StepsResponse = self.get_json(&format!("TawafSteps/{}", group_id)).await?;

        match response.steps {
            Some(steps) => Ok(steps),
            None => {
                tracing::warn!("⚠️ Group {} returned no Steps field, treating as empty", group_id);
                Ok(Vec::new())
            }
        }
    }

    /// `None` when the step has no Doaa content.
    pub async fn fetch_doaa(&self, step_id: &str) -> Result<Option<Vec<DoaaItem>>> {
        let response: DoaaResponse = self.get_json(&format!("TawafDoaa/{}", step_id)).await?;
        response.into_items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{ErrorCategory, ExportError};
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_url_building() {
        let api = ApiClient::new("https://trasul.gph.gov.sa/", None).unwrap();
        assert_eq!(
            api.api_url("TawafSteps/1"),
            "https://trasul.gph.gov.sa/haram-api/public/api/vss/TawafSteps/1"
        );
        assert_eq!(
            api.audio_url("a/b.mp3"),
            "https://trasul.gph.gov.sa/apps/public/doaaFileMaster/a/b.mp3"
        );
    }

    #[tokio::test]
    async fn test_fetch_steps_missing_field_is_empty() {
        let server = MockServer::start_async().await;
        let steps_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/haram-api/public/api/vss/TawafSteps/1");
                then.status(200).json_body(json!({"Other": []}));
            })
            .await;

        let api = ApiClient::new(&server.base_url(), None).unwrap();
        let steps = api.fetch_steps(StepGroupId(1)).await.unwrap();

        steps_mock.assert_async().await;
        assert!(steps.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_network_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/haram-api/public/api/vss/TawafDoaa/3");
                then.status(500);
            })
            .await;

        let api = ApiClient::new(&server.base_url(), None).unwrap();
        let err = api.fetch_doaa("3").await.unwrap_err();

        assert!(matches!(err, ExportError::Api(_)));
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/haram-api/public/api/vss/TawafLocations");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let api = ApiClient::new(&server.base_url(), None).unwrap();
        let err = api.fetch_locations().await.unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Parse);
    }

    #[tokio::test]
    async fn test_fetch_doaa_falsy_value_is_no_content() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/haram-api/public/api/vss/TawafDoaa/4");
                then.status(200).json_body(json!({"Doaa": false}));
            })
            .await;

        let api = ApiClient::new(&server.base_url(), None).unwrap();
        assert!(api.fetch_doaa("4").await.unwrap().is_none());
    }
}
