//! Trefle-compatible plant database client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::types::{HumidityWindow, PlantDetail, PlantSummary, PlantsError};

const TREFLE_API_BASE: &str = "https://trefle.io";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// The API wraps every payload in a `data` envelope.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    data: Vec<PlantSummary>,
}

#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    data: PlantDetail,
}

#[derive(Debug, Clone)]
pub struct PlantsClient {
    client: Client,
    base_url: String,
    token: String,
}

impl PlantsClient {
    pub fn new(token: &str) -> Result<Self, PlantsError> {
        Self::new_with_base_url(token, TREFLE_API_BASE)
    }

    /// Client against a non-default endpoint (tests, self-hosted mirrors).
    pub fn new_with_base_url(token: &str, base_url: &str) -> Result<Self, PlantsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Search plants whose tolerated atmospheric humidity falls inside the
    /// given window. The window is forwarded verbatim, bounds included.
    #[instrument(skip(self), level = "info")]
    pub async fn search_by_humidity_range(
        &self,
        window: &HumidityWindow,
    ) -> Result<Vec<PlantSummary>, PlantsError> {
        let url = format!(
            "{}/api/v1/plants?token={}&range[atmospheric_humidity]={}",
            self.base_url,
            urlencoding::encode(&self.token),
            urlencoding::encode(&window.to_string()),
        );

        let response = self.client.get(&url).send().await?;
        let envelope: ListEnvelope = self.handle_response(response).await?;

        tracing::info!("Humidity search returned {} plants", envelope.data.len());
        Ok(envelope.data)
    }

    /// Fetch the extended botanical record for one plant.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_detail(&self, id: i64) -> Result<PlantDetail, PlantsError> {
        let url = format!(
            "{}/api/v1/plants/{}?token={}",
            self.base_url,
            id,
            urlencoding::encode(&self.token),
        );

        let response = self.client.get(&url).send().await?;
        let envelope: DetailEnvelope = self.handle_response(response).await?;
        Ok(envelope.data)
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, PlantsError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| PlantsError::Parse(e.to_string()))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(PlantsError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn search_sends_unclamped_window_and_parses_rows() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/plants"))
            .and(query_param("token", "test-token"))
            .and(query_param("range[atmospheric_humidity]", "-15,25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {
                        "id": 1,
                        "common_name": "Rosa",
                        "scientific_name": "Rosa rubiginosa",
                        "image_url": "https://img.example/rosa.jpg"
                    },
                    { "scientific_name": "Lavandula angustifolia" }
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = PlantsClient::new_with_base_url("test-token", &mock_server.uri()).unwrap();
        let plants = client
            .search_by_humidity_range(&HumidityWindow::around(5))
            .await
            .unwrap();

        assert_eq!(plants.len(), 2);
        assert_eq!(plants[0].id, Some(1));
        assert_eq!(plants[0].common_name.as_deref(), Some("Rosa"));
        assert_eq!(plants[1].id, None);
    }

    #[tokio::test]
    async fn search_empty_data_is_an_empty_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/plants"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": []
            })))
            .mount(&mock_server)
            .await;

        let client = PlantsClient::new_with_base_url("test-token", &mock_server.uri()).unwrap();
        let plants = client
            .search_by_humidity_range(&HumidityWindow::around(50))
            .await
            .unwrap();

        assert!(plants.is_empty());
    }

    #[tokio::test]
    async fn search_maps_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/plants"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = PlantsClient::new_with_base_url("test-token", &mock_server.uri()).unwrap();
        let result = client
            .search_by_humidity_range(&HumidityWindow::around(50))
            .await;

        assert!(matches!(result, Err(PlantsError::Api { status: 500, .. })));
    }

    #[tokio::test]
    async fn fetch_detail_parses_nested_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/plants/42"))
            .and(query_param("token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "id": 42,
                    "common_name": "Lavanda",
                    "scientific_name": "Lavandula angustifolia",
                    "genus": { "name": "Lavandula" },
                    "main_species": {
                        "growth": { "light": 8 },
                        "specifications": { "average_height": { "cm": 60.0 } }
                    }
                }
            })))
            .mount(&mock_server)
            .await;

        let client = PlantsClient::new_with_base_url("test-token", &mock_server.uri()).unwrap();
        let detail = client.fetch_detail(42).await.unwrap();

        assert_eq!(detail.common_name.as_deref(), Some("Lavanda"));
        assert_eq!(detail.genus.unwrap().name.as_deref(), Some("Lavandula"));
    }

    #[tokio::test]
    async fn fetch_detail_maps_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/plants/999"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&mock_server)
            .await;

        let client = PlantsClient::new_with_base_url("test-token", &mock_server.uri()).unwrap();
        let result = client.fetch_detail(999).await;

        assert!(matches!(result, Err(PlantsError::Api { status: 404, .. })));
    }
}
