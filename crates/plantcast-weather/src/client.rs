//! OpenWeatherMap-compatible current-conditions client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::types::{WeatherError, WeatherReport};

const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Wire shape of the current-conditions response. Only the `main` section
/// is consumed; everything else the API sends is ignored.
#[derive(Debug, Deserialize)]
struct CurrentConditionsResponse {
    main: MainSection,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(api_key: &str) -> Result<Self, WeatherError> {
        Self::new_with_base_url(api_key, OPENWEATHER_API_BASE)
    }

    /// Client against a non-default endpoint (tests, self-hosted proxies).
    pub fn new_with_base_url(api_key: &str, base_url: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch current conditions for the given position, metric units.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current(&self, lat: f64, lon: f64) -> Result<WeatherReport, WeatherError> {
        let url = format!(
            "{}/data/2.5/weather?lat={}&lon={}&units=metric&appid={}",
            self.base_url, lat, lon, self.api_key
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let body: CurrentConditionsResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        tracing::info!(
            "Current conditions: {}°C, {}% humidity",
            body.main.temp,
            body.main.humidity
        );

        Ok(WeatherReport {
            temperature: body.main.temp,
            humidity: body.main.humidity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_current_parses_main_section() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "10"))
            .and(query_param("lon", "20"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": { "temp": 22.0, "humidity": 60, "pressure": 1015 },
                "name": "Testville"
            })))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new_with_base_url("test-key", &mock_server.uri()).unwrap();
        let report = client.fetch_current(10.0, 20.0).await.unwrap();

        assert_eq!(report.temperature, 22.0);
        assert_eq!(report.humidity, 60);
    }

    #[tokio::test]
    async fn fetch_current_maps_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new_with_base_url("bad-key", &mock_server.uri()).unwrap();
        let result = client.fetch_current(10.0, 20.0).await;

        assert!(matches!(result, Err(WeatherError::Api { status: 401, .. })));
    }

    #[tokio::test]
    async fn fetch_current_maps_unusable_payload_to_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "cod": 200 })),
            )
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new_with_base_url("test-key", &mock_server.uri()).unwrap();
        let result = client.fetch_current(10.0, 20.0).await;

        assert!(matches!(result, Err(WeatherError::Parse(_))));
    }
}
