use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Current conditions for a city, fetched fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub condition: String,
    pub temp: f64,
    pub humidity: i64,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("weather API returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected weather payload")]
    Malformed,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "http://api.weatherapi.com/v1".to_string(),
            client: Client::new(),
        }
    }

    /// Looks up current weather for a city. No retry; the caller decides
    /// how a failure degrades.
    pub async fn current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/current.json", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(8))
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", city),
                ("aqi", "no"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status()));
        }

        let data: Value = response.json().await?;
        let current = data.get("current").ok_or(WeatherError::Malformed)?;

        let condition = current
            .get("condition")
            .and_then(|c| c.get("text"))
            .and_then(|t| t.as_str())
            .ok_or(WeatherError::Malformed)?;
        let temp = current
            .get("temp_c")
            .and_then(|t| t.as_f64())
            .ok_or(WeatherError::Malformed)?;
        let humidity = current
            .get("humidity")
            .and_then(|h| h.as_i64().or_else(|| h.as_f64().map(|f| f as i64)))
            .ok_or(WeatherError::Malformed)?;

        Ok(WeatherSnapshot {
            condition: condition.to_string(),
            temp,
            humidity,
        })
    }
}
