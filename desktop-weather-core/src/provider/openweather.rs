use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::DEFAULT_ENDPOINT,
    error::{NetworkError, WeatherError},
    model::{WeatherQuery, WeatherResponse},
};

use super::WeatherProvider;

/// Target for the raw response dump, so it can be filtered on its own.
pub const DUMP_TARGET: &str = "desktop_weather_core::dump";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// The client is the caller's session; no timeout is set on it here.
    pub fn new(http: Client) -> Self {
        Self::with_endpoint(http, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(http: Client, endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), http }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherResponse, WeatherError> {
        tracing::debug!(city = %query.city, endpoint = %self.endpoint, "requesting current weather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("appid", query.api_key.as_str()),
                ("q", query.city.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(NetworkError::from)?;

        let status = res.status();
        let body = res.text().await.map_err(NetworkError::from)?;

        if !status.is_success() {
            return Err(NetworkError::Status { status, body: truncate_body(&body) }.into());
        }

        let parsed = WeatherResponse::from_json(&body).map_err(NetworkError::from)?;

        tracing::info!(target: DUMP_TARGET, "Raw JSON response:\n{}", parsed.raw());

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
