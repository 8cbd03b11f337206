use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WeatherError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
    pub api_key: String,
}

/// Parsed provider body. Only a handful of fields are read; the rest is kept
/// as-is so the diagnostic dump shows exactly what was used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherResponse {
    raw: Value,
}

impl WeatherResponse {
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Resolved city name (`name`).
    pub fn city_name(&self) -> Option<&str> {
        self.raw.get("name")?.as_str()
    }

    /// Description of the first weather condition (`weather[0].description`).
    pub fn description(&self) -> Option<&str> {
        self.raw.get("weather")?.get(0)?.get("description")?.as_str()
    }

    /// Temperature (`main.temp`), kept as the JSON number so it renders
    /// exactly as the provider sent it.
    pub fn temperature(&self) -> Option<&serde_json::Number> {
        match self.raw.get("main")?.get("temp")? {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl From<Value> for WeatherResponse {
    fn from(raw: Value) -> Self {
        Self { raw }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub message: String,
}

impl TryFrom<&WeatherResponse> for NotificationRequest {
    type Error = WeatherError;

    fn try_from(response: &WeatherResponse) -> Result<Self, Self::Error> {
        let name = response
            .city_name()
            .ok_or(WeatherError::DataShape { field: "name" })?;
        let description = response.description().ok_or(WeatherError::DataShape {
            field: "weather[0].description",
        })?;
        let temp = response
            .temperature()
            .ok_or(WeatherError::DataShape { field: "main.temp" })?;

        Ok(Self {
            title: format!("Weather in {name}"),
            message: format!("{description}, {temp}°C"),
        })
    }
}
