use crate::{WeatherError, WeatherQuery, WeatherResponse};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for `query.city`. Called once per run; no retry.
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherResponse, WeatherError>;
}
