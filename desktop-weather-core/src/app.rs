//! One fetch-and-notify run.

use reqwest::Client;

use crate::{
    config::Settings,
    error::WeatherError,
    model::{NotificationRequest, WeatherQuery},
    notifier::Notifier,
    provider::{WeatherProvider, openweather::OpenWeatherProvider},
};

/// Fetch the weather for `query`, derive the notification and dispatch it.
///
/// Nothing is dispatched unless both the fetch and the derivation succeed.
pub async fn notify_current_weather<P, N>(
    provider: &P,
    notifier: &N,
    query: &WeatherQuery,
) -> Result<NotificationRequest, WeatherError>
where
    P: WeatherProvider + ?Sized,
    N: Notifier + ?Sized,
{
    let response = provider.fetch(query).await?;
    let request = NotificationRequest::try_from(&response)?;

    notifier.notify(&request).map_err(WeatherError::Notification)?;

    Ok(request)
}

#[derive(Debug)]
pub struct App<N> {
    settings: Settings,
    notifier: N,
}

impl<N: Notifier> App<N> {
    pub fn new(settings: Settings, notifier: N) -> Self {
        Self { settings, notifier }
    }

    /// Runs once. The credential is checked before any HTTP session exists;
    /// the session lives only for this call.
    pub async fn run(&self) -> Result<NotificationRequest, WeatherError> {
        let query = self.settings.query()?;

        let provider = OpenWeatherProvider::with_endpoint(Client::new(), &self.settings.endpoint);

        notify_current_weather(&provider, &self.notifier, &query).await
    }
}
