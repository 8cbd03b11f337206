use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can end a run before (or instead of) a notification.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("OPENWEATHER_API_KEY not found in environment, .env file or config file.")]
    MissingCredential,

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Missing field in weather data: {field}")]
    DataShape { field: &'static str },

    #[error("Failed to deliver desktop notification: {0}")]
    Notification(#[source] anyhow::Error),
}

impl WeatherError {
    /// Whether this failure belongs to the catch-all category that is
    /// reported with the full error chain.
    pub fn is_unanticipated(&self) -> bool {
        matches!(self, WeatherError::Notification(_))
    }
}

/// Failures while talking to the provider. Retry is never attempted, so
/// transport, status and decoding failures are grouped together.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("weather provider returned invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
