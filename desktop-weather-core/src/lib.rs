//! Core library for the `desktop-weather` notifier.
//!
//! This crate defines:
//! - Configuration & credential resolution
//! - The OpenWeather fetcher behind the `WeatherProvider` trait
//! - Shared domain models (query, raw response, notification)
//! - Desktop notification dispatch and the single-run orchestrator
//!
//! It is used by `desktop-weather-cli`, but can also be reused by other binaries.

pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod notifier;
pub mod provider;

pub use app::{App, notify_current_weather};
pub use config::{Config, Settings};
pub use error::{NetworkError, WeatherError};
pub use model::{NotificationRequest, WeatherQuery, WeatherResponse};
pub use notifier::{DesktopNotifier, Notifier};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
