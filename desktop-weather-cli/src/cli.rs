use clap::{Parser, Subcommand};
use desktop_weather_core::{App, Config, DesktopNotifier, Settings, WeatherError};
use inquire::{Password, PasswordDisplayMode, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "desktop-weather",
    version,
    about = "Show the current weather as a desktop notification"
)]
pub struct Cli {
    /// City to look up instead of the configured one.
    #[arg(long, global = true)]
    pub city: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and city in the config file.
    Configure,

    /// Print where the config file lives.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            None => notify(self.city).await,
            Some(Command::Configure) => configure(self.city),
            Some(Command::ConfigPath) => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

async fn notify(city: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let settings = Settings::resolve(&config, Settings::env_api_key(), city);

    let app = App::new(settings, DesktopNotifier::default());
    match app.run().await {
        Ok(request) => {
            tracing::debug!(title = %request.title, message = %request.message, "notification sent");
        }
        Err(err) => report(&err),
    }

    Ok(())
}

fn configure(city: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let current_city = city
        .or_else(|| config.city.clone())
        .unwrap_or_else(|| desktop_weather_core::config::DEFAULT_CITY.to_string());
    let city = Text::new("City:").with_default(&current_city).prompt()?;

    config.api_key = Some(api_key.trim().to_string());
    config.city = Some(city.trim().to_string());

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

/// Known failure categories get one line; the catch-all gets the full chain.
fn render(err: &WeatherError) -> String {
    match err {
        WeatherError::MissingCredential => format!("Error: {err}"),
        WeatherError::Notification(source) => render_unexpected(source),
        _ => err.to_string(),
    }
}

fn render_unexpected(err: &anyhow::Error) -> String {
    format!("An unexpected error occurred:\n{err:?}")
}

fn report(err: &WeatherError) {
    println!("{}", render(err));
}

pub fn report_unexpected(err: &anyhow::Error) {
    println!("{}", render_unexpected(err));
}
