use anyhow::{Context, Result};
use notify_rust::Notification;

use crate::model::NotificationRequest;

/// Delivers a notification to the user.
pub trait Notifier {
    fn notify(&self, request: &NotificationRequest) -> Result<()>;
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, request: &NotificationRequest) -> Result<()> {
        (**self).notify(request)
    }
}

/// OS-native desktop notification.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self { app_name: app_name.into() }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new("desktop-weather")
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, request: &NotificationRequest) -> Result<()> {
        tracing::debug!(title = %request.title, "showing desktop notification");

        Notification::new()
            .appname(&self.app_name)
            .summary(&request.title)
            .body(&request.message)
            .show()
            .context("Notification facility rejected the request")?;

        Ok(())
    }
}
