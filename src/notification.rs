// src/notification.rs
//! Transient user-visible messages, independent of navigation

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title, description)
    }

    fn new(level: NotificationLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }

    /// CSS modifier used by the page templates
    pub fn css_class(&self) -> &'static str {
        match self.level {
            NotificationLevel::Success => "toast-success",
            NotificationLevel::Error => "toast-error",
        }
    }

    pub fn time_label(&self) -> String {
        self.created_at.format("%H:%M:%S").to_string()
    }
}
