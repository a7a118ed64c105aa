//! Error types for prayer-time operations.

use thiserror::Error;

/// Errors that can occur while creating or resolving subscriptions.
#[derive(Error, Debug)]
pub enum PrayerTimeError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("URL is expired")]
    LinkExpired,

    #[error("City {0} not found")]
    CityNotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Schedule parse error: {0}")]
    ScheduleParse(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PrayerTimeError {
    /// Failures of a collaborator (provider, store, codec) rather than of the caller's input.
    pub fn is_backend(&self) -> bool {
        !matches!(
            self,
            PrayerTimeError::Validation(_)
                | PrayerTimeError::LinkExpired
                | PrayerTimeError::CityNotFound(_)
        )
    }
}

impl From<serde_json::Error> for PrayerTimeError {
    fn from(err: serde_json::Error) -> Self {
        PrayerTimeError::Serialization(err.to_string())
    }
}

/// Result type alias for prayer-time operations.
pub type PrayerTimeResult<T> = Result<T, PrayerTimeError>;
