//! Subscription requests and the filters derived from them.

use std::collections::HashSet;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{PrayerTimeError, PrayerTimeResult};

/// What a subscription link regenerates: a city, an inclusive date range,
/// and optional prayer-name and weekday filters (empty = everything).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, alias = "sholat")]
    pub prayers: Vec<String>,
    #[serde(default, alias = "day")]
    pub weekdays: Vec<String>,
}

impl SubscriptionRequest {
    pub fn new(city: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        SubscriptionRequest {
            city: city.into(),
            start_date,
            end_date,
            prayers: Vec::new(),
            weekdays: Vec::new(),
        }
    }

    pub fn with_prayers<I, S>(mut self, prayers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prayers = prayers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_weekdays<I, S>(mut self, weekdays: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weekdays = weekdays.into_iter().map(Into::into).collect();
        self
    }

    /// Checks everything that must hold before the request is persisted.
    pub fn validate(&self) -> PrayerTimeResult<()> {
        if self.city.trim().is_empty() {
            return Err(PrayerTimeError::Validation("city must not be empty".into()));
        }

        if self.start_date > self.end_date {
            return Err(PrayerTimeError::Validation(
                "end date must be greater than start date".into(),
            ));
        }

        WeekdayFilter::parse(&self.weekdays)?;

        Ok(())
    }

    pub fn prayer_filter(&self) -> PrayerFilter {
        PrayerFilter::new(&self.prayers)
    }

    pub fn weekday_filter(&self) -> PrayerTimeResult<WeekdayFilter> {
        WeekdayFilter::parse(&self.weekdays)
    }
}

/// Prayer names to keep, compared case-insensitively. Empty keeps all.
#[derive(Debug, Clone, Default)]
pub struct PrayerFilter(HashSet<String>);

impl PrayerFilter {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        PrayerFilter(names.iter().map(|n| n.as_ref().trim().to_lowercase()).collect())
    }

    pub fn allows(&self, prayer: &str) -> bool {
        self.0.is_empty() || self.0.contains(&prayer.to_lowercase())
    }
}

/// Weekdays to keep. Empty keeps all.
#[derive(Debug, Clone, Default)]
pub struct WeekdayFilter(HashSet<Weekday>);

impl WeekdayFilter {
    /// Accepts full or abbreviated English names in any case ("Monday", "mon").
    pub fn parse<S: AsRef<str>>(names: &[S]) -> PrayerTimeResult<Self> {
        let days = names
            .iter()
            .map(|name| {
                let name = name.as_ref().trim();
                name.parse::<Weekday>()
                    .map_err(|_| PrayerTimeError::Validation(format!("unknown weekday '{name}'")))
            })
            .collect::<PrayerTimeResult<HashSet<_>>>()?;
        Ok(WeekdayFilter(days))
    }

    pub fn allows(&self, day: Weekday) -> bool {
        self.0.is_empty() || self.0.contains(&day)
    }
}
