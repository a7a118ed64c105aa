//! Provider-neutral schedule types and the provider seam.
//!
//! Providers convert their API responses into these types; the rest of the
//! crate never sees provider wire formats.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::city::CityRecord;
use crate::error::{PrayerTimeError, PrayerTimeResult};

/// Parameters for one schedule fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub city_code: String,
    pub country_code: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ScheduleQuery {
    /// Zero-length range used to check that a city code resolves.
    pub fn probe(city: &CityRecord, today: NaiveDate) -> Self {
        ScheduleQuery {
            city_code: city.city_code.clone(),
            country_code: city.country_code.clone(),
            start: today,
            end: today,
        }
    }
}

/// A fetched schedule: where it applies and one entry per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub location: Location,
    pub days: Vec<ScheduleDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

impl Location {
    pub fn label(&self) -> String {
        format!("{} - {}", self.city, self.country)
    }
}

/// One date's prayer times as local wall-clock "HH:MM" strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub date: ScheduleDate,
    pub times: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDate {
    /// "YYYY-MM-DD"
    pub gregorian: String,
    /// Provider-side timestamp for the date
    pub timestamp: i64,
}

impl ScheduleDay {
    /// Parse the prayer times accepted by `keep`, ordered by time of day.
    ///
    /// Entries rejected by `keep` are never parsed. A malformed kept entry fails the whole day.
    pub fn local_times<F>(&self, keep: F) -> PrayerTimeResult<Vec<(&str, NaiveDateTime)>>
    where
        F: Fn(&str) -> bool,
    {
        let mut times = self
            .times
            .iter()
            .filter(|(prayer, _)| keep(prayer.as_str()))
            .map(|(prayer, time)| {
                let raw = format!("{} {}", self.date.gregorian, time);
                NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M")
                    .map(|at| (prayer.as_str(), at))
                    .map_err(|e| PrayerTimeError::ScheduleParse(format!("'{raw}': {e}")))
            })
            .collect::<PrayerTimeResult<Vec<_>>>()?;
        times.sort_by_key(|(_, at)| *at);
        Ok(times)
    }
}

/// Remote source of prayer times and city search.
#[async_trait]
pub trait ScheduleProvider: Send + Sync {
    /// All candidate cities matching a free-text name.
    async fn search_cities(&self, name: &str) -> PrayerTimeResult<Vec<CityRecord>>;

    /// Prayer times for a city over an inclusive date range.
    async fn fetch_schedule(&self, query: &ScheduleQuery) -> PrayerTimeResult<Schedule>;
}
