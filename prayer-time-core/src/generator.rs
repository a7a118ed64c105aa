//! Subscription generator: mint keys, and turn a key back into a calendar.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Utc};
use tracing::{debug, info};

use crate::city::CityRecord;
use crate::city_directory::CityDirectory;
use crate::constants::{
    CALENDAR_COLOR, DEFAULT_TIME_SHIFT_HOURS, EVENT_CATEGORY, EVENT_DURATION_MINUTES,
};
use crate::error::{PrayerTimeError, PrayerTimeResult};
use crate::event::{Alarm, CalendarEvent, CalendarMeta, Transparency};
use crate::ics::generate_calendar;
use crate::key_store::{KeyGrant, KeyStore};
use crate::request::{PrayerFilter, SubscriptionRequest, WeekdayFilter};
use crate::schedule::{Location, Schedule, ScheduleDay, ScheduleProvider, ScheduleQuery};

/// Rendering knobs.
#[derive(Debug, Clone, Copy)]
pub struct CalendarSettings {
    /// Added to each parsed local prayer time before it is written as UTC.
    pub time_shift: Duration,
    pub event_duration: Duration,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        CalendarSettings {
            time_shift: Duration::hours(DEFAULT_TIME_SHIFT_HOURS),
            event_duration: Duration::minutes(EVENT_DURATION_MINUTES),
        }
    }
}

/// A rendered subscription file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDocument {
    pub content: String,
    pub filename: String,
}

impl CalendarDocument {
    pub fn into_bytes(self) -> Vec<u8> {
        self.content.into_bytes()
    }
}

#[derive(Clone)]
pub struct SubscriptionGenerator {
    keys: KeyStore,
    cities: CityDirectory,
    provider: Arc<dyn ScheduleProvider>,
    settings: CalendarSettings,
}

impl SubscriptionGenerator {
    pub fn new(keys: KeyStore, cities: CityDirectory, provider: Arc<dyn ScheduleProvider>) -> Self {
        SubscriptionGenerator {
            keys,
            cities,
            provider,
            settings: CalendarSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: CalendarSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Validate and persist `req`, returning the shareable key.
    pub async fn create_key(&self, req: &SubscriptionRequest) -> PrayerTimeResult<KeyGrant> {
        self.keys.create(req).await
    }

    pub async fn resolve_city(&self, name: &str) -> PrayerTimeResult<Vec<CityRecord>> {
        self.cities.resolve(name).await
    }

    /// Regenerate the calendar for a previously minted key.
    pub async fn render(&self, key: &str) -> PrayerTimeResult<CalendarDocument> {
        let req = self.keys.resolve(key).await?;
        let prayers = req.prayer_filter();
        let weekdays = req.weekday_filter()?;

        let city = self
            .cities
            .resolve(&req.city)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PrayerTimeError::CityNotFound(req.city.clone()))?;

        let schedule = self
            .provider
            .fetch_schedule(&ScheduleQuery {
                city_code: city.city_code.clone(),
                country_code: city.country_code.clone(),
                start: req.start_date,
                end: req.end_date,
            })
            .await?;

        let events = self.build_events(&schedule, &prayers, &weekdays)?;
        debug!(key = %key, city = %city.city_code, days = schedule.days.len(), events = events.len(), "Built events");

        let content = generate_calendar(&calendar_meta(&schedule.location), &events)?;

        info!(key = %key, city = %city.city_name, events = events.len(), "Rendered subscription calendar");

        Ok(CalendarDocument {
            content,
            filename: city.ics_filename(),
        })
    }

    fn build_events(
        &self,
        schedule: &Schedule,
        prayers: &PrayerFilter,
        weekdays: &WeekdayFilter,
    ) -> PrayerTimeResult<Vec<CalendarEvent>> {
        let mut events = Vec::new();

        for day in &schedule.days {
            for (prayer, local) in day.local_times(|prayer| prayers.allows(prayer))? {
                if !weekdays.allows(local.weekday()) {
                    continue;
                }

                let start = local.and_utc() + self.settings.time_shift;
                events.push(self.build_event(day, &schedule.location, prayer, start));
            }
        }

        Ok(events)
    }

    fn build_event(
        &self,
        day: &ScheduleDay,
        location: &Location,
        prayer: &str,
        start: DateTime<Utc>,
    ) -> CalendarEvent {
        let title = format!("Time for {prayer}");

        CalendarEvent {
            uid: format!("{}-{}", day.date.timestamp, prayer),
            summary: format!("{title} (Pray)"),
            description: title.clone(),
            location: location.label(),
            category: EVENT_CATEGORY.to_string(),
            start,
            end: start + self.settings.event_duration,
            stamp: DateTime::from_timestamp(day.date.timestamp, 0).unwrap_or_default(),
            transparency: Transparency::Transparent,
            alarm: Alarm {
                minutes_before: 0,
                description: title.clone(),
            },
            custom_properties: vec![
                ("X-GOOGLE-CALENDAR-CONTENT-TITLE".to_string(), title),
                ("X-MICROSOFT-CDO-BUSYSTATUS".to_string(), "TRUE".to_string()),
            ],
        }
    }
}

fn calendar_meta(location: &Location) -> CalendarMeta {
    let title = format!("Prayer time for {}", location.label());
    CalendarMeta {
        name: title.clone(),
        description: title,
        color: CALENDAR_COLOR.to_string(),
    }
}
