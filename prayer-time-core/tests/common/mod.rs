//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use prayer_time_core::{
    CityDirectory, CityRecord, KeyStore, KeyValueStore, Location, MemoryStore, PrayerTimeError,
    PrayerTimeResult, Schedule, ScheduleDate, ScheduleDay, ScheduleProvider, ScheduleQuery, SubscriptionGenerator,
};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn city(code: &str, name: &str, country_code: &str, country: &str) -> CityRecord {
    CityRecord {
        city_code: code.to_string(),
        city_name: name.to_string(),
        country_code: country_code.to_string(),
        country_name: country.to_string(),
    }
}

/// Provider returning a fixed city list and the same prayer times for every date.
pub struct ScriptedProvider {
    pub cities: Vec<CityRecord>,
    pub times: Vec<(&'static str, &'static str)>,
    pub fetches: AtomicUsize,
}

impl ScriptedProvider {
    pub fn jakarta(times: &[(&'static str, &'static str)]) -> Self {
        ScriptedProvider {
            cities: vec![city("jakarta", "Jakarta", "ID", "Indonesia")],
            times: times.to_vec(),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn five_prayers() -> Self {
        Self::jakarta(&[
            ("Fajr", "04:23"),
            ("Dhuhr", "11:56"),
            ("Asr", "15:22"),
            ("Maghrib", "18:13"),
            ("Isha", "19:27"),
        ])
    }
}

#[async_trait]
impl ScheduleProvider for ScriptedProvider {
    async fn search_cities(&self, name: &str) -> PrayerTimeResult<Vec<CityRecord>> {
        let needle = name.to_lowercase();
        Ok(self
            .cities
            .iter()
            .filter(|c| c.city_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn fetch_schedule(&self, query: &ScheduleQuery) -> PrayerTimeResult<Schedule> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let days = query
            .start
            .iter_days()
            .take_while(|d| *d <= query.end)
            .map(|d| ScheduleDay {
                date: ScheduleDate {
                    gregorian: d.format("%Y-%m-%d").to_string(),
                    timestamp: d.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp(),
                },
                times: self
                    .times
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<BTreeMap<_, _>>(),
            })
            .collect();

        Ok(Schedule {
            location: Location {
                city: "Jakarta".into(),
                country: "Indonesia".into(),
            },
            days,
        })
    }
}

/// Store wrapper that counts writes.
#[derive(Default)]
pub struct SpyStore {
    inner: MemoryStore,
    pub writes: AtomicUsize,
}

impl SpyStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for SpyStore {
    async fn get(&self, key: &str) -> PrayerTimeResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set_with_ttl(&self, key: &str, value: String, ttl: Duration) -> PrayerTimeResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_with_ttl(key, value, ttl).await
    }
}

/// Store whose every call fails, counting the attempts.
#[derive(Default)]
pub struct FailingStore {
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> PrayerTimeResult<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Err(PrayerTimeError::Store("connection refused".into()))
    }

    async fn set_with_ttl(&self, _key: &str, _value: String, _ttl: Duration) -> PrayerTimeResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(PrayerTimeError::Store("connection refused".into()))
    }
}

pub fn generator(
    provider: Arc<ScriptedProvider>,
    store: Arc<SpyStore>,
) -> SubscriptionGenerator {
    SubscriptionGenerator::new(
        KeyStore::new(store.clone(), "https://prayer.example"),
        CityDirectory::new(provider.clone(), store),
        provider,
    )
}
