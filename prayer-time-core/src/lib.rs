//! Core types and services for prayer-time calendar subscriptions.
//!
//! This crate provides:
//! - `KeyStore` for minting and resolving expiring subscription keys
//! - `CityDirectory` for validated, cached city lookup
//! - `SubscriptionGenerator` for turning a stored request into an `.ics` document
//! - `ScheduleProvider` and `KeyValueStore`, the seams to the remote provider and the cache

pub mod city;
pub mod city_directory;
pub mod constants;
pub mod error;
pub mod event;
pub mod generator;
pub mod ics;
pub mod key_store;
pub mod request;
pub mod schedule;
pub mod school;
pub mod store;

pub use city::CityRecord;
pub use city_directory::CityDirectory;
pub use error::{PrayerTimeError, PrayerTimeResult};
pub use generator::{CalendarDocument, CalendarSettings, SubscriptionGenerator};
pub use key_store::{KeyGrant, KeyStore};
pub use request::SubscriptionRequest;
pub use schedule::{Location, Schedule, ScheduleDate, ScheduleDay, ScheduleProvider, ScheduleQuery};
pub use store::{KeyValueStore, MemoryStore, RedisStore};
