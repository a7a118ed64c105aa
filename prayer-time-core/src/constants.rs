//! Fixed values shared across the crate.

use std::time::Duration;

/// Keyspace prefix for stored subscription requests.
pub const KEY_PREFIX: &str = "prayer-time-";

/// Keyspace prefix for cached city lookups.
pub const CITY_CACHE_PREFIX: &str = "city-";

/// City lookups are cached for one day.
pub const CITY_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default lifetime of a subscription key.
pub const DEFAULT_KEY_TTL: Duration = Duration::from_secs(60 * 60);

/// Version tag written into every cached payload.
pub const PAYLOAD_VERSION: u32 = 1;

/// Region-group city codes contain this separator.
pub const REGION_GROUP_SEPARATOR: char = '-';

/// Shift applied to every parsed prayer time before it is written as UTC.
pub const DEFAULT_TIME_SHIFT_HOURS: i64 = -7;

/// Length of each generated event.
pub const EVENT_DURATION_MINUTES: i64 = 30;

pub const CALENDAR_COLOR: &str = "#009688";

pub const EVENT_CATEGORY: &str = "Prayer";

/// Route that resolves a key into a calendar document.
pub const RESOLVE_PATH: &str = "/prayer-time/get";
