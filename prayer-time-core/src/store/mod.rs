//! Key/value cache seam with TTL-based expiry.
//!
//! Expiry is the only deletion mechanism: a key that was never written and a
//! key whose TTL elapsed both read back as `None`.

mod memory;
mod redis;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::PAYLOAD_VERSION;
use crate::error::{PrayerTimeError, PrayerTimeResult};

pub use memory::MemoryStore;
pub use redis::RedisStore;

/// A shared, concurrency-safe string store with per-key expiry.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key is absent or expired.
    async fn get(&self, key: &str) -> PrayerTimeResult<Option<String>>;

    /// Write `value` and its expiry in one step.
    async fn set_with_ttl(&self, key: &str, value: String, ttl: Duration) -> PrayerTimeResult<()>;
}

/// Versioned wrapper for everything written to the store.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// Serialize `data` inside the current envelope version.
pub fn encode<T: Serialize>(data: &T) -> PrayerTimeResult<String> {
    let envelope = Envelope {
        version: PAYLOAD_VERSION,
        data,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Deserialize an envelope, rejecting versions this build does not know.
pub fn decode<T: DeserializeOwned>(raw: &str) -> PrayerTimeResult<T> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(raw)?;
    if envelope.version != PAYLOAD_VERSION {
        return Err(PrayerTimeError::Serialization(format!(
            "unsupported payload version {}",
            envelope.version
        )));
    }
    Ok(serde_json::from_value(envelope.data)?)
}
