//! Redis-backed store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fred::clients::Client as RedisClient;
use fred::interfaces::KeysInterface;
use fred::types::Expiration;

use super::KeyValueStore;
use crate::error::{PrayerTimeError, PrayerTimeResult};

#[derive(Clone)]
pub struct RedisStore {
    redis: Arc<RedisClient>,
}

impl RedisStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> PrayerTimeResult<Option<String>> {
        self.redis
            .get::<Option<String>, _>(key.to_string())
            .await
            .map_err(|e| PrayerTimeError::Store(e.to_string()))
    }

    async fn set_with_ttl(&self, key: &str, value: String, ttl: Duration) -> PrayerTimeResult<()> {
        // SET ... EX 0 is rejected by Redis
        let seconds = ttl.as_secs().max(1) as i64;
        self.redis
            .set::<(), _, _>(key.to_string(), value, Some(Expiration::EX(seconds)), None, false)
            .await
            .map_err(|e| PrayerTimeError::Store(e.to_string()))
    }
}
