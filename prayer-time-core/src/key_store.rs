//! Expiring subscription keys.
//!
//! `create` validates and stores a request under a fresh random key;
//! `resolve` reads it back until the key's TTL runs out.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::constants::{DEFAULT_KEY_TTL, KEY_PREFIX, RESOLVE_PATH};
use crate::error::{PrayerTimeError, PrayerTimeResult};
use crate::request::SubscriptionRequest;
use crate::store::{self, KeyValueStore};

/// What a caller gets back after minting a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyGrant {
    pub key: String,
    pub url: String,
    pub message: String,
}

#[derive(Clone)]
pub struct KeyStore {
    store: Arc<dyn KeyValueStore>,
    public_url: String,
    ttl: Duration,
}

impl KeyStore {
    /// `public_url` is the externally reachable base of the service, without trailing slash.
    pub fn new(store: Arc<dyn KeyValueStore>, public_url: impl Into<String>) -> Self {
        KeyStore {
            store,
            public_url: public_url.into().trim_end_matches('/').to_string(),
            ttl: DEFAULT_KEY_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn storage_key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }

    /// Persist `req` under a new key. Nothing is written if validation fails.
    pub async fn create(&self, req: &SubscriptionRequest) -> PrayerTimeResult<KeyGrant> {
        req.validate()?;

        let payload = store::encode(req)?;
        let key = Uuid::new_v4().to_string();

        self.store
            .set_with_ttl(&Self::storage_key(&key), payload, self.ttl)
            .await?;

        info!(key = %key, city = %req.city, ttl_secs = self.ttl.as_secs(), "Created subscription key");

        Ok(KeyGrant {
            url: format!("{}{}?key={}", self.public_url, RESOLVE_PATH, key),
            message: format!("Url expired in {} minutes", self.ttl.as_secs() / 60),
            key,
        })
    }

    /// Read back the request stored under `key`.
    ///
    /// Absent and expired keys both yield `LinkExpired`.
    pub async fn resolve(&self, key: &str) -> PrayerTimeResult<SubscriptionRequest> {
        let Some(raw) = self.store.get(&Self::storage_key(key)).await? else {
            debug!(key = %key, "Subscription key not found");
            return Err(PrayerTimeError::LinkExpired);
        };

        store::decode(&raw)
    }
}
