//! In-process store for development and tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::KeyValueStore;
use crate::error::{PrayerTimeError, PrayerTimeResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .map(|entries| entries.values().filter(|(_, deadline)| *deadline > now).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> PrayerTimeResult<Option<String>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PrayerTimeError::Store("memory store lock poisoned".into()))?;

        match entries.get(key) {
            Some((value, deadline)) if *deadline > Instant::now() => return Ok(Some(value.clone())),
            Some(_) => {}
            None => return Ok(None),
        }

        // expired: evict on read
        entries.remove(key);
        Ok(None)
    }

    async fn set_with_ttl(&self, key: &str, value: String, ttl: Duration) -> PrayerTimeResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PrayerTimeError::Store("memory store lock poisoned".into()))?;
        let now = Instant::now();
        entries.retain(|_, (_, deadline)| *deadline > now);
        entries.insert(key.to_string(), (value, now + ttl));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        store
            .set_with_ttl("k", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let store = MemoryStore::new();
        store
            .set_with_ttl("k", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_sweeps_expired_entries() {
        let store = MemoryStore::new();
        store
            .set_with_ttl("stale", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;
        store
            .set_with_ttl("fresh", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        let entries = store.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("fresh"));
    }
}
