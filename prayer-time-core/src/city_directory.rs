//! City lookup validated against the provider, cached for a day.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::city::CityRecord;
use crate::constants::{CITY_CACHE_PREFIX, CITY_CACHE_TTL};
use crate::error::PrayerTimeResult;
use crate::schedule::{ScheduleProvider, ScheduleQuery};
use crate::store::{self, KeyValueStore};

#[derive(Clone)]
pub struct CityDirectory {
    provider: Arc<dyn ScheduleProvider>,
    cache: Arc<dyn KeyValueStore>,
}

impl CityDirectory {
    pub fn new(provider: Arc<dyn ScheduleProvider>, cache: Arc<dyn KeyValueStore>) -> Self {
        CityDirectory { provider, cache }
    }

    fn cache_key(name: &str) -> String {
        format!("{CITY_CACHE_PREFIX}{name}")
    }

    /// Cities matching `name` whose code the provider can actually serve.
    ///
    /// An empty list means no match. Order follows the provider's listing, so
    /// the first entry is the canonical match.
    pub async fn resolve(&self, name: &str) -> PrayerTimeResult<Vec<CityRecord>> {
        if let Some(cities) = self.cached(name).await {
            debug!(city = %name, "City lookup served from cache");
            return Ok(cities);
        }

        let candidates = self.provider.search_cities(name).await?;
        let cities = self
            .validate(candidates, Utc::now().date_naive())
            .await;

        info!(city = %name, matches = cities.len(), "Resolved city");
        self.spawn_cache_write(name, &cities);

        Ok(cities)
    }

    /// Cache read; any failure or unreadable payload counts as a miss.
    async fn cached(&self, name: &str) -> Option<Vec<CityRecord>> {
        let raw = match self.cache.get(&Self::cache_key(name)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(city = %name, error = %e, "Failed to read city cache");
                return None;
            }
        };

        match store::decode(&raw) {
            Ok(cities) => Some(cities),
            Err(e) => {
                warn!(city = %name, error = %e, "Discarding unreadable city cache entry");
                None
            }
        }
    }

    /// Keep leaf cities whose zero-day schedule probe returns at least one day.
    ///
    /// Probes run one after another in listing order.
    async fn validate(&self, candidates: Vec<CityRecord>, today: NaiveDate) -> Vec<CityRecord> {
        let mut cities = Vec::new();

        for city in candidates {
            if city.is_region_group() {
                debug!(code = %city.city_code, "Skipping region group");
                continue;
            }

            match self
                .provider
                .fetch_schedule(&ScheduleQuery::probe(&city, today))
                .await
            {
                Ok(schedule) if !schedule.days.is_empty() => cities.push(city),
                Ok(_) => debug!(code = %city.city_code, "Probe returned no schedule"),
                Err(e) => debug!(code = %city.city_code, error = %e, "Probe failed"),
            }
        }

        cities
    }

    /// Detached write-back. Errors are logged and dropped.
    fn spawn_cache_write(&self, name: &str, cities: &[CityRecord]) {
        let payload = match store::encode(&cities) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(city = %name, error = %e, "Failed to encode city cache entry");
                return;
            }
        };

        let cache = Arc::clone(&self.cache);
        let key = Self::cache_key(name);

        tokio::spawn(async move {
            if let Err(e) = cache.set_with_ttl(&key, payload, CITY_CACHE_TTL).await {
                warn!(key = %key, error = %e, "Failed to write city cache");
            }
        });
    }
}
