use std::sync::Arc;

use anyhow::{Context, Result};
use fred::clients::Client as RedisClient;
use fred::interfaces::ClientLike;
use prayer_time_core::{
    CalendarSettings, CityDirectory, KeyStore, KeyValueStore, MemoryStore, RedisStore,
    ScheduleProvider, SubscriptionGenerator,
};
use prayer_time_provider_waktusholat::WaktuSholatClient;
use tracing::{info, warn};

use crate::config::{Config, StoreBackend};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    generator: Arc<SubscriptionGenerator>,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let store = connect_store(config).await?;
        let provider: Arc<dyn ScheduleProvider> =
            Arc::new(WaktuSholatClient::new((&config.provider).into())?);

        if config.server.public_url.is_empty() {
            warn!("server.public_url is empty; subscription links will be relative");
        }

        let keys = KeyStore::new(store.clone(), config.server.public_url.clone())
            .with_ttl(config.key_ttl());
        let cities = CityDirectory::new(provider.clone(), store);
        let generator = SubscriptionGenerator::new(keys, cities, provider)
            .with_settings(CalendarSettings::from(&config.calendar));

        Ok(Self::from_generator(generator))
    }

    pub fn from_generator(generator: SubscriptionGenerator) -> Self {
        AppState {
            generator: Arc::new(generator),
        }
    }

    pub fn generator(&self) -> &SubscriptionGenerator {
        &self.generator
    }
}

async fn connect_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory store; subscription keys will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Redis => {
            let redis_config = fred::types::config::Config::from_url(&config.store.redis_url)
                .context("Invalid Redis URL")?;
            let client = RedisClient::new(redis_config, None, None, None);
            client.connect();
            client
                .wait_for_connect()
                .await
                .context("Failed to connect to Redis")?;
            info!("Connected to Redis");
            Ok(Arc::new(RedisStore::new(Arc::new(client))))
        }
    }
}
