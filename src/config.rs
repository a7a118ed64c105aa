//! Service configuration.
//!
//! Loaded in order, later sources winning:
//! 1. `config/default.toml`
//! 2. `config/{PRAYER_TIME_ENV}.toml`
//! 3. Environment variables, e.g. `PRAYER_TIME__SERVER__PORT=8080`

use std::time::Duration;

use prayer_time_core::CalendarSettings;
use prayer_time_core::constants::{DEFAULT_KEY_TTL, DEFAULT_TIME_SHIFT_HOURS, EVENT_DURATION_MINUTES};
use prayer_time_provider_waktusholat::WaktuSholatConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub key: KeyConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Externally reachable base URL, used in generated subscription links.
    pub public_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 80,
            public_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    /// In-process map; keys are lost on restart
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub redis_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            backend: StoreBackend::Redis,
            redis_url: "redis://127.0.0.1:6379".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub ttl_secs: u64,
}

impl Default for KeyConfig {
    fn default() -> Self {
        KeyConfig {
            ttl_secs: DEFAULT_KEY_TTL.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub waktu_sholat_host: String,
    pub pray_zone_host: String,
    pub timeout_secs: u64,
    pub debug_log: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let defaults = WaktuSholatConfig::default();
        ProviderConfig {
            waktu_sholat_host: defaults.waktu_sholat_host,
            pray_zone_host: defaults.pray_zone_host,
            timeout_secs: defaults.timeout.as_secs(),
            debug_log: defaults.debug_log,
        }
    }
}

impl From<&ProviderConfig> for WaktuSholatConfig {
    fn from(p: &ProviderConfig) -> Self {
        WaktuSholatConfig {
            waktu_sholat_host: p.waktu_sholat_host.clone(),
            pray_zone_host: p.pray_zone_host.clone(),
            timeout: Duration::from_secs(p.timeout_secs),
            debug_log: p.debug_log,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Hours added to every provider time before it is written as UTC.
    pub time_shift_hours: i64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            time_shift_hours: DEFAULT_TIME_SHIFT_HOURS,
        }
    }
}

impl From<&CalendarConfig> for CalendarSettings {
    fn from(c: &CalendarConfig) -> Self {
        CalendarSettings {
            time_shift: chrono::Duration::hours(c.time_shift_hours),
            event_duration: chrono::Duration::minutes(EVENT_DURATION_MINUTES),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("PRAYER_TIME_ENV").unwrap_or_else(|_| "development".to_string());

        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PRAYER_TIME")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn key_ttl(&self) -> Duration {
        Duration::from_secs(self.key.ttl_secs)
    }
}
