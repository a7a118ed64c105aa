//! HTTP client for the upstream APIs.

use std::time::Duration;

use async_trait::async_trait;
use prayer_time_core::school::school_for_country;
use prayer_time_core::{
    CityRecord, PrayerTimeError, PrayerTimeResult, Schedule, ScheduleProvider, ScheduleQuery,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::types::{CityResponse, PrayTimeResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Upstream hosts and request settings.
#[derive(Debug, Clone)]
pub struct WaktuSholatConfig {
    /// Base URL of the city search (waktusholat.org)
    pub waktu_sholat_host: String,
    /// Base URL of the times API (pray.zone)
    pub pray_zone_host: String,
    pub timeout: Duration,
    /// Log every outbound URL and status at debug level
    pub debug_log: bool,
}

impl Default for WaktuSholatConfig {
    fn default() -> Self {
        WaktuSholatConfig {
            waktu_sholat_host: "https://waktusholat.org".to_string(),
            pray_zone_host: "https://api.pray.zone".to_string(),
            timeout: DEFAULT_TIMEOUT,
            debug_log: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WaktuSholatClient {
    http: Client,
    config: WaktuSholatConfig,
}

impl WaktuSholatClient {
    pub fn new(config: WaktuSholatConfig) -> PrayerTimeResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PrayerTimeError::Provider(format!("Failed to build HTTP client: {e}")))?;

        Ok(WaktuSholatClient { http, config })
    }

    fn parse_host(host: &str) -> PrayerTimeResult<Url> {
        Url::parse(host).map_err(|e| PrayerTimeError::Config(format!("Invalid host '{host}': {e}")))
    }

    fn cities_url(&self, name: &str) -> PrayerTimeResult<Url> {
        let mut url = Self::parse_host(&self.config.waktu_sholat_host)?;
        url.path_segments_mut()
            .map_err(|_| {
                PrayerTimeError::Config(format!(
                    "Host cannot be a base URL: {}",
                    self.config.waktu_sholat_host
                ))
            })?
            .pop_if_empty()
            .extend(["api", "docs", "ajax", "cities", name]);
        Ok(url)
    }

    fn times_url(&self, query: &ScheduleQuery) -> PrayerTimeResult<Url> {
        let mut url = Self::parse_host(&self.config.pray_zone_host)?;
        url.set_path("/v2/times/dates.json");
        url.query_pairs_mut()
            .append_pair("city", &query.city_code)
            .append_pair("start", &query.start.to_string())
            .append_pair("end", &query.end.to_string())
            .append_pair("school", &school_for_country(&query.country_code).to_string());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> PrayerTimeResult<T> {
        if self.config.debug_log {
            debug!(url = %url, "GET");
        }

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| PrayerTimeError::Provider(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if self.config.debug_log {
            debug!(url = %url, status = %status, "Response");
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PrayerTimeError::Provider(format!(
                "{url} returned {status}: {body}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PrayerTimeError::Provider(format!("Failed to parse response from {url}: {e}")))
    }
}

#[async_trait]
impl ScheduleProvider for WaktuSholatClient {
    async fn search_cities(&self, name: &str) -> PrayerTimeResult<Vec<CityRecord>> {
        let url = self.cities_url(name)?;
        let cities: Vec<CityResponse> = self.get_json(url).await?;
        Ok(cities.into_iter().map(Into::into).collect())
    }

    async fn fetch_schedule(&self, query: &ScheduleQuery) -> PrayerTimeResult<Schedule> {
        let url = self.times_url(query)?;
        let response: PrayTimeResponse = self.get_json(url).await?;
        Ok(response.into())
    }
}
