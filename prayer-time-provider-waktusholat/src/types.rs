//! Wire types for the two upstream APIs and their conversion into core types.

use std::collections::BTreeMap;

use prayer_time_core::{CityRecord, Location, Schedule, ScheduleDate, ScheduleDay};
use serde::Deserialize;

/// One entry of the waktusholat.org city search.
#[derive(Debug, Deserialize)]
pub struct CityResponse {
    pub city_code: String,
    pub city_name: String,
    pub country_code: String,
    pub country_name: String,
}

impl From<CityResponse> for CityRecord {
    fn from(c: CityResponse) -> Self {
        CityRecord {
            city_code: c.city_code,
            city_name: c.city_name,
            country_code: c.country_code,
            country_name: c.country_name,
        }
    }
}

/// pray.zone `/v2/times/dates.json` response.
#[derive(Debug, Deserialize)]
pub struct PrayTimeResponse {
    pub results: PrayTimeResults,
}

#[derive(Debug, Deserialize)]
pub struct PrayTimeResults {
    #[serde(default)]
    pub datetime: Vec<DateTime>,
    pub location: PrayTimeLocation,
}

#[derive(Debug, Deserialize)]
pub struct DateTime {
    pub times: BTreeMap<String, String>,
    pub date: PrayTimeDate,
}

#[derive(Debug, Deserialize)]
pub struct PrayTimeDate {
    pub timestamp: i64,
    pub gregorian: String,
}

#[derive(Debug, Deserialize)]
pub struct PrayTimeLocation {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

impl From<PrayTimeResponse> for Schedule {
    fn from(resp: PrayTimeResponse) -> Self {
        Schedule {
            location: Location {
                city: resp.results.location.city,
                country: resp.results.location.country,
            },
            days: resp
                .results
                .datetime
                .into_iter()
                .map(|dt| ScheduleDay {
                    date: ScheduleDate {
                        gregorian: dt.date.gregorian,
                        timestamp: dt.date.timestamp,
                    },
                    times: dt.times,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pray_zone_response() {
        let json = r#"{
            "code": 200,
            "status": "OK",
            "results": {
                "datetime": [{
                    "times": {"Imsak": "04:13", "Sunrise": "05:37", "Fajr": "04:23", "Dhuhr": "11:56"},
                    "date": {"timestamp": 1704067200, "gregorian": "2024-01-01", "hijri": "1445-06-19"}
                }],
                "location": {"latitude": -6.2, "longitude": 106.8, "city": "Jakarta", "country": "Indonesia", "country_code": "ID"},
                "settings": {"school": "Majlis Ugama Islam Singapura, Singapore"}
            }
        }"#;

        let resp: PrayTimeResponse = serde_json::from_str(json).unwrap();
        let schedule = Schedule::from(resp);

        assert_eq!(schedule.location.label(), "Jakarta - Indonesia");
        assert_eq!(schedule.days.len(), 1);
        assert_eq!(schedule.days[0].date.timestamp, 1704067200);
        assert_eq!(schedule.days[0].times.get("Fajr").map(String::as_str), Some("04:23"));
    }

    #[test]
    fn test_missing_datetime_is_empty_schedule() {
        let json = r#"{"results": {"location": {"city": "Nowhere", "country": "None"}}}"#;
        let schedule = Schedule::from(serde_json::from_str::<PrayTimeResponse>(json).unwrap());
        assert!(schedule.days.is_empty());
    }

    #[test]
    fn test_parse_city_search() {
        let json = r#"[{"city_code":"jakarta","city_name":"Jakarta","country_code":"ID","country_name":"Indonesia"}]"#;
        let cities: Vec<CityRecord> = serde_json::from_str::<Vec<CityResponse>>(json)
            .unwrap()
            .into_iter()
            .map(Into::into)
            .collect();
        assert_eq!(cities[0].city_code, "jakarta");
        assert_eq!(cities[0].ics_filename(), "Jakarta_Indonesia.ics");
    }
}
