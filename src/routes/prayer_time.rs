//! Subscription endpoints

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;

use prayer_time_core::{CityRecord, KeyGrant, SubscriptionRequest};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prayer-time/get-key", post(get_key))
        .route("/prayer-time/get", get(get_calendar))
        .route("/prayer-time/get-city", get(get_city))
}

/// POST /prayer-time/get-key - Mint an expiring subscription link
async fn get_key(
    State(state): State<AppState>,
    Json(req): Json<SubscriptionRequest>,
) -> Result<Json<KeyGrant>, AppError> {
    let grant = state.generator().create_key(&req).await?;
    Ok(Json(grant))
}

#[derive(Deserialize)]
pub struct KeyQuery {
    pub key: String,
}

/// GET /prayer-time/get?key= - Download the calendar for a key
async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<impl IntoResponse, AppError> {
    let doc = state.generator().render(&query.key).await?;

    let headers = [
        (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", doc.filename),
        ),
    ];
    Ok((headers, doc.content))
}

#[derive(Deserialize)]
pub struct CityQuery {
    pub name: String,
}

/// GET /prayer-time/get-city?name= - Validated city matches
async fn get_city(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Json<Vec<CityRecord>>, AppError> {
    let cities = state.generator().resolve_city(&query.name).await?;
    Ok(Json(cities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use prayer_time_core::{
        CityDirectory, KeyStore, Location, MemoryStore, PrayerTimeResult, Schedule, ScheduleDate,
        ScheduleDay, ScheduleProvider, ScheduleQuery, SubscriptionGenerator,
    };
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct OneCityProvider;

    #[async_trait]
    impl ScheduleProvider for OneCityProvider {
        async fn search_cities(&self, name: &str) -> PrayerTimeResult<Vec<CityRecord>> {
            if name != "Jakarta" {
                return Ok(vec![]);
            }
            Ok(vec![CityRecord {
                city_code: "jakarta".into(),
                city_name: "Jakarta".into(),
                country_code: "ID".into(),
                country_name: "Indonesia".into(),
            }])
        }

        async fn fetch_schedule(&self, query: &ScheduleQuery) -> PrayerTimeResult<Schedule> {
            Ok(Schedule {
                location: Location {
                    city: "Jakarta".into(),
                    country: "Indonesia".into(),
                },
                days: vec![ScheduleDay {
                    date: ScheduleDate {
                        gregorian: query.start.to_string(),
                        timestamp: 1704067200,
                    },
                    times: BTreeMap::from([("Fajr".to_string(), "04:30".to_string())]),
                }],
            })
        }
    }

    fn app() -> Router {
        let provider: Arc<dyn ScheduleProvider> = Arc::new(OneCityProvider);
        let store = Arc::new(MemoryStore::new());
        let generator = SubscriptionGenerator::new(
            KeyStore::new(store.clone(), "http://test"),
            CityDirectory::new(provider.clone(), store),
            provider,
        );
        router().with_state(AppState::from_generator(generator))
    }

    fn post_key(body: &str) -> Request<Body> {
        Request::post("/prayer-time/get-key")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_key_then_calendar_download() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_key(
                r#"{"city":"Jakarta","start_date":"2024-01-01","end_date":"2024-01-01"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let grant: KeyGrant = serde_json::from_slice(&body).unwrap();
        assert!(grant.url.starts_with("http://test/prayer-time/get?key="));

        let response = app
            .oneshot(
                Request::get(format!("/prayer-time/get?key={}", grant.key))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jakarta_Indonesia.ics\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let ics = String::from_utf8(body.to_vec()).unwrap();
        assert!(ics.contains("BEGIN:VEVENT"), "ICS:\n{}", ics);
    }

    #[tokio::test]
    async fn test_reversed_range_is_bad_request() {
        let response = app()
            .oneshot(post_key(
                r#"{"city":"Jakarta","start_date":"2024-01-02","end_date":"2024-01-01"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_key_is_gone() {
        let response = app()
            .oneshot(
                Request::get("/prayer-time/get?key=nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::GONE);
    }

    #[tokio::test]
    async fn test_city_lookup_returns_empty_list_for_no_match() {
        let response = app()
            .oneshot(
                Request::get("/prayer-time/get-city?name=Atlantis")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"[]");
    }
}
