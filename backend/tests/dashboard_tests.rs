//! Dashboard integration tests using wiremock.
//!
//! The geocoding, timezone and weather APIs are served from one mock server;
//! the dashboard service and the axum router are driven against it.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use weather_dashboard::services::DashboardService;
use weather_dashboard::{create_app, AppError, AppState, Config};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEOCODING_PATH: &str = "/geo/1.0/direct";
const TIMEZONE_PATH: &str = "/timezoneJSON";
const WEATHER_PATH: &str = "/weatherapi/locationforecast/2.0/compact";

/// Helper to create a compact forecast body with `entries` hourly steps
fn forecast_body(entries: usize) -> serde_json::Value {
    let timeseries: Vec<serde_json::Value> = (0..entries)
        .map(|i| {
            serde_json::json!({
                "time": format!("2024-01-01T{:02}:00:00Z", i % 24),
                "data": {
                    "instant": {"details": {
                        "air_temperature": 5.0 + i as f64,
                        "air_pressure_at_sea_level": 1012.0,
                        "cloud_area_fraction": 75.0,
                        "wind_speed": 3.2,
                        "wind_from_direction": 250.0
                    }},
                    "next_1_hours": {
                        "summary": {"symbol_code": "cloudy"},
                        "details": {"precipitation_amount": if i == 2 { 0.2 } else { 0.0 }}
                    },
                    "next_6_hours": {
                        "summary": {"symbol_code": "lightrain"},
                        "details": {"precipitation_amount": 1.1}
                    },
                    "next_12_hours": {
                        "summary": {"symbol_code": "rain"},
                        "details": {}
                    }
                }
            })
        })
        .collect();

    serde_json::json!({
        "type": "Feature",
        "properties": {
            "meta": {
                "updated_at": "2024-01-01T00:00:00Z",
                "units": {
                    "air_temperature": "celsius",
                    "air_pressure_at_sea_level": "hPa",
                    "cloud_area_fraction": "%",
                    "precipitation_amount": "mm",
                    "wind_speed": "m/s",
                    "wind_from_direction": "degrees"
                }
            },
            "timeseries": timeseries
        }
    })
}

/// Helper to create a GeoNames timezone body
fn timezone_body(dst_offset: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "sunrise": "2024-01-01 07:44",
        "lng": 16.8,
        // Deliberately different from the geocoder's country
        "countryCode": "AT",
        "gmtOffset": 1,
        "rawOffset": 1,
        "sunset": "2024-01-01 16:09",
        "timezoneId": "Europe/Prague",
        "dstOffset": dst_offset,
        "countryName": "Austria",
        "time": "2024-01-01 12:00",
        "lat": 48.79
    })
}

async fn mount_geocoding(server: &MockServer, city: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .and(query_param("q", city))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_lednice(server: &MockServer) {
    mount_geocoding(
        server,
        "Lednice",
        serde_json::json!([
            {"name": "Lednice", "lat": 48.79995, "lon": 16.80342, "country": "CZ", "state": "South Moravian Region"},
            {"name": "Lednice", "lat": 50.0, "lon": 15.0, "country": "CZ"}
        ]),
    )
    .await;
}

async fn mount_timezone(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(TIMEZONE_PATH))
        .and(query_param("username", "test-user"))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn mount_weather(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .and(query_param("lat", "48.7999"))
        .and(query_param("lon", "16.8034"))
        .and(header("user-agent", "weather-dashboard-tests/0.1"))
        .and(header("from", "tests@example.com"))
        .respond_with(template)
        .mount(server)
        .await;
}

fn service(server: &MockServer) -> DashboardService {
    DashboardService::from_config(&Config::for_base_url(&server.uri())).unwrap()
}

// ============================================================================
// Dashboard Service
// ============================================================================

#[tokio::test]
async fn test_build_report_success() {
    let server = MockServer::start().await;
    mount_lednice(&server).await;
    mount_timezone(&server, ResponseTemplate::new(200).set_body_json(timezone_body(serde_json::json!(2))))
        .await;
    mount_weather(&server, ResponseTemplate::new(200).set_body_json(forecast_body(24))).await;

    let report = service(&server).build_report("Lednice").await.unwrap();

    assert_eq!(report.location.name, "Lednice");
    assert_eq!(report.location.country_code.as_deref(), Some("CZ"));
    assert_eq!(report.timezone.offset.minutes(), 120);
    assert_eq!(report.timezone.timezone_id.as_deref(), Some("Europe/Prague"));
    assert_eq!(report.forecast.len(), 12);
    assert_eq!(report.forecast.rows[0].time.to_string(), "2024-01-01 02:00:00");
    assert_eq!(report.forecast.rows[0].temperature, 5.0);
    assert_eq!(report.forecast.rows[2].precipitation, 0.2);
    assert_eq!(report.current.symbol_next_12_hours.as_deref(), Some("rain"));

    // Country comes from the geocoder, not the timezone service
    assert!(report.summary.starts_with("Lednice, CZ\n5 °C\n"));
    assert!(report.summary.contains("forecast 6 hours: lightrain"));
    assert!(report.summary.contains("wind speed: 3.2 m/s"));

    assert_eq!(report.charts.temperature_clouds["data"].as_array().unwrap().len(), 2);
    assert_eq!(
        report.charts.pressure_precipitation["data"][0]["x"].as_array().unwrap().len(),
        12
    );
}

#[tokio::test]
async fn test_unknown_place_never_reaches_extractor() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Nonexistentville123", serde_json::json!([])).await;

    Mock::given(method("GET"))
        .and(path(TIMEZONE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = service(&server)
        .build_report("Nonexistentville123")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::LocationNotFound(ref q) if q == "Nonexistentville123"));
}

#[tokio::test]
async fn test_short_forecast_is_malformed() {
    let server = MockServer::start().await;
    mount_lednice(&server).await;
    mount_timezone(&server, ResponseTemplate::new(200).set_body_json(timezone_body(serde_json::json!(1))))
        .await;
    mount_weather(&server, ResponseTemplate::new(200).set_body_json(forecast_body(5))).await;

    let err = service(&server).build_report("Lednice").await.unwrap_err();

    assert!(matches!(err, AppError::MalformedForecast(_)));
    assert_eq!(
        err.to_string(),
        "Malformed forecast: expected at least 12 entries, found 5"
    );
}

#[tokio::test]
async fn test_geocoding_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = service(&server).build_report("Lednice").await.unwrap_err();
    assert!(matches!(err, AppError::GeocodingFailure(ref m) if m.contains("401")));
}

#[tokio::test]
async fn test_timezone_server_error() {
    let server = MockServer::start().await;
    mount_lednice(&server).await;
    mount_timezone(&server, ResponseTemplate::new(503)).await;

    let err = service(&server).build_report("Lednice").await.unwrap_err();
    assert!(matches!(err, AppError::TimezoneLookupFailure(_)));
}

#[tokio::test]
async fn test_timezone_in_band_error() {
    let server = MockServer::start().await;
    mount_lednice(&server).await;
    mount_timezone(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": {"message": "user account not enabled to use the free webservice", "value": 10}
        })),
    )
    .await;

    let err = service(&server).build_report("Lednice").await.unwrap_err();
    assert!(matches!(err, AppError::TimezoneLookupFailure(ref m) if m.contains("code 10")));
}

#[tokio::test]
async fn test_malformed_offset_is_missing_offset() {
    let server = MockServer::start().await;
    mount_lednice(&server).await;
    mount_timezone(
        &server,
        ResponseTemplate::new(200).set_body_json(timezone_body(serde_json::json!("two"))),
    )
    .await;
    mount_weather(&server, ResponseTemplate::new(200).set_body_json(forecast_body(24))).await;

    let err = service(&server).build_report("Lednice").await.unwrap_err();
    assert!(matches!(err, AppError::MissingOffset));
}

#[tokio::test]
async fn test_weather_server_error() {
    let server = MockServer::start().await;
    mount_lednice(&server).await;
    mount_timezone(&server, ResponseTemplate::new(200).set_body_json(timezone_body(serde_json::json!(2))))
        .await;
    mount_weather(&server, ResponseTemplate::new(500)).await;

    let err = service(&server).build_report("Lednice").await.unwrap_err();
    assert!(matches!(err, AppError::ForecastFetchFailure(_)));
}

#[tokio::test]
async fn test_blank_query_rejected_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = service(&server).build_report("   ").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

// ============================================================================
// HTTP Routes
// ============================================================================

async fn get(server: &MockServer, uri: &str) -> axum::response::Response {
    let state = AppState::new(Config::for_base_url(&server.uri())).unwrap();
    create_app(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_forecast_route_json() {
    let server = MockServer::start().await;
    mount_lednice(&server).await;
    mount_timezone(&server, ResponseTemplate::new(200).set_body_json(timezone_body(serde_json::json!(2))))
        .await;
    mount_weather(&server, ResponseTemplate::new(200).set_body_json(forecast_body(12))).await;

    let response = get(&server, "/api/v1/forecast?city=Lednice").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["forecast"]["rows"].as_array().unwrap().len(), 12);
    assert_eq!(body["forecast"]["offset"], 2.0);
    assert_eq!(body["charts"]["pressure_precipitation"]["data"][1]["type"], "bar");
    assert_eq!(body["location"]["country_code"], "CZ");
}

#[tokio::test]
async fn test_forecast_route_csv() {
    let server = MockServer::start().await;
    mount_lednice(&server).await;
    mount_timezone(&server, ResponseTemplate::new(200).set_body_json(timezone_body(serde_json::json!(0))))
        .await;
    mount_weather(&server, ResponseTemplate::new(200).set_body_json(forecast_body(12))).await;

    let response = get(&server, "/api/v1/forecast?city=Lednice&format=csv").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/csv");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], "time,temperature,pressure,precipitation,cloud_area_fraction");
    assert!(lines[1].starts_with("2024-01-01T00:00:00,5.0,1012.0,0.0,75.0"));
}

#[tokio::test]
async fn test_forecast_route_reports_failing_service() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Nonexistentville123", serde_json::json!([])).await;

    let response = get(&server, "/api/v1/forecast?city=Nonexistentville123").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "LOCATION_NOT_FOUND");
    assert_eq!(body["error"]["service"], "geocoding");
}

#[tokio::test]
async fn test_forecast_route_rejects_unknown_format() {
    let server = MockServer::start().await;

    let response = get(&server, "/api/v1/forecast?city=Lednice&format=xml").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["service"].is_null());
}

#[tokio::test]
async fn test_forecast_route_missing_city_is_json_error() {
    let server = MockServer::start().await;

    let response = get(&server, "/api/v1/forecast").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].as_str().unwrap().contains("city"));
}

#[tokio::test]
async fn test_missing_api_key_names_geocoding() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = Config::for_base_url(&server.uri());
    config.geocoding.api_key = String::new();
    let state = AppState::new(config).unwrap();
    let response = create_app(state)
        .oneshot(
            Request::builder()
                .uri("/api/v1/forecast?city=Lednice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "GEOCODING_FAILURE");
    assert_eq!(body["error"]["service"], "geocoding");
    assert!(body["error"]["message"].as_str().unwrap().contains("API key"));
}

#[tokio::test]
async fn test_index_and_health() {
    let server = MockServer::start().await;

    let response = get(&server, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("id=\"graf_1\""));
    assert!(html.contains("id=\"graf_2\""));

    let response = get(&server, "/api/v1/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["horizon_hours"], 12);
}
